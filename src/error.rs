//! Error types for the history engine.
//!
//! Three failure classes matter to callers:
//!
//! - **Format errors**: a persisted line does not have the expected
//!   `<epoch-millis>:<text>` shape. Loading stops and the store is cleared.
//! - **I/O errors**: the history file could not be read, written, or renamed.
//! - **Range errors**: an absolute index outside the live window was requested.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("bad history file syntax at line {line}: {reason}")]
    Format { line: usize, reason: String },

    #[error("history I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("history index {index} out of range (first {first}, {len} entries)")]
    OutOfRange { index: usize, first: usize, len: usize },

    #[error("invalid history configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HistoryError>;

impl HistoryError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: &Path, source: io::Error) -> Self {
        HistoryError::Io { path: path.to_path_buf(), source }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, HistoryError::Format { .. })
    }
}

/// Extension to attach a path to `io::Result` values
pub(crate) trait IoContext<T> {
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| HistoryError::io(path, e))
    }
}
