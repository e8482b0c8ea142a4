//! History configuration.
//!
//! All options a line editor would otherwise look up dynamically are collected
//! in [`HistoryConfig`]. It deserializes from TOML with every key optional:
//!
//! ```toml
//! file = "~/.line_history"
//! size = 500
//! file_size = 10000
//! timestamped = true
//! ignore_dups = true
//! ignore = "ls*:exit"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HistoryError, IoContext, Result};
use crate::filters::IgnorePatterns;
use crate::utils::expand_tilde;

pub const DEFAULT_HISTORY_SIZE: usize = 500;
pub const DEFAULT_HISTORY_FILE_SIZE: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// Backing history file; `None` keeps history in memory only
    pub file: Option<PathBuf>,
    /// Maximum number of entries kept in memory
    pub size: usize,
    /// Maximum number of entries kept on disk after a trim
    pub file_size: usize,
    /// Persist `<epoch-millis>:` before each line
    pub timestamped: bool,
    /// Drop every new line
    pub disabled: bool,
    /// Skip a line equal to the most recent entry
    pub ignore_dups: bool,
    /// Skip lines starting with a space
    pub ignore_space: bool,
    /// Trim surrounding whitespace before adding
    pub reduce_blanks: bool,
    /// Append to the backing file after every add
    pub incremental: bool,
    /// Colon-separated wildcard patterns of lines to skip
    pub ignore: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file: None,
            size: DEFAULT_HISTORY_SIZE,
            file_size: DEFAULT_HISTORY_FILE_SIZE,
            timestamped: true,
            disabled: false,
            ignore_dups: true,
            ignore_space: false,
            reduce_blanks: true,
            incremental: true,
            ignore: String::new(),
        }
    }
}

impl HistoryConfig {
    /// Parse a TOML document
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Config`] for invalid TOML, unknown keys, or a
    /// zero `size`.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: HistoryConfig =
            toml::from_str(content).map_err(|e| HistoryError::Config(e.to_string()))?;
        config.file = config.file.map(|file| expand_tilde(&file));
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_path(path)?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.try_exists().with_path(path)? { Self::load(path) } else { Ok(Self::default()) }
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(expand_tilde(&file.into()));
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(HistoryError::Config("size must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn ignore_patterns(&self) -> IgnorePatterns {
        IgnorePatterns::parse(&self.ignore)
    }

    /// Entry count on disk past which an append triggers a trim
    pub fn trim_threshold(&self) -> usize {
        self.file_size + self.file_size / 4
    }
}
