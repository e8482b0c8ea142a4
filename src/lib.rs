//! Line History - command history engine for interactive line editors
//!
//! This library keeps a bounded, index-addressable history of typed lines and
//! keeps it in sync with plain-text history files. It supports:
//!
//! - Stable absolute indices while old entries are evicted
//! - Incremental appends and full rewrites of the history file
//! - Trimming the file (deduplicate, keep the newest `file_size` lines)
//! - Merging additional history files into one session
//! - Previous/next browsing with a cursor
//!
//! # Example
//!
//! ```no_run
//! use line_history::{History, HistoryConfig};
//!
//! let config = HistoryConfig::default().with_file("/home/alice/.line_history");
//! let mut history = History::open(config)?;
//! history.add("cargo test");
//! println!("{} entries, newest is {:?}", history.len(), history.last());
//! # Ok::<(), line_history::HistoryError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod filters;
pub mod history;
pub mod models;
pub mod parsers;
pub mod repl;
pub mod utils;

// Re-export commonly used types
pub use config::HistoryConfig;
pub use error::{HistoryError, Result};
pub use history::History;
pub use models::Entry;
pub use parsers::{escape, unescape};
