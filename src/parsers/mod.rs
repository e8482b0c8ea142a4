//! Line codec and reader for history files.
//!
//! # Format
//!
//! One entry per line. In timestamped mode each line is
//! `<epoch-millis>:<escaped text>`; otherwise the whole line is the escaped
//! text. Backslash, LF and CR are escaped as `\\`, `\n`, `\r`.
//!
//! # Error Handling Strategy
//!
//! Unlike a best-effort log reader, a history file is parsed **strictly**: the
//! first malformed timestamp aborts the whole parse with
//! [`HistoryError::Format`](crate::error::HistoryError::Format). A file that
//! does not look like our format is more likely foreign data than a slightly
//! damaged history, and importing it line by line would pollute the session.

pub mod escape;
pub mod history_file;
pub mod history_line;

pub use escape::{escape, unescape};
pub use history_file::parse_history_file;
pub use history_line::{DecodedLine, decode_line, encode_entry};
