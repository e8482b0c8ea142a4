use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::trace;

use super::history_line::{DecodedLine, decode_line};
use crate::error::{IoContext, Result};

/// Parse every line of a history file, in file order
///
/// The caller is expected to have checked that the file exists.
///
/// # Errors
///
/// Returns [`HistoryError::Io`](crate::error::HistoryError::Io) when the file
/// cannot be opened or read, and
/// [`HistoryError::Format`](crate::error::HistoryError::Format) on the first
/// malformed line.
pub fn parse_history_file(path: &Path, timestamped: bool) -> Result<Vec<DecodedLine>> {
    let file = File::open(path).with_path(path)?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.with_path(path)?;
        lines.push(decode_line(&line, line_num + 1, timestamped)?);
    }

    trace!(path = %path.display(), count = lines.len(), "parsed history file");
    Ok(lines)
}
