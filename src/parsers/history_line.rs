use chrono::{DateTime, Utc};

use super::escape::{escape, unescape};
use crate::error::{HistoryError, Result};
use crate::models::Entry;

/// A persisted line after decoding, before it becomes an [`Entry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLine {
    pub timestamp: DateTime<Utc>,
    pub line: String,
}

/// Decode one physical line of a history file
///
/// `line_num` is 1-based and only used for error reporting. In plain mode the
/// entry is stamped with the current time.
///
/// # Errors
///
/// In timestamped mode, returns [`HistoryError::Format`] when the `:`
/// separator is missing or the prefix is not a valid millisecond timestamp.
pub fn decode_line(raw: &str, line_num: usize, timestamped: bool) -> Result<DecodedLine> {
    if !timestamped {
        return Ok(DecodedLine { timestamp: Utc::now(), line: unescape(raw) });
    }

    let (millis, text) = raw.split_once(':').ok_or_else(|| HistoryError::Format {
        line: line_num,
        reason: "missing ':' after timestamp".to_string(),
    })?;

    let millis: i64 = millis.parse().map_err(|_| HistoryError::Format {
        line: line_num,
        reason: format!("invalid timestamp '{}'", millis),
    })?;
    let timestamp =
        DateTime::from_timestamp_millis(millis).ok_or_else(|| HistoryError::Format {
            line: line_num,
            reason: format!("timestamp {} out of range", millis),
        })?;

    Ok(DecodedLine { timestamp, line: unescape(text) })
}

/// Encode an entry as a physical line, newline included
pub fn encode_entry(entry: &Entry, timestamped: bool) -> String {
    if timestamped {
        format!("{}:{}\n", entry.timestamp().timestamp_millis(), escape(entry.line()))
    } else {
        format!("{}\n", escape(entry.line()))
    }
}
