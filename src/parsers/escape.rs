/// Escape a history line so it fits on a single physical line
///
/// # Examples
///
/// ```
/// use line_history::parsers::escape;
///
/// assert_eq!(escape("a\\b\nc"), "a\\\\b\\nc");
/// ```
pub fn escape(line: &str) -> String {
    let mut result = String::with_capacity(line.len());
    for ch in line.chars() {
        match ch {
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            _ => result.push(ch),
        }
    }
    result
}

/// Reverse [`escape`]
///
/// A backslash followed by anything other than `n` or `r` yields that
/// character literally. A dangling backslash at the end is dropped.
pub fn unescape(escaped: &str) -> String {
    let mut result = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some(other) => result.push(other),
            None => {}
        }
    }

    result
}
