//! Terminal output sanitization for history lines
//!
//! History files are plain text anyone can edit, so a stored line may carry
//! ANSI escape sequences. Anything printed from history goes through
//! [`display_line`] first.

/// Render a history line for single-line terminal output
///
/// - CSI sequences (`ESC [ ... letter`) are removed
/// - embedded newlines and carriage returns become visible `\n` / `\r`
/// - other control characters except tab are dropped
///
/// # Examples
///
/// ```
/// use line_history::utils::terminal::display_line;
///
/// assert_eq!(display_line("\x1b[31mls\x1b[0m\n-la"), "ls\\n-la");
/// ```
pub fn display_line(line: &str) -> String {
    let mut result = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' if chars.peek() == Some(&'[') => {
                chars.next();
                for next in chars.by_ref() {
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push(ch),
            c if c.is_control() => {}
            c => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_line_strips_color() {
        assert_eq!(display_line("\x1b[1m\x1b[31mgit\x1b[0m push"), "git push");
    }

    #[test]
    fn test_display_line_shows_newlines() {
        assert_eq!(
            display_line("for x in a b\ndo echo $x\r\ndone"),
            "for x in a b\\ndo echo $x\\r\\ndone"
        );
    }

    #[test]
    fn test_display_line_drops_bell_and_backspace() {
        assert_eq!(display_line("rm\x07 -rf\x08"), "rm -rf");
    }

    #[test]
    fn test_display_line_keeps_tabs_and_unicode() {
        assert_eq!(display_line("echo\t👋"), "echo\t👋");
    }

    #[test]
    fn test_display_line_lone_escape_dropped() {
        assert_eq!(display_line("a\x1bb"), "ab");
    }
}
