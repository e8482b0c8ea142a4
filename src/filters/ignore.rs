//! Ignore patterns for new history lines.
//!
//! # Syntax
//!
//! ```text
//! patterns := pattern (':' pattern)*
//! pattern  := (char | '*' | '\' char)*
//! ```
//!
//! - `*` matches any run of characters, including none
//! - `\` makes the next character literal (`\*`, `\:`, `\\`)
//! - empty segments are ignored
//!
//! A pattern must match the **whole** line.
//!
//! # Examples
//!
//! ```rust
//! # use line_history::filters::IgnorePatterns;
//! let patterns = IgnorePatterns::parse("ls*:exit:* --password*");
//! assert!(patterns.matches("ls -la"));
//! assert!(patterns.matches("exit"));
//! assert!(!patterns.matches("exit 1"));
//! assert!(patterns.matches("mysql --password=x"));
//! ```

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    AnyRun,
}

/// One compiled `*` wildcard pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardPattern {
    tokens: Vec<Token>,
}

impl WildcardPattern {
    pub fn compile(pattern: &str) -> Self {
        let mut tokens = Vec::new();
        let mut chars = pattern.chars();

        while let Some(ch) = chars.next() {
            match ch {
                '*' => {
                    // Collapse runs of '*'
                    if tokens.last() != Some(&Token::AnyRun) {
                        tokens.push(Token::AnyRun);
                    }
                }
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        tokens.push(Token::Literal(escaped));
                    }
                }
                _ => tokens.push(Token::Literal(ch)),
            }
        }

        Self { tokens }
    }

    /// Whole-line match with single-star backtracking
    pub fn matches(&self, text: &str) -> bool {
        let text: Vec<char> = text.chars().collect();
        let (mut t, mut p) = (0, 0);
        let mut backtrack: Option<(usize, usize)> = None;

        while t < text.len() {
            match self.tokens.get(p) {
                Some(Token::Literal(c)) if *c == text[t] => {
                    t += 1;
                    p += 1;
                }
                Some(Token::AnyRun) => {
                    backtrack = Some((p, t));
                    p += 1;
                }
                _ => match backtrack {
                    Some((star_p, star_t)) => {
                        p = star_p + 1;
                        t = star_t + 1;
                        backtrack = Some((star_p, star_t + 1));
                    }
                    None => return false,
                },
            }
        }

        self.tokens[p..].iter().all(|token| *token == Token::AnyRun)
    }
}

/// Colon-separated list of [`WildcardPattern`]s
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnorePatterns {
    patterns: Vec<WildcardPattern>,
}

impl IgnorePatterns {
    pub fn parse(spec: &str) -> Self {
        let patterns = split_unescaped(spec)
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .map(|segment| WildcardPattern::compile(&segment))
            .collect();
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True if any pattern matches the entire line
    pub fn matches(&self, line: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(line))
    }
}

/// Split on ':' while leaving `\:` (and every other escape) intact for the
/// pattern compiler
fn split_unescaped(spec: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = spec.chars();

    while let Some(ch) = chars.next() {
        match ch {
            ':' => segments.push(std::mem::take(&mut current)),
            '\\' => {
                current.push(ch);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            _ => current.push(ch),
        }
    }
    segments.push(current);

    segments
}
