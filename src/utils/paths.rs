use std::borrow::Cow;
use std::env;
use std::path::{Path, PathBuf};

/// Tracking key used when a history has no backing file
pub const NO_FILE_KEY: &str = "<none>";

/// Expand a leading `~` to the home directory
///
/// Paths without a leading `~`, or when the home directory is unknown, are
/// returned unchanged.
pub fn expand_tilde(path: &Path) -> PathBuf {
    expand_tilde_internal(path, dirs::home_dir())
}

fn expand_tilde_internal(path: &Path, home: Option<PathBuf>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

/// Key identifying a history file in the tracking map
///
/// The absolute form of `path`, so `hist` and `./hist` share one record.
pub fn tracking_key(path: Option<&Path>) -> String {
    match path {
        None => NO_FILE_KEY.to_string(),
        Some(path) => std::path::absolute(path)
            .unwrap_or_else(|_| path.to_path_buf())
            .to_string_lossy()
            .into_owned(),
    }
}

/// Formats a path with ~ substitution for the home directory
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && !home.is_empty()
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde() {
        let home = Some(PathBuf::from("/home/alice"));
        assert_eq!(
            expand_tilde_internal(Path::new("~/.line_history"), home.clone()),
            PathBuf::from("/home/alice/.line_history")
        );
        assert_eq!(
            expand_tilde_internal(Path::new("~"), home.clone()),
            PathBuf::from("/home/alice")
        );
        assert_eq!(
            expand_tilde_internal(Path::new("/etc/hist"), home),
            PathBuf::from("/etc/hist")
        );
    }

    #[test]
    fn test_expand_tilde_without_home() {
        assert_eq!(expand_tilde_internal(Path::new("~/x"), None), PathBuf::from("~/x"));
    }

    #[test]
    fn test_tracking_key_none_is_sentinel() {
        assert_eq!(tracking_key(None), NO_FILE_KEY);
    }

    #[test]
    fn test_tracking_key_relative_and_absolute_agree() {
        let cwd = env::current_dir().unwrap();
        let relative = tracking_key(Some(Path::new("hist")));
        let absolute = tracking_key(Some(&cwd.join("hist")));
        assert_eq!(relative, absolute);
        assert!(Path::new(&relative).is_absolute());
    }

    #[test]
    fn test_format_path_with_tilde() {
        let path = PathBuf::from("/Users/testuser/.line_history");
        let formatted = format_path_with_tilde_internal(&path, Some("/Users/testuser"));
        assert_eq!(formatted, "~/.line_history");

        let path2 = PathBuf::from("/opt/history");
        let formatted = format_path_with_tilde_internal(&path2, Some("/Users/testuser"));
        assert_eq!(formatted, "/opt/history");
    }
}
