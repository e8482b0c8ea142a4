//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use line_history::{History, HistoryConfig};
use tempfile::TempDir;

/// Builder for a temporary directory holding history files
pub struct HistoryDirBuilder {
    temp_dir: TempDir,
}

impl HistoryDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file with raw content
    pub fn with_file(self, name: &str, content: &str) -> Self {
        fs::write(self.temp_dir.path().join(name), content).expect("Failed to write history file");
        self
    }

    /// Write a timestamped history file, one entry per `(millis, line)`
    pub fn with_entries(self, name: &str, entries: &[(i64, &str)]) -> Self {
        let content: String = entries
            .iter()
            .map(|(millis, line)| format!("{}:{}\n", millis, line_history::escape(line)))
            .collect();
        self.with_file(name, &content)
    }

    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for HistoryDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Path of the default history file inside a test directory
pub fn history_path(dir: &Path) -> PathBuf {
    dir.join("history")
}

/// Config backed by `<dir>/history` with incremental saves off
pub fn test_config(dir: &Path) -> HistoryConfig {
    HistoryConfig { incremental: false, ..HistoryConfig::default() }.with_file(history_path(dir))
}

pub fn texts(history: &History) -> Vec<String> {
    history.entries().map(|e| e.line().to_string()).collect()
}

pub fn file_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path).expect("Failed to read file").lines().map(String::from).collect()
}
