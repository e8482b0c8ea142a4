//! Synchronizing a [`History`] with history files.
//!
//! # Write model
//!
//! Every write appends. A full rewrite ([`History::write`]) deletes the file
//! first and then appends everything; an incremental write appends only the
//! entries after the file's `last_loaded` mark. When the number of entries on
//! disk passes `file_size + file_size / 4`, the file is trimmed.
//!
//! # Trimming
//!
//! [`History::trim`] reads the whole file, keeps only the last occurrence of
//! each line, cuts the oldest entries down to `max`, and replaces the file via
//! a temporary file in the same directory and an atomic rename. A reader
//! never sees a half-written file, but two processes trimming at once race and
//! the last rename wins.
//!
//! # Failure handling
//!
//! A failed load or read clears the in-memory store so a retry starts clean.
//! Write and trim errors propagate; the original file stays in place until
//! the rename succeeds.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::History;
use super::tracking::FileRecord;
use super::trim::dedup_and_truncate;
use crate::error::{HistoryError, IoContext, Result};
use crate::models::Entry;
use crate::parsers::{encode_entry, parse_history_file};
use crate::utils::tracking_key;

impl History {
    /// Replace the in-memory history with the backing file's content
    ///
    /// Does nothing without a backing file or when the file does not exist.
    ///
    /// # Errors
    ///
    /// Propagates I/O and format errors after clearing the store.
    pub fn load(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        self.merge_file(&path, true, false)
    }

    /// Append another file's entries to the in-memory history
    ///
    /// `None` reads the backing file. With `check_duplicates`, lines already
    /// present anywhere in memory are skipped.
    ///
    /// # Errors
    ///
    /// Propagates I/O and format errors after clearing the store.
    pub fn read(&mut self, path: Option<&Path>, check_duplicates: bool) -> Result<()> {
        let Some(path) = self.resolve(path) else {
            return Ok(());
        };
        self.merge_file(&path, false, check_duplicates)
    }

    fn merge_file(&mut self, path: &Path, replace: bool, check_duplicates: bool) -> Result<()> {
        let result = self.try_merge_file(path, replace, check_duplicates);
        if let Err(e) = &result {
            debug!(path = %path.display(), error = %e, "failed to load history; clearing");
            self.clear();
        }
        result
    }

    fn try_merge_file(&mut self, path: &Path, replace: bool, check_duplicates: bool) -> Result<()> {
        if !path.try_exists().with_path(path)? {
            return Ok(());
        }

        trace!(path = %path.display(), "loading history");
        if replace {
            self.clear();
        }

        let decoded = parse_history_file(path, self.config.timestamped)?;
        let in_file = decoded.len();
        for line in decoded {
            self.store.push(line.timestamp, line.line, check_duplicates);
        }

        // Record before evicting so last_loaded shifts with the window
        let len = self.store.len();
        self.tracking.set(Some(path), FileRecord::new(len, in_file));
        self.maybe_resize();
        Ok(())
    }

    /// Append entries added since the last save to the backing file
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        let from = self.tracking.get(Some(&path)).last_loaded;
        self.internal_write(&path, from)
    }

    /// Rewrite a file with the whole in-memory history
    ///
    /// `None` targets the backing file.
    pub fn write(&mut self, path: Option<&Path>) -> Result<()> {
        let Some(path) = self.resolve(path) else {
            return Ok(());
        };
        if path.try_exists().with_path(&path)? {
            fs::remove_file(&path).with_path(&path)?;
            self.tracking.get_mut(Some(&path)).entries_in_file = 0;
        }
        self.internal_write(&path, 0)
    }

    /// Append to a file, everything or only what it has not seen yet
    pub fn append(&mut self, path: Option<&Path>, incremental: bool) -> Result<()> {
        let Some(path) = self.resolve(path) else {
            return Ok(());
        };
        let from = if incremental { self.tracking.get(Some(&path)).last_loaded } else { 0 };
        self.internal_write(&path, from)
    }

    fn internal_write(&mut self, path: &Path, from: usize) -> Result<()> {
        trace!(path = %path.display(), from, "saving history");

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_path(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path).with_path(path)?;
        let mut writer = BufWriter::new(file);
        let from = from.min(self.store.len());
        for entry in self.store.iter().skip(from) {
            let encoded = encode_entry(entry, self.config.timestamped);
            writer.write_all(encoded.as_bytes()).with_path(path)?;
        }
        writer.flush().with_path(path)?;

        let written = self.store.len() - from;
        let record = self.tracking.get_mut(Some(path));
        record.entries_in_file += written;
        if record.entries_in_file > self.config.trim_threshold() {
            self.trim(Some(path), self.config.file_size)?;
        }

        self.tracking.get_mut(Some(path)).last_loaded = self.store.len();
        Ok(())
    }

    /// Deduplicate a history file and cut it down to `max` entries
    ///
    /// If `path` is the backing file, the in-memory history is replaced by
    /// the trimmed content.
    pub fn trim(&mut self, path: Option<&Path>, max: usize) -> Result<()> {
        let Some(path) = self.resolve(path) else {
            return Ok(());
        };
        if !path.try_exists().with_path(&path)? {
            return Ok(());
        }
        trace!(path = %path.display(), max, "trimming history");

        let factory = self.store.factory().clone();
        let all: Vec<Entry> = parse_history_file(&path, self.config.timestamped)?
            .into_iter()
            .enumerate()
            .map(|(index, decoded)| factory(index, decoded.timestamp, decoded.line))
            .collect();
        let trimmed = dedup_and_truncate(all, max);

        self.replace_file(&path, &trimmed)?;

        if self.is_backing_file(&path) {
            self.clear();
            let offset = trimmed.first().map(Entry::index).unwrap_or(0);
            self.store.replace(offset, trimmed);
            let len = self.store.len();
            self.tracking.set(Some(&path), FileRecord::new(len, len));
        } else {
            self.tracking.get_mut(Some(&path)).entries_in_file = trimmed.len();
        }

        self.maybe_resize();
        Ok(())
    }

    fn replace_file(&self, path: &Path, entries: &[Entry]) -> Result<()> {
        let absolute = std::path::absolute(path).with_path(path)?;
        let dir = absolute.parent().unwrap_or(Path::new("."));
        let prefix = absolute
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "history".to_string());

        let temp = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".tmp")
            .tempfile_in(dir)
            .with_path(dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            for entry in entries {
                writer
                    .write_all(encode_entry(entry, self.config.timestamped).as_bytes())
                    .with_path(temp.path())?;
            }
            writer.flush().with_path(temp.path())?;
        }

        temp.persist(&absolute).map_err(|e| HistoryError::io(&absolute, e.error))?;
        Ok(())
    }

    /// Clear memory and delete the backing file
    pub fn purge(&mut self) -> Result<()> {
        self.clear();
        if let Some(path) = self.path.clone()
            && path.try_exists().with_path(&path)?
        {
            trace!(path = %path.display(), "purging history file");
            fs::remove_file(&path).with_path(&path)?;
        }
        Ok(())
    }

    fn resolve(&self, path: Option<&Path>) -> Option<PathBuf> {
        path.map(Path::to_path_buf).or_else(|| self.path.clone())
    }

    fn is_backing_file(&self, path: &Path) -> bool {
        self.path.as_deref().is_some_and(|own| tracking_key(Some(own)) == tracking_key(Some(path)))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::{DateTime, Utc};
    use tempfile::TempDir;

    use super::*;
    use crate::config::HistoryConfig;

    fn config(dir: &TempDir) -> HistoryConfig {
        HistoryConfig { incremental: false, ..HistoryConfig::default() }
            .with_file(dir.path().join("history"))
    }

    fn ts(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    fn lines(history: &History) -> Vec<String> {
        history.entries().map(|e| e.line().to_string()).collect()
    }

    #[test]
    fn test_load_missing_file_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut history = History::new(config(&dir));
        history.add("kept");
        history.load().unwrap();
        assert_eq!(lines(&history), ["kept"]);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut history = History::new(config(&dir));
        history.add_at(ts(1000), "echo 'a\\b'");
        history.add_at(ts(2000), "multi\nline");
        history.save().unwrap();

        let content = fs::read_to_string(dir.path().join("history")).unwrap();
        assert_eq!(content, "1000:echo 'a\\\\b'\n2000:multi\\nline\n");

        let reloaded = History::open(config(&dir)).unwrap();
        assert_eq!(lines(&reloaded), ["echo 'a\\b'", "multi\nline"]);
        assert_eq!(reloaded.get(1).unwrap().timestamp(), ts(2000));
        assert_eq!(reloaded.file_record(None), FileRecord::new(2, 2));
    }

    #[test]
    fn test_save_is_incremental() {
        let dir = TempDir::new().unwrap();
        let mut history = History::new(config(&dir));
        history.add_at(ts(1), "a");
        history.save().unwrap();
        history.add_at(ts(2), "b");
        history.save().unwrap();
        history.save().unwrap();

        let content = fs::read_to_string(dir.path().join("history")).unwrap();
        assert_eq!(content, "1:a\n2:b\n");
        assert_eq!(history.file_record(None), FileRecord::new(2, 2));
    }

    #[test]
    fn test_incremental_add_saves_immediately() {
        let dir = TempDir::new().unwrap();
        let config = HistoryConfig::default().with_file(dir.path().join("history"));
        let mut history = History::new(config);
        history.add_at(ts(5), "git status");

        let content = fs::read_to_string(dir.path().join("history")).unwrap();
        assert_eq!(content, "5:git status\n");
    }

    #[test]
    fn test_write_rewrites_whole_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history");
        fs::write(&path, "9:stale\n").unwrap();

        let mut history = History::new(config(&dir));
        history.add_at(ts(1), "fresh");
        history.write(None).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "1:fresh\n");
        assert_eq!(history.file_record(None), FileRecord::new(1, 1));
    }

    #[test]
    fn test_append_non_incremental_writes_everything() {
        let dir = TempDir::new().unwrap();
        let other = dir.path().join("nested").join("copy");
        let mut history = History::new(config(&dir));
        history.add_at(ts(1), "a");
        history.append(Some(&other), false).unwrap();
        history.append(Some(&other), false).unwrap();

        assert_eq!(fs::read_to_string(&other).unwrap(), "1:a\n1:a\n");
        assert_eq!(history.file_record(Some(&other)).entries_in_file, 2);
    }

    #[test]
    fn test_plain_mode_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = HistoryConfig { timestamped: false, ..config(&dir) };
        let mut history = History::new(config.clone());
        history.add("cd ~\\work");
        history.save().unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("history")).unwrap(), "cd ~\\\\work\n");
        let reloaded = History::open(config).unwrap();
        assert_eq!(lines(&reloaded), ["cd ~\\work"]);
    }

    #[test]
    fn test_load_format_error_clears_store() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("history"), "bogus-no-colon\n").unwrap();

        let mut history = History::new(config(&dir));
        history.add("in memory");
        let err = history.load().unwrap_err();
        assert!(err.is_format());
        assert!(history.is_empty());
        assert_eq!(history.file_record(None), FileRecord::default());
    }

    #[test]
    fn test_read_failure_clears_store() {
        let dir = TempDir::new().unwrap();
        let other = dir.path().join("other");
        fs::write(&other, "1:ok\nnope\n").unwrap();

        let mut history = History::new(config(&dir));
        history.add("in memory");
        assert!(history.read(Some(&other), false).is_err());
        assert!(history.is_empty());
    }

    #[test]
    fn test_read_merges_with_dedup() {
        let dir = TempDir::new().unwrap();
        let other = dir.path().join("other");
        fs::write(&other, "1:ls\n2:make\n3:pwd\n").unwrap();

        let mut history = History::new(config(&dir));
        history.add("make");
        history.read(Some(&other), true).unwrap();
        assert_eq!(lines(&history), ["make", "ls", "pwd"]);
        assert_eq!(history.file_record(Some(&other)), FileRecord::new(3, 3));
    }

    #[test]
    fn test_load_respects_max_size() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("history"), "1:a\n2:b\n3:c\n4:d\n").unwrap();

        let history = History::open(HistoryConfig { size: 2, ..config(&dir) }).unwrap();
        assert_eq!(lines(&history), ["c", "d"]);
        assert_eq!(history.first(), 2);
        assert_eq!(history.file_record(None), FileRecord::new(2, 4));
    }

    #[test]
    fn test_trim_backing_file_replaces_memory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history");
        fs::write(&path, "1:a\n2:b\n3:a\n4:c\n").unwrap();

        let mut history = History::open(config(&dir)).unwrap();
        history.trim(None, 10).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "2:b\n3:a\n4:c\n");
        assert_eq!(lines(&history), ["b", "a", "c"]);
        assert_eq!(history.first(), 1);
        assert_eq!(history.last(), Some(3));
        assert_eq!(history.file_record(None), FileRecord::new(3, 3));
    }

    #[test]
    fn test_trim_secondary_file_only_updates_count() {
        let dir = TempDir::new().unwrap();
        let other = dir.path().join("other");
        fs::write(&other, "1:x\n2:x\n3:y\n").unwrap();

        let mut history = History::new(config(&dir));
        history.add("untouched");
        history.trim(Some(&other), 10).unwrap();

        assert_eq!(fs::read_to_string(&other).unwrap(), "2:x\n3:y\n");
        assert_eq!(lines(&history), ["untouched"]);
        assert_eq!(history.file_record(Some(&other)).entries_in_file, 2);
    }

    #[test]
    fn test_trim_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("history"), "1:a\n2:a\n").unwrap();

        let mut history = History::open(config(&dir)).unwrap();
        history.trim(None, 5).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["history"]);
    }

    #[test]
    fn test_append_past_slack_triggers_trim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history");
        let config = HistoryConfig { file_size: 4, ignore_dups: false, ..config(&dir) };
        let mut history = History::new(config);

        // Threshold is 4 + 4 / 4 = 5 entries on disk
        for (i, line) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            history.add_at(ts(i as i64), line);
        }
        history.save().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 5);

        history.add_at(ts(10), "f");
        history.save().unwrap();

        let on_disk: Vec<String> =
            fs::read_to_string(&path).unwrap().lines().map(String::from).collect();
        assert_eq!(on_disk, ["2:c", "3:d", "4:e", "10:f"]);
        assert_eq!(lines(&history), ["c", "d", "e", "f"]);
        assert_eq!(history.file_record(None), FileRecord::new(4, 4));
    }

    #[test]
    fn test_purge_deletes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history");
        let mut history = History::new(config(&dir));
        history.add("a");
        history.save().unwrap();
        assert!(path.exists());

        history.purge().unwrap();
        assert!(history.is_empty());
        assert!(!path.exists());

        // Purging again is harmless
        history.purge().unwrap();
    }

    #[test]
    fn test_memory_only_history_persistence_is_noop() {
        let mut history = History::new(HistoryConfig::default());
        history.add("a");
        history.save().unwrap();
        history.load().unwrap();
        history.purge().unwrap();
        assert!(history.is_empty());
    }
}
