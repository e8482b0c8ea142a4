//! In-memory history with file synchronization and a browsing cursor.
//!
//! [`History`] ties together:
//!
//! - an [`EntryStore`] bounded by `config.size`
//! - a [`FileTracking`] map remembering, per file, how much is already on disk
//! - a [`Cursor`] for previous/next browsing
//!
//! Persistence lives in [`persistence`]; see [`History::load`],
//! [`History::save`] and [`History::trim`].
//!
//! # Example
//!
//! ```no_run
//! use line_history::{History, HistoryConfig};
//!
//! let config = HistoryConfig::default().with_file("~/.line_history");
//! let mut history = History::open(config)?;
//! history.add("cargo build");
//! history.previous();
//! assert_eq!(history.current(), "cargo build");
//! history.save()?;
//! # Ok::<(), line_history::HistoryError>(())
//! ```

pub mod cursor;
pub mod persistence;
pub mod store;
pub mod tracking;
pub mod trim;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::warn;

pub use cursor::Cursor;
pub use store::{AddOutcome, EntryStore};
pub use tracking::{FileRecord, FileTracking};

use crate::config::HistoryConfig;
use crate::error::Result;
use crate::filters::IgnorePatterns;
use crate::models::{Entry, EntryFactory, default_factory};

pub struct History {
    config: HistoryConfig,
    ignore: IgnorePatterns,
    path: Option<PathBuf>,
    store: EntryStore,
    cursor: Cursor,
    tracking: FileTracking,
}

impl History {
    pub fn new(config: HistoryConfig) -> Self {
        Self::with_entry_factory(config, default_factory())
    }

    pub fn with_entry_factory(config: HistoryConfig, factory: EntryFactory) -> Self {
        Self {
            ignore: config.ignore_patterns(),
            path: config.file.clone(),
            store: EntryStore::with_factory(config.size, factory),
            cursor: Cursor::default(),
            tracking: FileTracking::default(),
            config,
        }
    }

    /// Create a history and load its backing file
    pub fn open(config: HistoryConfig) -> Result<Self> {
        config.validate()?;
        let mut history = Self::new(config);
        history.load()?;
        Ok(history)
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Change the in-memory bound; takes effect immediately
    pub fn set_max_size(&mut self, size: usize) {
        self.config.size = size;
        self.store.set_max_size(size);
        self.maybe_resize();
    }

    /// Tracking record for a file (`None` means the backing file)
    pub fn file_record(&self, path: Option<&Path>) -> FileRecord {
        self.tracking.get(path.or(self.path.as_deref()))
    }

    /// Add a line typed by the user, applying the configured filters
    ///
    /// Returns whether the line was stored. In incremental mode the new entry
    /// is appended to the backing file right away; a failure there is logged
    /// and does not undo the add.
    pub fn add(&mut self, line: &str) -> bool {
        self.add_at(Utc::now(), line)
    }

    pub fn add_at(&mut self, timestamp: DateTime<Utc>, line: &str) -> bool {
        if self.config.disabled {
            return false;
        }
        if self.config.ignore_space && line.starts_with(' ') {
            return false;
        }
        let line = if self.config.reduce_blanks { line.trim() } else { line };
        if self.config.ignore_dups
            && self.store.iter().next_back().is_some_and(|last| last.line() == line)
        {
            return false;
        }
        if self.ignore.matches(line) {
            return false;
        }

        if !self.add_entry(timestamp, line, false) {
            return false;
        }

        if self.config.incremental
            && self.path.is_some()
            && let Err(e) = self.save()
        {
            warn!(error = %e, "failed to save history incrementally");
        }
        true
    }

    /// Store a line as-is, bypassing the add-time filters
    ///
    /// With `check_duplicates`, a line whose trimmed text matches any stored
    /// entry is dropped.
    pub fn add_entry(
        &mut self,
        timestamp: DateTime<Utc>,
        line: impl Into<String>,
        check_duplicates: bool,
    ) -> bool {
        let AddOutcome { added, evicted } = self.store.add(timestamp, line, check_duplicates);
        if added {
            self.after_resize(evicted);
        }
        added
    }

    fn maybe_resize(&mut self) {
        let evicted = self.store.evict_overflow();
        self.after_resize(evicted);
    }

    fn after_resize(&mut self, evicted: usize) {
        self.tracking.on_evicted(evicted);
        self.cursor.move_to_end(self.store.len());
    }

    /// Drop every entry and all file bookkeeping
    pub fn clear(&mut self) {
        self.store.clear();
        self.tracking.clear();
        self.cursor.move_to_end(0);
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn first(&self) -> usize {
        self.store.first()
    }

    pub fn last(&self) -> Option<usize> {
        self.store.last()
    }

    pub fn get(&self, index: usize) -> Result<&Entry> {
        self.store.get(index)
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &Entry> + ExactSizeIterator {
        self.store.iter()
    }

    pub fn entries_from(&self, index: usize) -> impl Iterator<Item = &Entry> {
        self.store.iter_from(index)
    }

    // Navigation

    /// Absolute index under the cursor (`first + len` at the blank end)
    pub fn index(&self) -> usize {
        self.store.first() + self.cursor.position()
    }

    /// Text under the cursor, empty at the blank end
    pub fn current(&self) -> &str {
        if self.cursor.is_at_end(self.store.len()) {
            return "";
        }
        self.store.at(self.cursor.position()).map(Entry::line).unwrap_or("")
    }

    pub fn move_to_first(&mut self) -> bool {
        self.cursor.move_to_first(self.store.len())
    }

    pub fn move_to_last(&mut self) -> bool {
        self.cursor.move_to_last(self.store.len())
    }

    pub fn move_to_end(&mut self) {
        self.cursor.move_to_end(self.store.len());
    }

    pub fn previous(&mut self) -> bool {
        self.cursor.previous()
    }

    pub fn next(&mut self) -> bool {
        self.cursor.next(self.store.len())
    }

    /// Move to an absolute index; false if it is not in memory
    pub fn move_to(&mut self, index: usize) -> bool {
        match self.store.position_of(index) {
            Some(position) => self.cursor.move_to_position(position, self.store.len()),
            None => false,
        }
    }

    /// Keep the cursor position unless it fell past the blank end
    pub fn reset_index(&mut self) {
        self.cursor.clamp(self.store.len());
    }
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("path", &self.path)
            .field("store", &self.store)
            .field("cursor", &self.cursor)
            .field("tracking", &self.tracking)
            .finish()
    }
}
