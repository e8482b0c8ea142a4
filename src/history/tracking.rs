use std::collections::HashMap;
use std::path::Path;

use crate::utils::tracking_key;

/// Bookkeeping for one history file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileRecord {
    /// Position in the live window up to which entries are already on disk
    pub last_loaded: usize,
    /// Entries believed to be in the file
    pub entries_in_file: usize,
}

impl FileRecord {
    pub fn new(last_loaded: usize, entries_in_file: usize) -> Self {
        Self { last_loaded, entries_in_file }
    }
}

/// Per-file records, keyed by absolute path
#[derive(Debug, Clone, Default)]
pub struct FileTracking {
    records: HashMap<String, FileRecord>,
}

impl FileTracking {
    /// Record for `path`, zeroed if the file was never seen
    pub fn get(&self, path: Option<&Path>) -> FileRecord {
        self.records.get(&tracking_key(path)).copied().unwrap_or_default()
    }

    pub fn get_mut(&mut self, path: Option<&Path>) -> &mut FileRecord {
        self.records.entry(tracking_key(path)).or_default()
    }

    pub fn set(&mut self, path: Option<&Path>, record: FileRecord) {
        self.records.insert(tracking_key(path), record);
    }

    /// Eviction shifts the live window for every file alike
    pub fn on_evicted(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        for record in self.records.values_mut() {
            record.last_loaded = record.last_loaded.saturating_sub(count);
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
