use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of history.
///
/// `index` is the absolute position assigned when the entry was created. It
/// stays stable while older entries are evicted from the front of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    index: usize,
    timestamp: DateTime<Utc>,
    line: String,
}

impl Entry {
    pub fn new(index: usize, timestamp: DateTime<Utc>, line: impl Into<String>) -> Self {
        Self { index, timestamp, line: line.into() }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    /// Copy of this entry under a different absolute index
    pub(crate) fn reindexed(&self, index: usize) -> Self {
        Self { index, timestamp: self.timestamp, line: self.line.clone() }
    }
}

/// Builds entries from `(index, timestamp, line)`.
///
/// The store never calls `Entry::new` directly so callers can normalize or
/// decorate entries without replacing the store.
pub type EntryFactory = Arc<dyn Fn(usize, DateTime<Utc>, String) -> Entry + Send + Sync>;

pub fn default_factory() -> EntryFactory {
    Arc::new(|index, timestamp, line| Entry::new(index, timestamp, line))
}
