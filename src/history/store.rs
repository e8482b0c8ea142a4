use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::error::{HistoryError, Result};
use crate::models::{Entry, EntryFactory, default_factory};

/// Result of [`EntryStore::add`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    /// False when the line was rejected as a duplicate
    pub added: bool,
    /// Entries evicted from the front to stay within the size bound
    pub evicted: usize,
}

/// Bounded, ordered sequence of entries addressed by absolute index.
///
/// Invariant: for the entry at position `p`, `entry.index() == offset + p`.
pub struct EntryStore {
    entries: VecDeque<Entry>,
    offset: usize,
    max_size: usize,
    factory: EntryFactory,
}

impl EntryStore {
    pub fn new(max_size: usize) -> Self {
        Self::with_factory(max_size, default_factory())
    }

    pub fn with_factory(max_size: usize, factory: EntryFactory) -> Self {
        Self { entries: VecDeque::new(), offset: 0, max_size, factory }
    }

    /// Append a line as the newest entry
    ///
    /// With `check_duplicates`, the line is dropped if any stored entry has the
    /// same trimmed text. The size bound is enforced afterwards.
    pub fn add(
        &mut self,
        timestamp: DateTime<Utc>,
        line: impl Into<String>,
        check_duplicates: bool,
    ) -> AddOutcome {
        if !self.push(timestamp, line, check_duplicates) {
            return AddOutcome { added: false, evicted: 0 };
        }
        AddOutcome { added: true, evicted: self.evict_overflow() }
    }

    /// Like [`add`](Self::add) but leaves the size bound to the caller
    pub(crate) fn push(
        &mut self,
        timestamp: DateTime<Utc>,
        line: impl Into<String>,
        check_duplicates: bool,
    ) -> bool {
        let line = line.into();
        if check_duplicates && self.contains_trimmed(&line) {
            return false;
        }

        let entry = (self.factory)(self.offset + self.entries.len(), timestamp, line);
        self.entries.push_back(entry);
        true
    }

    /// Drop entries from the front until the size bound holds; returns how many
    pub fn evict_overflow(&mut self) -> usize {
        let mut evicted = 0;
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
            self.offset += 1;
            evicted += 1;
        }
        evicted
    }

    fn contains_trimmed(&self, line: &str) -> bool {
        let line = line.trim();
        self.entries.iter().any(|entry| entry.line().trim() == line)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.offset = 0;
    }

    /// Replace the whole content; entries are renumbered from `offset`
    pub(crate) fn replace(&mut self, offset: usize, entries: Vec<Entry>) {
        self.offset = offset;
        self.entries = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| entry.reindexed(offset + position))
            .collect();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Absolute index of the oldest entry in memory
    pub fn first(&self) -> usize {
        self.offset
    }

    /// Absolute index of the newest entry, if any
    pub fn last(&self) -> Option<usize> {
        if self.entries.is_empty() { None } else { Some(self.offset + self.entries.len() - 1) }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub(crate) fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
    }

    pub(crate) fn factory(&self) -> &EntryFactory {
        &self.factory
    }

    /// Entry at an absolute index
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::OutOfRange`] when the index is outside
    /// `[first, first + len)`.
    pub fn get(&self, index: usize) -> Result<&Entry> {
        self.position_of(index).and_then(|position| self.entries.get(position)).ok_or(
            HistoryError::OutOfRange { index, first: self.offset, len: self.entries.len() },
        )
    }

    /// Entry at a position relative to the live window
    pub(crate) fn at(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }

    /// Relative position of an absolute index, if it is live
    pub fn position_of(&self, index: usize) -> Option<usize> {
        index.checked_sub(self.offset).filter(|position| *position < self.entries.len())
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Entry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Iterate from an absolute index to the newest entry
    ///
    /// Indices before the live window start at the oldest entry.
    pub fn iter_from(&self, index: usize) -> impl Iterator<Item = &Entry> {
        self.entries.iter().skip(index.saturating_sub(self.offset))
    }
}

impl std::fmt::Debug for EntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryStore")
            .field("offset", &self.offset)
            .field("len", &self.entries.len())
            .field("max_size", &self.max_size)
            .finish()
    }
}
