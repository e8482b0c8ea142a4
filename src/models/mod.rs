//! Data models for the history engine.
//!
//! - [`Entry`] - one indexed, timestamped history line
//! - [`EntryFactory`] - injectable constructor used wherever entries are created

pub mod entry;

pub use entry::{Entry, EntryFactory, default_factory};
