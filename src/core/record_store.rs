//! Append-only transfer history
//!
//! This module provides the RecordStore component that keeps every committed
//! transfer record in append order.
//!
//! # Append-only
//!
//! The store exposes no way to remove or modify a record. Positions are stable
//! for the lifetime of the store, so `get(i)` returns the same record every
//! time it is called.

use crate::types::{Timestamp, TransferRecord};

/// Ordered history of transfer records
#[derive(Debug, Default)]
pub struct RecordStore {
    /// Records in append order
    records: Vec<TransferRecord>,
}

impl RecordStore {
    /// Create a new empty record store
    pub fn new() -> Self {
        RecordStore {
            records: Vec::new(),
        }
    }

    /// Append a record and return its position
    pub fn append(&mut self, record: TransferRecord) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Get a record by its append position
    ///
    /// # Returns
    ///
    /// * `Some(&TransferRecord)` - If a record exists at `index`
    /// * `None` - If `index` is past the end of the history
    pub fn get(&self, index: usize) -> Option<&TransferRecord> {
        self.records.get(index)
    }

    /// The whole history in append order
    pub fn all(&self) -> &[TransferRecord] {
        &self.records
    }

    /// A window of at most `limit` records starting at `start`
    ///
    /// Out-of-range windows are clamped; a `start` past the end yields an empty slice.
    pub fn page(&self, start: usize, limit: usize) -> &[TransferRecord] {
        let start = start.min(self.records.len());
        let end = start.saturating_add(limit).min(self.records.len());
        &self.records[start..end]
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// Timestamp of the most recent record, if any
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.records.last().map(|record| record.timestamp)
    }
}
