use std::collections::HashSet;

use crate::{DisplayItemId, Location, RecordKey};

/// Per-run bookkeeping owned by the record walk. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    records: HashSet<RecordKey>,
    entry_ids: HashSet<DisplayItemId>,
    processed: usize,
    max_records: usize,
}

impl SessionContext {
    pub fn new(max_records: usize) -> Self {
        Self {
            records: HashSet::new(),
            entry_ids: HashSet::new(),
            processed: 0,
            max_records,
        }
    }

    /// True when either the record key or the entry display id was handled.
    pub fn is_processed(&self, location: &Location) -> bool {
        self.records.contains(&location.record) || self.entry_ids.contains(&location.display_id)
    }

    /// Marks the record handled; returns its 1-based ordinal in this run.
    pub fn mark_processed(&mut self, location: &Location) -> usize {
        self.records.insert(location.record.clone());
        self.entry_ids.insert(location.display_id);
        self.processed += 1;
        self.processed
    }

    pub fn has_capacity(&self) -> bool {
        self.processed < self.max_records
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn max_records(&self) -> usize {
        self.max_records
    }
}
