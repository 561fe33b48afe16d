//! Merging of per-manager, per-query results into one de-duplicated list.

use crate::core::types::PackageRecord;
use std::collections::HashSet;

/// First-seen-wins accumulator keyed by `manager:identifier`.
#[derive(Debug, Default)]
pub struct Aggregator {
    seen: HashSet<String>,
    records: Vec<PackageRecord>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one record; returns false when it was a duplicate and dropped.
    pub fn push(&mut self, record: PackageRecord) -> bool {
        if !self.seen.insert(record.key()) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn extend<I: IntoIterator<Item = PackageRecord>>(&mut self, records: I) {
        for record in records {
            self.push(record);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn finish(self) -> Vec<PackageRecord> {
        self.records
    }
}

/// Merge batches in order; batch order decides which duplicate survives.
pub fn merge<I>(batches: I) -> Vec<PackageRecord>
where
    I: IntoIterator<Item = Vec<PackageRecord>>,
{
    let mut aggregator = Aggregator::new();
    for batch in batches {
        aggregator.extend(batch);
    }
    aggregator.finish()
}
