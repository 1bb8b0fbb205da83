//! Transaction buffer
//!
//! Pending operations grouped by table.

use std::collections::BTreeMap;

use crate::storage::{Fields, Record};

/// A buffered partial update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPatch {
    pub id: String,
    pub fields: Fields,
}

/// Counts of operations that actually matched when a batch was applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub deleted: usize,
    pub updated: usize,
    pub inserted: usize,
}

/// Pending operations for one table, each list kept in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableBatch {
    pub inserts: Vec<Record>,
    pub updates: Vec<RecordPatch>,
    pub deletes: Vec<String>,
}

impl TableBatch {
    /// Total number of buffered operations
    pub fn len(&self) -> usize {
        self.inserts.len() + self.updates.len() + self.deletes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply the batch to a freshly loaded record list
    ///
    /// Order is fixed: deletes, then updates, then inserts. Unmatched ids
    /// in deletes and updates are ignored.
    pub fn apply(self, records: &mut Vec<Record>) -> BatchStats {
        let mut stats = BatchStats::default();

        for id in &self.deletes {
            if let Some(index) = records.iter().position(|r| &r.id == id) {
                records.remove(index);
                stats.deleted += 1;
            }
        }

        for patch in &self.updates {
            if let Some(record) = records.iter_mut().find(|r| r.id == patch.id) {
                record.merge(&patch.fields);
                stats.updated += 1;
            }
        }

        stats.inserted = self.inserts.len();
        records.extend(self.inserts);

        stats
    }
}

/// Everything staged by one transaction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionBuffer {
    tables: BTreeMap<String, TableBatch>,
}

impl TransactionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a full record for insertion
    pub fn insert(&mut self, table: &str, record: Record) {
        self.batch_mut(table).inserts.push(record);
    }

    /// Stage a patch; the id is not checked until commit
    pub fn update(&mut self, table: &str, id: &str, fields: Fields) {
        self.batch_mut(table).updates.push(RecordPatch {
            id: id.to_string(),
            fields,
        });
    }

    /// Stage a delete; the id is not checked until commit
    pub fn delete(&mut self, table: &str, id: &str) {
        self.batch_mut(table).deletes.push(id.to_string());
    }

    /// Batch staged for `table`, if any
    pub fn batch(&self, table: &str) -> Option<&TableBatch> {
        self.tables.get(table)
    }

    /// Names of tables touched by this transaction
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Total number of buffered operations across all tables
    pub fn operation_count(&self) -> usize {
        self.tables.values().map(TableBatch::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Consume the buffer, yielding one batch per table
    pub fn into_batches(self) -> impl Iterator<Item = (String, TableBatch)> {
        self.tables.into_iter()
    }

    fn batch_mut(&mut self, table: &str) -> &mut TableBatch {
        self.tables.entry(table.to_string()).or_default()
    }
}
