//! Lock Manager implementation
//!
//! Held-set guarded by a Mutex, waiters parked on a Condvar.

use std::collections::HashSet;

use parking_lot::{Condvar, Mutex};

/// Per-table exclusive locks
///
/// A table's lock comes into existence the first time it is acquired and
/// disappears from the held-set on release; nothing is pre-declared.
#[derive(Debug, Default)]
pub struct LockManager {
    /// Names of tables currently held
    held: Mutex<HashSet<String>>,

    /// Signalled whenever any table is released
    released: Condvar,
}

impl LockManager {
    /// Create a lock manager with no held tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until `table` is free, then hold it
    ///
    /// The lock is released when the returned guard drops, on every exit
    /// path of the caller.
    pub fn acquire(&self, table: &str) -> TableGuard<'_> {
        let mut held = self.held.lock();
        while held.contains(table) {
            self.released.wait(&mut held);
        }
        held.insert(table.to_string());

        tracing::trace!(table, "table lock acquired");
        TableGuard {
            manager: self,
            table: table.to_string(),
        }
    }

    /// Hold `table` only if it is free right now
    pub fn try_acquire(&self, table: &str) -> Option<TableGuard<'_>> {
        let mut held = self.held.lock();
        if !held.insert(table.to_string()) {
            return None;
        }

        Some(TableGuard {
            manager: self,
            table: table.to_string(),
        })
    }

    /// Check whether `table` is currently held
    pub fn is_locked(&self, table: &str) -> bool {
        self.held.lock().contains(table)
    }

    /// Number of tables currently held
    pub fn held_count(&self) -> usize {
        self.held.lock().len()
    }

    fn release(&self, table: &str) {
        self.held.lock().remove(table);
        // Waiters for other tables wake too and go back to sleep.
        self.released.notify_all();
        tracing::trace!(table, "table lock released");
    }
}

/// Scoped hold on one table's lock
#[must_use = "the table is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct TableGuard<'a> {
    manager: &'a LockManager,
    table: String,
}

impl TableGuard<'_> {
    /// Name of the held table
    pub fn table(&self) -> &str {
        &self.table
    }
}

impl Drop for TableGuard<'_> {
    fn drop(&mut self) {
        self.manager.release(&self.table);
    }
}
