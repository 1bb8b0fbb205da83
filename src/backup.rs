//! Backup Module
//!
//! Mirrors table files into a snapshot directory and back.
//!
//! ## Responsibilities
//! - `backup_all`: copy every table file into the snapshot directory
//! - `restore_all`: copy every snapshot file over the table directory
//! - `restore_table`: copy one snapshot file back
//!
//! Each file copy holds that table's lock, so a copy never observes a
//! half-finished save from the locked mutation path. Tables that exist only
//! in the table directory are left alone by a restore.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, TableDbError};
use crate::lock::LockManager;
use crate::storage::{table_name, table_path, TableStore};

/// Copies table files between the store and a snapshot directory
#[derive(Debug, Clone)]
pub struct BackupManager {
    store: TableStore,
    backup_dir: PathBuf,
}

impl BackupManager {
    pub fn new(store: TableStore, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            backup_dir: backup_dir.into(),
        }
    }

    /// Copy every table into the snapshot directory, overwriting old copies
    ///
    /// Returns the number of tables copied.
    pub fn backup_all(&self, locks: &LockManager) -> Result<usize> {
        fs::create_dir_all(&self.backup_dir)?;

        let mut copied = 0;
        for table in self.store.list_tables()? {
            let _guard = locks.acquire(&table);

            match fs::copy(self.store.path(&table), self.snapshot_path(&table)) {
                Ok(_) => copied += 1,
                // Dropped between listing and locking
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!(table = %table, "table vanished during backup");
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!(tables = copied, dir = %self.backup_dir.display(), "database backed up");
        Ok(copied)
    }

    /// Copy every snapshot file back over the table directory
    ///
    /// Returns the number of tables restored.
    pub fn restore_all(&self, locks: &LockManager) -> Result<usize> {
        if !self.backup_dir.is_dir() {
            return Err(TableDbError::BackupNotFound("the database".to_string()));
        }

        let mut restored = 0;
        for table in self.snapshot_tables()? {
            let _guard = locks.acquire(&table);
            fs::copy(self.snapshot_path(&table), self.store.path(&table))?;
            restored += 1;
        }

        tracing::info!(tables = restored, "database restored from backup");
        Ok(restored)
    }

    /// Restore a single table from its snapshot
    pub fn restore_table(&self, locks: &LockManager, table: &str) -> Result<()> {
        let snapshot = self.snapshot_path(table);
        if !snapshot.is_file() {
            return Err(TableDbError::BackupNotFound(format!("table \"{}\"", table)));
        }

        let _guard = locks.acquire(table);
        fs::copy(&snapshot, self.store.path(table))?;

        tracing::info!(table, "table restored from backup");
        Ok(())
    }

    /// Names of tables present in the snapshot directory, sorted
    pub fn snapshot_tables(&self) -> Result<Vec<String>> {
        let mut tables = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)? {
            let path = entry?.path();
            if path.is_file() {
                if let Some(name) = table_name(&path) {
                    tables.push(name);
                }
            }
        }

        tables.sort();
        Ok(tables)
    }

    /// Snapshot file path for a table
    pub fn snapshot_path(&self, table: &str) -> PathBuf {
        table_path(&self.backup_dir, table)
    }

    /// Get the snapshot directory path
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }
}
