//! Table Store
//!
//! Loads and saves whole tables.
//!
//! ## Responsibilities
//! - Create the table directory on startup
//! - Parse table files into record sequences
//! - Rewrite a table file in its entirety on save
//! - Create and drop table files

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{Result, TableDbError};

use super::path::{table_name, table_path};
use super::record::{Record, TableFile, TableFileRef};

/// Persistence engine for tables
///
/// Holds no in-memory state besides the directory: every `load` reads the
/// latest file content and every `save` replaces it. Callers doing
/// read-modify-write must load immediately before saving, under the table's
/// lock, or concurrent changes are silently discarded.
#[derive(Debug, Clone)]
pub struct TableStore {
    /// Directory where table files are stored
    dir: PathBuf,
}

impl TableStore {
    /// Open or create a store in the given directory
    pub fn open(path: &Path) -> Result<Self> {
        fs::create_dir_all(path)?;

        Ok(Self {
            dir: path.to_path_buf(),
        })
    }

    /// Load a table's records
    ///
    /// Returns:
    /// - `Err(TableNotFound)`: no file for this table
    /// - `Err(CorruptData)`: file is not `{ "records": [...] }` of string records
    pub fn load(&self, table: &str) -> Result<Vec<Record>> {
        let path = self.path(table);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(TableDbError::TableNotFound(table.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let file: TableFile =
            serde_json::from_str(&content).map_err(|e| TableDbError::CorruptData {
                table: table.to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(table, records = file.records.len(), "loaded table");
        Ok(file.records)
    }

    /// Save a table's records, replacing the whole file
    ///
    /// Not atomic: a crash mid-write can leave a truncated file.
    pub fn save(&self, table: &str, records: &[Record]) -> Result<()> {
        let json = serde_json::to_string_pretty(&TableFileRef { records })
            .map_err(std::io::Error::from)?;

        fs::write(self.path(table), json)?;

        tracing::debug!(table, records = records.len(), "saved table");
        Ok(())
    }

    /// Create an empty table
    ///
    /// The empty container is written to a staging file first and then
    /// hard-linked into place, so the table file never exists without
    /// content and two racing creates cannot both succeed.
    pub fn create_table(&self, table: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(&TableFile::default())
            .map_err(std::io::Error::from)?;

        let staging = self.dir.join(format!(".{}.{}.tmp", table, Uuid::new_v4()));
        let linked =
            fs::write(&staging, json).and_then(|()| fs::hard_link(&staging, self.path(table)));

        if let Err(e) = fs::remove_file(&staging) {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!(
                    path = %staging.display(),
                    error = %e,
                    "failed to remove staging file"
                );
            }
        }

        match linked {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(TableDbError::AlreadyExists(table.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a table's file
    pub fn drop_table(&self, table: &str) -> Result<()> {
        match fs::remove_file(self.path(table)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(TableDbError::TableNotFound(table.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether a table file exists
    pub fn exists(&self, table: &str) -> bool {
        self.path(table).is_file()
    }

    /// Names of all tables in the directory, sorted
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let mut tables = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
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

    /// File path for a table
    pub fn path(&self, table: &str) -> PathBuf {
        table_path(&self.dir, table)
    }

    /// Get the table directory path
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
