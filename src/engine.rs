//! Engine Module
//!
//! The table engine that coordinates all components.
//!
//! ## Responsibilities
//! - Route commands to the store, lock manager, and transaction manager
//! - Run locked read-modify-write cycles for direct mutations
//! - Stage mutations while a transaction is active
//! - Apply committed batches table by table
//! - Drive backup and restore

use std::path::Path;

use parking_lot::Mutex;

use crate::backup::BackupManager;
use crate::config::Config;
use crate::error::{Result, TableDbError};
use crate::lock::LockManager;
use crate::protocol::{Command, Response};
use crate::storage::{check_fields, Fields, Record, TableStore};
use crate::txn::{CommitReport, TableBatch, TableOutcome, TransactionManager};

/// The main table engine
///
/// ## Concurrency Model
///
/// - **Direct mutations** (insert/update/delete, create/drop, restore):
///   hold the table's lock for the whole load → apply → save cycle, so two
///   writers to one table never interleave. Different tables run in
///   parallel.
///
/// - **Reads**: lock-free. A read racing a save may see the previous
///   content or, because saves are not atomic, fail with `CorruptData`.
///
/// - **Transactions**: `transactions` is only locked long enough to check
///   or change state; it is never held across file I/O. Commit takes each
///   touched table's lock while applying that table's batch, so a commit
///   cannot lose a concurrent direct mutation's write.
///
/// Reads during a transaction see committed file content only, not the
/// transaction's own staged changes.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// File-per-table persistence
    store: TableStore,

    /// Per-table exclusion
    locks: LockManager,

    /// The single transaction slot
    transactions: Mutex<TransactionManager>,

    /// Snapshot mirroring
    backups: BackupManager,
}

impl Engine {
    /// Open or create an engine with the given config
    ///
    /// Creates the table directory if needed. The snapshot directory is
    /// created by the first backup.
    pub fn open(config: Config) -> Result<Self> {
        let store = TableStore::open(&config.data_dir)?;
        let backups = BackupManager::new(store.clone(), &config.backup_dir);

        tracing::debug!(
            data_dir = %config.data_dir.display(),
            backup_dir = %config.backup_dir.display(),
            "engine opened"
        );

        Ok(Self {
            config,
            store,
            locks: LockManager::new(),
            transactions: Mutex::new(TransactionManager::new()),
            backups,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses the default config with tables in `path` and snapshots in
    /// `path/backup`.
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .data_dir(path)
            .backup_dir(path.join("backup"))
            .build();
        Self::open(config)
    }

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers
    pub fn execute(&self, command: Command) -> Result<Response> {
        match command {
            Command::CreateTable { table } => {
                self.create_table(&table)?;
                Ok(Response::TableCreated { table })
            }
            Command::DropTable { table } => {
                self.drop_table(&table)?;
                Ok(Response::TableDropped { table })
            }
            Command::Insert { table, fields } => self.insert(&table, fields),
            Command::Update { table, id, fields } => self.update(&table, &id, fields),
            Command::Delete { table, id } => self.delete(&table, &id),
            Command::Read { table } => {
                let records = self.read(&table)?;
                Ok(Response::Records { table, records })
            }
            Command::StartTransaction => {
                self.start_transaction()?;
                Ok(Response::TransactionStarted)
            }
            Command::CommitTransaction => Ok(Response::Committed(self.commit_transaction()?)),
            Command::RollbackTransaction => Ok(Response::RolledBack {
                discarded: self.rollback_transaction()?,
            }),
            Command::BackupDb => Ok(Response::BackedUp {
                tables: self.backup()?,
            }),
            Command::RestoreDb => Ok(Response::Restored {
                tables: self.restore()?,
            }),
            Command::RestorePart { table } => {
                self.restore_table(&table)?;
                Ok(Response::TableRestored { table })
            }
        }
    }

    // =========================================================================
    // Table Lifecycle
    // =========================================================================

    /// Create an empty table
    pub fn create_table(&self, table: &str) -> Result<()> {
        let _guard = self.locks.acquire(table);
        self.store.create_table(table)?;

        tracing::info!(table, "table created");
        Ok(())
    }

    /// Delete a table's file
    pub fn drop_table(&self, table: &str) -> Result<()> {
        let _guard = self.locks.acquire(table);
        self.store.drop_table(table)?;

        tracing::info!(table, "table dropped");
        Ok(())
    }

    /// Current records of a table (lock-free)
    pub fn read(&self, table: &str) -> Result<Vec<Record>> {
        self.store.load(table)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Insert a record with a fresh id
    ///
    /// Staged if a transaction is active, otherwise written immediately.
    pub fn insert(&self, table: &str, fields: Fields) -> Result<Response> {
        check_fields(&fields)?;
        {
            let mut txn = self.transactions.lock();
            if txn.is_active() {
                let record = txn.buffer_insert(table, fields)?;
                return Ok(Response::InsertStaged {
                    table: table.to_string(),
                    id: record.id,
                });
            }
        }

        let record = Record::new(fields);
        let id = record.id.clone();

        let _guard = self.locks.acquire(table);
        let mut records = self.store.load(table)?;
        records.push(record);
        self.store.save(table, &records)?;

        Ok(Response::Inserted {
            table: table.to_string(),
            id,
        })
    }

    /// Merge `fields` into the record with `id`
    ///
    /// Staged (without an existence check) if a transaction is active.
    pub fn update(&self, table: &str, id: &str, fields: Fields) -> Result<Response> {
        check_fields(&fields)?;
        {
            let mut txn = self.transactions.lock();
            if txn.is_active() {
                txn.buffer_update(table, id, fields)?;
                return Ok(Response::UpdateStaged {
                    table: table.to_string(),
                    id: id.to_string(),
                });
            }
        }

        let _guard = self.locks.acquire(table);
        let mut records = self.store.load(table)?;

        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Self::record_not_found(table, id))?;
        record.merge(&fields);

        self.store.save(table, &records)?;

        Ok(Response::Updated {
            table: table.to_string(),
            id: id.to_string(),
        })
    }

    /// Remove the record with `id`
    ///
    /// Staged (without an existence check) if a transaction is active.
    pub fn delete(&self, table: &str, id: &str) -> Result<Response> {
        {
            let mut txn = self.transactions.lock();
            if txn.is_active() {
                txn.buffer_delete(table, id)?;
                return Ok(Response::DeleteStaged {
                    table: table.to_string(),
                    id: id.to_string(),
                });
            }
        }

        let _guard = self.locks.acquire(table);
        let mut records = self.store.load(table)?;

        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Self::record_not_found(table, id))?;
        records.remove(index);

        self.store.save(table, &records)?;

        Ok(Response::Deleted {
            table: table.to_string(),
            id: id.to_string(),
        })
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Begin buffering mutations
    pub fn start_transaction(&self) -> Result<()> {
        self.transactions.lock().start()?;
        tracing::debug!("transaction started");
        Ok(())
    }

    /// Apply every staged batch, one table at a time
    ///
    /// Per-table failures and skips are reported in the returned
    /// [`CommitReport`] instead of aborting the commit. The transaction is
    /// finished afterwards whatever the outcomes.
    pub fn commit_transaction(&self) -> Result<CommitReport> {
        let buffer = self.transactions.lock().take_for_commit()?;

        let mut report = CommitReport::default();
        for (table, batch) in buffer.into_batches() {
            let outcome = self.commit_table(&table, batch);

            match &outcome {
                TableOutcome::Applied(stats) => {
                    tracing::debug!(table = %table, ?stats, "batch applied");
                }
                TableOutcome::Skipped => {
                    tracing::warn!(table = %table, "table does not exist, batch skipped");
                }
                TableOutcome::Failed(reason) => {
                    tracing::warn!(table = %table, %reason, "batch failed");
                }
            }

            report.tables.push((table, outcome));
        }

        tracing::info!(tables = report.tables.len(), "transaction committed");
        Ok(report)
    }

    /// Discard staged mutations, returning how many were dropped
    pub fn rollback_transaction(&self) -> Result<usize> {
        let discarded = self.transactions.lock().rollback()?;
        tracing::debug!(discarded, "transaction rolled back");
        Ok(discarded)
    }

    /// Check whether a transaction is in progress
    pub fn in_transaction(&self) -> bool {
        self.transactions.lock().is_active()
    }

    /// Number of operations staged in the active transaction
    pub fn staged_operations(&self) -> usize {
        self.transactions
            .lock()
            .buffer()
            .map(|buffer| buffer.operation_count())
            .unwrap_or(0)
    }

    /// Apply one table's batch under its lock
    fn commit_table(&self, table: &str, batch: TableBatch) -> TableOutcome {
        let _guard = self.locks.acquire(table);

        if !self.store.exists(table) {
            return TableOutcome::Skipped;
        }

        let mut records = match self.store.load(table) {
            Ok(records) => records,
            Err(e) => return TableOutcome::Failed(e.to_string()),
        };

        let stats = batch.apply(&mut records);

        match self.store.save(table, &records) {
            Ok(()) => TableOutcome::Applied(stats),
            Err(e) => TableOutcome::Failed(e.to_string()),
        }
    }

    // =========================================================================
    // Backup / Restore
    // =========================================================================

    /// Copy every table into the snapshot directory
    pub fn backup(&self) -> Result<usize> {
        self.backups.backup_all(&self.locks)
    }

    /// Copy every snapshot back over the table directory
    pub fn restore(&self) -> Result<usize> {
        self.backups.restore_all(&self.locks)
    }

    /// Restore one table from its snapshot
    pub fn restore_table(&self, table: &str) -> Result<()> {
        self.backups.restore_table(&self.locks, table)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the table directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the snapshot directory path
    pub fn backup_dir(&self) -> &Path {
        self.backups.backup_dir()
    }

    /// Get the persistence layer
    pub fn store(&self) -> &TableStore {
        &self.store
    }

    /// Get the lock manager
    pub fn locks(&self) -> &LockManager {
        &self.locks
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn record_not_found(table: &str, id: &str) -> TableDbError {
        TableDbError::RecordNotFound {
            table: table.to_string(),
            id: id.to_string(),
        }
    }
}
