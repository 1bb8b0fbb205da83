//! Error types for TableDB
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using TableDbError
pub type Result<T> = std::result::Result<T, TableDbError>;

/// Unified error type for TableDB operations
#[derive(Debug, Error)]
pub enum TableDbError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Table \"{0}\" not found")]
    TableNotFound(String),

    #[error("Record with id \"{id}\" not found in table \"{table}\"")]
    RecordNotFound { table: String, id: String },

    #[error("No backup found for {0}")]
    BackupNotFound(String),

    #[error("Table \"{0}\" already exists")]
    AlreadyExists(String),

    // -------------------------------------------------------------------------
    // Data Errors
    // -------------------------------------------------------------------------
    #[error("Table \"{table}\" is corrupt: {reason}")]
    CorruptData { table: String, reason: String },

    // -------------------------------------------------------------------------
    // Operator Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    User(String),

    #[error("{0}")]
    TransactionState(String),
}

impl TableDbError {
    /// True for the "missing table / record / snapshot" family
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TableDbError::TableNotFound(_)
                | TableDbError::RecordNotFound { .. }
                | TableDbError::BackupNotFound(_)
        )
    }
}
