//! Command definitions
//!
//! Represents commands typed by the operator.

use crate::storage::Fields;

/// Command types, keyed by their line keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    CreateTable,
    DropTable,
    Insert,
    Update,
    Delete,
    Read,
    StartTransaction,
    CommitTransaction,
    RollbackTransaction,
    BackupDb,
    RestoreDb,
    RestorePart,
}

impl CommandType {
    /// Every command, in help order
    pub const ALL: [CommandType; 12] = [
        CommandType::CreateTable,
        CommandType::DropTable,
        CommandType::Insert,
        CommandType::Update,
        CommandType::Delete,
        CommandType::Read,
        CommandType::StartTransaction,
        CommandType::CommitTransaction,
        CommandType::RollbackTransaction,
        CommandType::BackupDb,
        CommandType::RestoreDb,
        CommandType::RestorePart,
    ];

    /// Keyword as typed on the command line
    pub fn keyword(&self) -> &'static str {
        match self {
            CommandType::CreateTable => "createTable",
            CommandType::DropTable => "dropTable",
            CommandType::Insert => "insert",
            CommandType::Update => "update",
            CommandType::Delete => "delete",
            CommandType::Read => "read",
            CommandType::StartTransaction => "startTransaction",
            CommandType::CommitTransaction => "commitTransaction",
            CommandType::RollbackTransaction => "rollbackTransaction",
            CommandType::BackupDb => "backupDB",
            CommandType::RestoreDb => "restoreDB",
            CommandType::RestorePart => "restorePart",
        }
    }

    /// Argument synopsis for usage messages
    pub fn usage(&self) -> &'static str {
        match self {
            CommandType::CreateTable | CommandType::DropTable | CommandType::Read => "<table>",
            CommandType::Insert => "<table> key=value...",
            CommandType::Update => "<table> <id> key=value...",
            CommandType::Delete => "<table> <id>",
            CommandType::RestorePart => "<table>",
            _ => "",
        }
    }

    /// Look up a command by keyword (case-sensitive)
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.keyword() == keyword)
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an empty table
    CreateTable { table: String },

    /// Delete a table's file
    DropTable { table: String },

    /// Insert a record (buffered while a transaction is active)
    Insert { table: String, fields: Fields },

    /// Patch a record by id (buffered while a transaction is active)
    Update {
        table: String,
        id: String,
        fields: Fields,
    },

    /// Remove a record by id (buffered while a transaction is active)
    Delete { table: String, id: String },

    /// Print a table's records
    Read { table: String },

    StartTransaction,
    CommitTransaction,
    RollbackTransaction,

    /// Copy every table file into the snapshot directory
    BackupDb,

    /// Copy every snapshot file back over the table directory
    RestoreDb,

    /// Restore a single table from its snapshot
    RestorePart { table: String },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::CreateTable { .. } => CommandType::CreateTable,
            Command::DropTable { .. } => CommandType::DropTable,
            Command::Insert { .. } => CommandType::Insert,
            Command::Update { .. } => CommandType::Update,
            Command::Delete { .. } => CommandType::Delete,
            Command::Read { .. } => CommandType::Read,
            Command::StartTransaction => CommandType::StartTransaction,
            Command::CommitTransaction => CommandType::CommitTransaction,
            Command::RollbackTransaction => CommandType::RollbackTransaction,
            Command::BackupDb => CommandType::BackupDb,
            Command::RestoreDb => CommandType::RestoreDb,
            Command::RestorePart { .. } => CommandType::RestorePart,
        }
    }
}
