//! Response definitions
//!
//! Results of executed commands, rendered as operator messages.

use std::fmt;

use crate::storage::Record;
use crate::txn::CommitReport;

/// A successful command result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    TableCreated { table: String },
    TableDropped { table: String },

    /// Record written directly to the table
    Inserted { table: String, id: String },
    Updated { table: String, id: String },
    Deleted { table: String, id: String },

    /// Mutation staged in the active transaction
    InsertStaged { table: String, id: String },
    UpdateStaged { table: String, id: String },
    DeleteStaged { table: String, id: String },

    /// Current contents of a table
    Records { table: String, records: Vec<Record> },

    TransactionStarted,
    Committed(CommitReport),
    RolledBack { discarded: usize },

    BackedUp { tables: usize },
    Restored { tables: usize },
    TableRestored { table: String },
}

impl Response {
    /// Id of the record an insert/update/delete touched or staged
    pub fn record_id(&self) -> Option<&str> {
        match self {
            Response::Inserted { id, .. }
            | Response::Updated { id, .. }
            | Response::Deleted { id, .. }
            | Response::InsertStaged { id, .. }
            | Response::UpdateStaged { id, .. }
            | Response::DeleteStaged { id, .. } => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::TableCreated { table } => write!(f, "Table \"{}\" created.", table),
            Response::TableDropped { table } => write!(f, "Table \"{}\" dropped.", table),
            Response::Inserted { table, id } => {
                write!(f, "Inserted record into table \"{}\" with id \"{}\".", table, id)
            }
            Response::Updated { table, id } => {
                write!(f, "Updated record with id \"{}\" in table \"{}\".", id, table)
            }
            Response::Deleted { table, id } => {
                write!(f, "Deleted record with id \"{}\" from table \"{}\".", id, table)
            }
            Response::InsertStaged { table, id } => write!(
                f,
                "Recorded insert into table \"{}\" with id \"{}\" in the transaction.",
                table, id
            ),
            Response::UpdateStaged { table, id } => write!(
                f,
                "Recorded update to record with id \"{}\" in table \"{}\" in the transaction.",
                id, table
            ),
            Response::DeleteStaged { table, id } => write!(
                f,
                "Recorded delete of record with id \"{}\" from table \"{}\" in the transaction.",
                id, table
            ),
            Response::Records { table, records } => {
                let json = serde_json::to_string_pretty(records).map_err(|_| fmt::Error)?;
                write!(f, "Contents of table \"{}\":\n{}", table, json)
            }
            Response::TransactionStarted => write!(f, "Transaction started."),
            Response::Committed(report) => {
                write!(f, "Transaction committed.")?;
                for (table, outcome) in &report.tables {
                    write!(f, "\n  {}: {}", table, outcome)?;
                }
                Ok(())
            }
            Response::RolledBack { discarded } => write!(
                f,
                "Transaction rolled back ({} operation(s) discarded).",
                discarded
            ),
            Response::BackedUp { tables } => {
                write!(f, "Database backed up ({} table(s)).", tables)
            }
            Response::Restored { tables } => {
                write!(f, "Database restored from backup ({} table(s)).", tables)
            }
            Response::TableRestored { table } => {
                write!(f, "Table \"{}\" restored from backup.", table)
            }
        }
    }
}
