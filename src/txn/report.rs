//! Commit outcome reporting

use std::fmt;

use super::BatchStats;

/// What happened to one table's batch during commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
    /// Loaded, applied, and saved
    Applied(BatchStats),

    /// Table file did not exist; nothing applied, no file created
    Skipped,

    /// Load or save failed; the table is left as it was on disk
    Failed(String),
}

/// Per-table outcomes of a commit, in the order tables were processed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    pub tables: Vec<(String, TableOutcome)>,
}

impl CommitReport {
    /// Outcome for `table`, if it was part of the transaction
    pub fn outcome(&self, table: &str) -> Option<&TableOutcome> {
        self.tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, outcome)| outcome)
    }

    /// True when every table's batch was applied
    pub fn is_complete(&self) -> bool {
        self.tables
            .iter()
            .all(|(_, outcome)| matches!(outcome, TableOutcome::Applied(_)))
    }
}

impl fmt::Display for TableOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableOutcome::Applied(stats) => write!(
                f,
                "{} deleted, {} updated, {} inserted",
                stats.deleted, stats.updated, stats.inserted
            ),
            TableOutcome::Skipped => write!(f, "skipped, table does not exist"),
            TableOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}
