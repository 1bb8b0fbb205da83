//! Transaction Module
//!
//! A single process-wide buffered transaction.
//!
//! ## Lifecycle
//! ```text
//!            start()
//!   Idle ───────────────▶ Active(buffer)
//!    ▲                        │
//!    │  commit() / rollback() │
//!    └────────────────────────┘
//! ```
//!
//! ## Commit semantics
//! Each table's batch is applied on its own: deletes → updates → inserts.
//! Tables are independent, so one table failing or being skipped does not
//! stop the rest. There is no cross-table atomicity.

mod buffer;
mod manager;
mod report;

pub use buffer::{BatchStats, RecordPatch, TableBatch, TransactionBuffer};
pub use manager::{TransactionManager, TransactionState};
pub use report::{CommitReport, TableOutcome};
