//! Lock Module
//!
//! Per-table mutual exclusion for read-modify-write cycles.
//!
//! ## Responsibilities
//! - Grant one holder at a time per table name
//! - Block (not spin) while a table is held
//! - Release on every exit path via RAII guards
//!
//! Each critical section holds exactly one table lock, so no lock ordering
//! is needed and deadlock is impossible. No fairness or timeout is offered.

mod manager;

pub use manager::{LockManager, TableGuard};
