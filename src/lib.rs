//! # TableDB
//!
//! A minimal file-backed record store with:
//! - One JSON file per table of string-valued records
//! - Per-table locking for read-modify-write cycles
//! - A single buffered transaction with per-table commit
//! - Snapshot backup and restore
//! - A line-oriented command shell and a read-only HTTP query service
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────┐
//! │    Command Shell     │        │  HTTP Query Service  │
//! │   (line commands)    │        │ (GET /records/:name) │
//! └──────────┬───────────┘        └──────────┬───────────┘
//!            │                               │ lock-free reads
//! ┌──────────▼───────────┐                   │
//! │        Engine        │                   │
//! └──┬───────┬────────┬──┘                   │
//!    │       │        │                      │
//!    ▼       ▼        ▼                      │
//! ┌──────┐ ┌──────┐ ┌──────────┐             │
//! │ Txn  │ │Locks │ │  Backup  │             │
//! └──┬───┘ └──┬───┘ └────┬─────┘             │
//!    │        │          │                   │
//!    ▼        ▼          ▼                   ▼
//! ┌────────────────────────────────────────────────────────┐
//! │             TableStore  (<data_dir>/<table>.json)      │
//! └────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod backup;
pub mod engine;
pub mod lock;
pub mod network;
pub mod protocol;
pub mod shell;
pub mod storage;
pub mod txn;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::Config;
pub use engine::Engine;
pub use error::{Result, TableDbError};
pub use shell::Shell;
pub use storage::{Fields, Record};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of TableDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
