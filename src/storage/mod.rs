//! Storage Module
//!
//! File-per-table persistence.
//!
//! ## Responsibilities
//! - Resolve table names to files
//! - Load and save whole tables
//! - Create and drop tables
//!
//! ## File Format
//! ```text
//! <data_dir>/<table>.json
//! {
//!   "records": [
//!     { "id": "6f1c...", "name": "alice", "age": "30" },
//!     ...
//!   ]
//! }
//! ```
//!
//! All field values are strings. Saves rewrite the whole file, which is fine
//! for small tables but is neither fast for large ones nor crash-safe.

mod path;
mod record;
mod store;

pub use path::{table_name, table_path, TABLE_EXTENSION};
pub use record::{check_fields, Fields, Record, ID_FIELD};
pub use store::TableStore;
