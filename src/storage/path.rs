//! Table path resolution
//!
//! Maps table names to files and back. No validation of name contents:
//! callers must supply filesystem-safe names.

use std::path::{Path, PathBuf};

/// Extension of every table file
pub const TABLE_EXTENSION: &str = "json";

/// Generate the file path for a table
/// ("users", "/data") → "/data/users.json"
pub fn table_path(dir: &Path, table: &str) -> PathBuf {
    dir.join(format!("{}.{}", table, TABLE_EXTENSION))
}

/// Parse a table name from a file path
/// "/data/users.json" → Some("users")
pub fn table_name(path: &Path) -> Option<String> {
    if path.extension()? != TABLE_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    Some(stem.to_string())
}
