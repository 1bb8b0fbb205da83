//! Network Module
//!
//! Read-only HTTP query service over the table directory.
//!
//! ## Endpoints
//! - `GET /records/:table` → 200 with the record array
//!   - 404 `{"error": "Table \"<table>\" not found"}` if the file is absent
//!   - 500 `{"error": "Internal Server Error"}` on parse or I/O failure
//!
//! The service reads files directly and takes no table locks.

mod handler;
mod server;

pub use handler::{get_records, ApiError, ErrorResponse};
pub use server::{router, Server};
