//! Protocol Module
//!
//! Defines the line-oriented command language.
//!
//! ## Commands
//! ```text
//! createTable <table>
//! dropTable <table>
//! insert <table> key=value...
//! update <table> <id> key=value...
//! delete <table> <id>
//! read <table>
//! startTransaction
//! commitTransaction
//! rollbackTransaction
//! backupDB
//! restoreDB
//! restorePart <table>
//! ```
//!
//! ## Responses
//! Every command yields either a [`Response`] (printed via `Display`) or a
//! `TableDbError` (printed as `Error: <message>`).

mod command;
mod parser;
mod response;

pub use command::{Command, CommandType};
pub use parser::{parse_command, parse_fields, FIELD_SEPARATOR};
pub use response::Response;
