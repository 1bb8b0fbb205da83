//! Command line parser
//!
//! Turns one input line into a [`Command`].
//!
//! ## Line Format
//! ```text
//! <keyword> [<table> [<id>]] [key=value ...]
//! ```
//! Tokens are separated by any run of whitespace. Field values are plain
//! strings: they cannot contain whitespace or a second `=`.

use std::str::SplitWhitespace;

use crate::error::{Result, TableDbError};
use crate::storage::{check_fields, Fields};

use super::{Command, CommandType};

/// Separator between a field's key and value
pub const FIELD_SEPARATOR: char = '=';

/// Parse a command line
///
/// Returns `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut tokens = line.split_whitespace();

    let keyword = match tokens.next() {
        Some(keyword) => keyword,
        None => return Ok(None),
    };

    let command_type = CommandType::from_keyword(keyword)
        .ok_or_else(|| TableDbError::User(format!("Unknown command: {}", keyword)))?;

    let mut args = Args {
        command_type,
        tokens,
    };

    let command = match command_type {
        CommandType::CreateTable => Command::CreateTable {
            table: args.required("table")?,
        },
        CommandType::DropTable => Command::DropTable {
            table: args.required("table")?,
        },
        CommandType::Insert => Command::Insert {
            table: args.required("table")?,
            fields: args.fields()?,
        },
        CommandType::Update => Command::Update {
            table: args.required("table")?,
            id: args.required("id")?,
            fields: args.fields()?,
        },
        CommandType::Delete => Command::Delete {
            table: args.required("table")?,
            id: args.required("id")?,
        },
        CommandType::Read => Command::Read {
            table: args.required("table")?,
        },
        CommandType::StartTransaction => Command::StartTransaction,
        CommandType::CommitTransaction => Command::CommitTransaction,
        CommandType::RollbackTransaction => Command::RollbackTransaction,
        CommandType::BackupDb => Command::BackupDb,
        CommandType::RestoreDb => Command::RestoreDb,
        CommandType::RestorePart => Command::RestorePart {
            table: args.required("table")?,
        },
    };

    args.finish()?;
    Ok(Some(command))
}

/// Parse `key=value` tokens into fields
///
/// Later duplicates of a key overwrite earlier ones. The `id` key is
/// reserved for the system-assigned identifier.
pub fn parse_fields<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Result<Fields> {
    let mut fields = Fields::new();

    for token in tokens {
        let (key, value) = token.split_once(FIELD_SEPARATOR).ok_or_else(|| {
            TableDbError::User(format!("Expected key=value, got \"{}\"", token))
        })?;

        if key.is_empty() {
            return Err(TableDbError::User(format!(
                "Missing field name in \"{}\"",
                token
            )));
        }
        if value.contains(FIELD_SEPARATOR) {
            return Err(TableDbError::User(format!(
                "Field values cannot contain '{}': \"{}\"",
                FIELD_SEPARATOR, token
            )));
        }

        fields.insert(key.to_string(), value.to_string());
    }

    check_fields(&fields)?;
    Ok(fields)
}

/// Positional argument cursor for one command line
struct Args<'a> {
    command_type: CommandType,
    tokens: SplitWhitespace<'a>,
}

impl Args<'_> {
    fn required(&mut self, name: &str) -> Result<String> {
        self.tokens
            .next()
            .map(str::to_string)
            .ok_or_else(|| self.usage_error(&format!("missing <{}>", name)))
    }

    fn fields(&mut self) -> Result<Fields> {
        parse_fields(self.tokens.by_ref())
    }

    fn finish(mut self) -> Result<()> {
        match self.tokens.next() {
            None => Ok(()),
            Some(extra) => Err(self.usage_error(&format!("unexpected argument \"{}\"", extra))),
        }
    }

    fn usage_error(&self, problem: &str) -> TableDbError {
        let keyword = self.command_type.keyword();
        let usage = self.command_type.usage();
        if usage.is_empty() {
            TableDbError::User(format!("{}: {} (usage: {})", keyword, problem, keyword))
        } else {
            TableDbError::User(format!(
                "{}: {} (usage: {} {})",
                keyword, problem, keyword, usage
            ))
        }
    }
}
