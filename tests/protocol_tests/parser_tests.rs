//! Command Parser Tests
//!
//! Tests verify:
//! - Every keyword parses into its command
//! - key=value field parsing and its limits
//! - Usage errors for missing or extra arguments
//! - Response messages

use tabledb::protocol::{parse_command, parse_fields, Command, CommandType, Response};
use tabledb::storage::Fields;
use tabledb::txn::{BatchStats, CommitReport, TableOutcome};
use tabledb::TableDbError;

// =============================================================================
// Helper Functions
// =============================================================================

fn parse(line: &str) -> Command {
    parse_command(line).unwrap().unwrap()
}

fn parse_err(line: &str) -> String {
    match parse_command(line) {
        Err(TableDbError::User(message)) => message,
        other => panic!("expected UserError for {:?}, got {:?}", line, other),
    }
}

fn fields(pairs: &[(&str, &str)]) -> Fields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// =============================================================================
// Command Parsing Tests
// =============================================================================

#[test]
fn test_blank_lines_parse_to_none() {
    assert_eq!(parse_command("").unwrap(), None);
    assert_eq!(parse_command("   \t ").unwrap(), None);
}

#[test]
fn test_parse_table_commands() {
    assert_eq!(
        parse("createTable users"),
        Command::CreateTable {
            table: "users".to_string()
        }
    );
    assert_eq!(
        parse("dropTable users"),
        Command::DropTable {
            table: "users".to_string()
        }
    );
    assert_eq!(
        parse("read users"),
        Command::Read {
            table: "users".to_string()
        }
    );
    assert_eq!(
        parse("restorePart users"),
        Command::RestorePart {
            table: "users".to_string()
        }
    );
}

#[test]
fn test_parse_insert() {
    assert_eq!(
        parse("insert users name=alice age=30"),
        Command::Insert {
            table: "users".to_string(),
            fields: fields(&[("name", "alice"), ("age", "30")]),
        }
    );
}

#[test]
fn test_parse_insert_without_fields() {
    assert_eq!(
        parse("insert users"),
        Command::Insert {
            table: "users".to_string(),
            fields: Fields::new(),
        }
    );
}

#[test]
fn test_parse_update_and_delete() {
    assert_eq!(
        parse("update users abc a=2"),
        Command::Update {
            table: "users".to_string(),
            id: "abc".to_string(),
            fields: fields(&[("a", "2")]),
        }
    );
    assert_eq!(
        parse("delete users abc"),
        Command::Delete {
            table: "users".to_string(),
            id: "abc".to_string(),
        }
    );
}

#[test]
fn test_parse_argumentless_commands() {
    assert_eq!(parse("startTransaction"), Command::StartTransaction);
    assert_eq!(parse("commitTransaction"), Command::CommitTransaction);
    assert_eq!(parse("rollbackTransaction"), Command::RollbackTransaction);
    assert_eq!(parse("backupDB"), Command::BackupDb);
    assert_eq!(parse("restoreDB"), Command::RestoreDb);
}

#[test]
fn test_extra_whitespace_is_ignored() {
    assert_eq!(
        parse("  insert   users\ta=1  "),
        Command::Insert {
            table: "users".to_string(),
            fields: fields(&[("a", "1")]),
        }
    );
}

#[test]
fn test_every_keyword_round_trips_through_command_type() {
    for command_type in CommandType::ALL {
        assert_eq!(
            CommandType::from_keyword(command_type.keyword()),
            Some(command_type)
        );
    }
    assert_eq!(parse("read t").command_type(), CommandType::Read);
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_unknown_command() {
    assert_eq!(parse_err("select * from users"), "Unknown command: select");
}

#[test]
fn test_keywords_are_case_sensitive() {
    assert!(parse_err("CREATETABLE users").starts_with("Unknown command"));
}

#[test]
fn test_missing_table_argument() {
    let message = parse_err("createTable");
    assert!(message.contains("missing <table>"), "{}", message);
}

#[test]
fn test_missing_id_argument() {
    assert!(parse_err("delete users").contains("missing <id>"));
    assert!(parse_err("update users").contains("missing <id>"));
}

#[test]
fn test_extra_argument_rejected() {
    assert!(parse_err("read users extra").contains("unexpected argument \"extra\""));
    assert!(parse_err("startTransaction now").contains("unexpected argument"));
}

#[test]
fn test_field_without_separator_rejected() {
    assert!(parse_err("insert users name").contains("Expected key=value"));
}

#[test]
fn test_field_with_empty_key_rejected() {
    assert!(parse_err("insert users =x").contains("Missing field name"));
}

#[test]
fn test_value_containing_separator_rejected() {
    assert!(parse_err("insert users eq=a=b").contains("cannot contain"));
}

#[test]
fn test_id_field_is_reserved() {
    assert!(parse_err("insert users id=123").contains("\"id\""));
    assert!(parse_err("update users abc id=123").contains("\"id\""));
}

// =============================================================================
// Field Parsing Tests
// =============================================================================

#[test]
fn test_parse_fields_allows_empty_value() {
    assert_eq!(parse_fields(["note="]).unwrap(), fields(&[("note", "")]));
}

#[test]
fn test_parse_fields_last_duplicate_wins() {
    assert_eq!(parse_fields(["a=1", "a=2"]).unwrap(), fields(&[("a", "2")]));
}

#[test]
fn test_parse_fields_keeps_values_as_strings() {
    let parsed = parse_fields(["n=007", "flag=true"]).unwrap();
    assert_eq!(parsed.get("n").map(String::as_str), Some("007"));
    assert_eq!(parsed.get("flag").map(String::as_str), Some("true"));
}

// =============================================================================
// Response Message Tests
// =============================================================================

#[test]
fn test_response_messages() {
    assert_eq!(
        Response::TableCreated {
            table: "t".to_string()
        }
        .to_string(),
        "Table \"t\" created."
    );
    assert_eq!(
        Response::InsertStaged {
            table: "t".to_string(),
            id: "x".to_string()
        }
        .to_string(),
        "Recorded insert into table \"t\" with id \"x\" in the transaction."
    );
    assert_eq!(Response::TransactionStarted.to_string(), "Transaction started.");
}

#[test]
fn test_commit_message_lists_table_outcomes() {
    let report = CommitReport {
        tables: vec![
            (
                "t".to_string(),
                TableOutcome::Applied(BatchStats {
                    deleted: 1,
                    updated: 2,
                    inserted: 3,
                }),
            ),
            ("u".to_string(), TableOutcome::Skipped),
        ],
    };

    assert_eq!(
        Response::Committed(report).to_string(),
        "Transaction committed.\n  t: 1 deleted, 2 updated, 3 inserted\n  u: skipped, table does not exist"
    );
}

#[test]
fn test_record_id_accessor() {
    let response = Response::Deleted {
        table: "t".to_string(),
        id: "x".to_string(),
    };
    assert_eq!(response.record_id(), Some("x"));
    assert_eq!(Response::TransactionStarted.record_id(), None);
}
