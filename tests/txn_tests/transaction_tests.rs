//! Transaction Manager Tests
//!
//! Tests verify:
//! - Idle/Active state transitions
//! - Buffering per table without existence checks
//! - Batch application order (deletes → updates → inserts)
//! - State errors for misuse

use tabledb::storage::{Fields, Record};
use tabledb::txn::{BatchStats, TableBatch, TransactionManager, TransactionState};
use tabledb::TableDbError;

// =============================================================================
// Helper Functions
// =============================================================================

fn fields(pairs: &[(&str, &str)]) -> Fields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn record(id: &str, pairs: &[(&str, &str)]) -> Record {
    Record {
        id: id.to_string(),
        fields: fields(pairs),
    }
}

// =============================================================================
// State Machine Tests
// =============================================================================

#[test]
fn test_new_manager_is_idle() {
    let txn = TransactionManager::new();

    assert!(!txn.is_active());
    assert!(txn.buffer().is_none());
    assert!(matches!(txn.state(), TransactionState::Idle));
}

#[test]
fn test_start_activates_with_empty_buffer() {
    let mut txn = TransactionManager::new();

    txn.start().unwrap();

    assert!(txn.is_active());
    assert!(txn.buffer().unwrap().is_empty());
}

#[test]
fn test_start_twice_fails_and_keeps_buffer() {
    let mut txn = TransactionManager::new();
    txn.start().unwrap();
    txn.buffer_delete("users", "x").unwrap();

    let err = txn.start().unwrap_err();

    assert!(matches!(err, TableDbError::TransactionState(_)));
    assert_eq!(txn.buffer().unwrap().operation_count(), 1);
}

#[test]
fn test_commit_while_idle_fails() {
    let mut txn = TransactionManager::new();

    assert!(matches!(
        txn.take_for_commit(),
        Err(TableDbError::TransactionState(_))
    ));
}

#[test]
fn test_rollback_while_idle_fails() {
    let mut txn = TransactionManager::new();

    assert!(matches!(
        txn.rollback(),
        Err(TableDbError::TransactionState(_))
    ));
}

#[test]
fn test_buffering_while_idle_fails() {
    let mut txn = TransactionManager::new();

    assert!(txn.buffer_insert("users", Fields::new()).is_err());
    assert!(txn.buffer_update("users", "x", Fields::new()).is_err());
    assert!(txn.buffer_delete("users", "x").is_err());
}

#[test]
fn test_buffering_id_field_fails_without_staging() {
    let mut txn = TransactionManager::new();
    txn.start().unwrap();

    let err = txn.buffer_insert("users", fields(&[("id", "x")])).unwrap_err();
    assert!(matches!(err, TableDbError::User(_)));
    let err = txn.buffer_update("users", "u1", fields(&[("id", "x")])).unwrap_err();
    assert!(matches!(err, TableDbError::User(_)));

    assert!(txn.buffer().unwrap().is_empty());
}

#[test]
fn test_rollback_discards_and_returns_to_idle() {
    let mut txn = TransactionManager::new();
    txn.start().unwrap();
    txn.buffer_insert("users", fields(&[("a", "1")])).unwrap();
    txn.buffer_insert("users", fields(&[("b", "2")])).unwrap();

    let discarded = txn.rollback().unwrap();

    assert_eq!(discarded, 2);
    assert!(!txn.is_active());
}

#[test]
fn test_take_for_commit_returns_buffer_and_idles() {
    let mut txn = TransactionManager::new();
    txn.start().unwrap();
    txn.buffer_delete("users", "x").unwrap();

    let buffer = txn.take_for_commit().unwrap();

    assert!(!txn.is_active());
    assert_eq!(buffer.operation_count(), 1);

    // A fresh transaction starts empty
    txn.start().unwrap();
    assert!(txn.buffer().unwrap().is_empty());
}

// =============================================================================
// Buffering Tests
// =============================================================================

#[test]
fn test_buffer_insert_assigns_unique_ids() {
    let mut txn = TransactionManager::new();
    txn.start().unwrap();

    let a = txn.buffer_insert("users", fields(&[("a", "1")])).unwrap();
    let b = txn.buffer_insert("users", fields(&[("a", "1")])).unwrap();

    assert_ne!(a.id, b.id);
    let batch = txn.buffer().unwrap().batch("users").unwrap();
    assert_eq!(batch.inserts, vec![a, b]);
}

#[test]
fn test_buffer_groups_by_table() {
    let mut txn = TransactionManager::new();
    txn.start().unwrap();

    txn.buffer_insert("users", Fields::new()).unwrap();
    txn.buffer_update("orders", "o1", fields(&[("s", "paid")])).unwrap();
    txn.buffer_delete("users", "u1").unwrap();

    let buffer = txn.buffer().unwrap();
    assert_eq!(buffer.tables().collect::<Vec<_>>(), vec!["orders", "users"]);

    let users = buffer.batch("users").unwrap();
    assert_eq!(users.inserts.len(), 1);
    assert_eq!(users.deletes, vec!["u1".to_string()]);
    assert!(users.updates.is_empty());

    let orders = buffer.batch("orders").unwrap();
    assert_eq!(orders.updates[0].id, "o1");
    assert_eq!(orders.updates[0].fields, fields(&[("s", "paid")]));
}

#[test]
fn test_buffer_accepts_unknown_ids_and_tables() {
    let mut txn = TransactionManager::new();
    txn.start().unwrap();

    txn.buffer_update("never_created", "nope", Fields::new()).unwrap();
    txn.buffer_delete("never_created", "nope").unwrap();

    assert_eq!(txn.buffer().unwrap().operation_count(), 2);
}

// =============================================================================
// Batch Application Tests
// =============================================================================

#[test]
fn test_apply_deletes_before_updates_before_inserts() {
    let mut records = vec![record("x", &[("a", "1")]), record("y", &[("a", "2")])];

    let new = record("z", &[("a", "9")]);
    let batch = TableBatch {
        inserts: vec![new.clone()],
        updates: vec![tabledb::txn::RecordPatch {
            id: "x".to_string(),
            fields: fields(&[("a", "9")]),
        }],
        deletes: vec!["x".to_string()],
    };

    let stats = batch.apply(&mut records);

    assert_eq!(records, vec![record("y", &[("a", "2")]), new]);
    assert_eq!(
        stats,
        BatchStats {
            deleted: 1,
            updated: 0,
            inserted: 1
        }
    );
}

#[test]
fn test_apply_merges_updates_in_order() {
    let mut records = vec![record("x", &[("a", "1"), ("b", "1")])];

    let batch = TableBatch {
        updates: vec![
            tabledb::txn::RecordPatch {
                id: "x".to_string(),
                fields: fields(&[("a", "2")]),
            },
            tabledb::txn::RecordPatch {
                id: "x".to_string(),
                fields: fields(&[("a", "3"), ("c", "3")]),
            },
        ],
        ..TableBatch::default()
    };

    let stats = batch.apply(&mut records);

    assert_eq!(records, vec![record("x", &[("a", "3"), ("b", "1"), ("c", "3")])]);
    assert_eq!(stats.updated, 2);
}

#[test]
fn test_apply_ignores_unmatched_ids() {
    let original = vec![record("x", &[("a", "1")])];
    let mut records = original.clone();

    let batch = TableBatch {
        updates: vec![tabledb::txn::RecordPatch {
            id: "missing".to_string(),
            fields: fields(&[("a", "2")]),
        }],
        deletes: vec!["also-missing".to_string()],
        ..TableBatch::default()
    };

    let stats = batch.apply(&mut records);

    assert_eq!(records, original);
    assert_eq!(stats, BatchStats::default());
}

#[test]
fn test_apply_appends_inserts_after_existing() {
    let mut records = vec![record("x", &[])];
    let batch = TableBatch {
        inserts: vec![record("n1", &[]), record("n2", &[])],
        ..TableBatch::default()
    };

    batch.apply(&mut records);

    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["x", "n1", "n2"]);
}
