//! Transaction Manager
//!
//! Owns the single transaction slot.

use crate::error::{Result, TableDbError};
use crate::storage::{check_fields, Fields, Record};

use super::TransactionBuffer;

/// Transaction lifecycle state
#[derive(Debug, Default)]
pub enum TransactionState {
    /// No transaction in progress
    #[default]
    Idle,

    /// A transaction is in progress with its staged operations
    Active(TransactionBuffer),
}

/// Enforces at most one active transaction and owns its buffer
///
/// Buffering never touches files or table locks. Applying a committed
/// buffer is the engine's job: `take_for_commit` only hands it over.
#[derive(Debug, Default)]
pub struct TransactionManager {
    state: TransactionState,
}

impl TransactionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idle → Active with an empty buffer
    pub fn start(&mut self) -> Result<()> {
        if self.is_active() {
            return Err(TableDbError::TransactionState(
                "Transaction already in progress.".to_string(),
            ));
        }

        self.state = TransactionState::Active(TransactionBuffer::new());
        Ok(())
    }

    /// Stage an insert, assigning the record's id immediately
    pub fn buffer_insert(&mut self, table: &str, fields: Fields) -> Result<Record> {
        let buffer = self.buffer_mut()?;
        check_fields(&fields)?;
        let record = Record::new(fields);
        buffer.insert(table, record.clone());
        Ok(record)
    }

    /// Stage a patch for record `id`
    pub fn buffer_update(&mut self, table: &str, id: &str, fields: Fields) -> Result<()> {
        let buffer = self.buffer_mut()?;
        check_fields(&fields)?;
        buffer.update(table, id, fields);
        Ok(())
    }

    /// Stage removal of record `id`
    pub fn buffer_delete(&mut self, table: &str, id: &str) -> Result<()> {
        self.buffer_mut()?.delete(table, id);
        Ok(())
    }

    /// Active → Idle, handing the buffer to the caller for application
    pub fn take_for_commit(&mut self) -> Result<TransactionBuffer> {
        match std::mem::take(&mut self.state) {
            TransactionState::Active(buffer) => Ok(buffer),
            TransactionState::Idle => Err(Self::not_active()),
        }
    }

    /// Active → Idle, discarding the buffer
    ///
    /// Returns the number of operations thrown away.
    pub fn rollback(&mut self) -> Result<usize> {
        let buffer = self.take_for_commit()?;
        Ok(buffer.operation_count())
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, TransactionState::Active(_))
    }

    /// The active transaction's buffer, if any
    pub fn buffer(&self) -> Option<&TransactionBuffer> {
        match &self.state {
            TransactionState::Active(buffer) => Some(buffer),
            TransactionState::Idle => None,
        }
    }

    pub fn state(&self) -> &TransactionState {
        &self.state
    }

    fn buffer_mut(&mut self) -> Result<&mut TransactionBuffer> {
        match &mut self.state {
            TransactionState::Active(buffer) => Ok(buffer),
            TransactionState::Idle => Err(Self::not_active()),
        }
    }

    fn not_active() -> TableDbError {
        TableDbError::TransactionState("No transaction in progress.".to_string())
    }
}
