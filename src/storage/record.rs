//! Record definitions
//!
//! A record is a flat mapping of string fields plus a system-assigned id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TableDbError};

/// Caller-supplied fields of a record (strings only, no coercion)
pub type Fields = BTreeMap<String, String>;

/// Name of the system-assigned identifier field
pub const ID_FIELD: &str = "id";

/// Reject caller fields that would shadow the record id
pub fn check_fields(fields: &Fields) -> Result<()> {
    if fields.contains_key(ID_FIELD) {
        return Err(TableDbError::User(
            "The \"id\" field is assigned by the database and cannot be set".to_string(),
        ));
    }
    Ok(())
}

/// A single record in a table
///
/// Serialized flat: `{ "id": "...", "name": "alice", ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique id, assigned once at creation
    pub id: String,

    /// Every other field
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    /// Create a record with a freshly generated id
    ///
    /// An `id` entry in `fields` is dropped; see [`check_fields`].
    pub fn new(mut fields: Fields) -> Self {
        fields.remove(ID_FIELD);
        Self {
            id: Uuid::new_v4().to_string(),
            fields,
        }
    }

    /// Look up a field value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Overwrite fields present in `patch`, leaving the rest and the id alone
    pub fn merge(&mut self, patch: &Fields) {
        for (key, value) in patch.iter().filter(|(key, _)| key.as_str() != ID_FIELD) {
            self.fields.insert(key.clone(), value.clone());
        }
    }
}

/// On-disk container for a table
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct TableFile {
    pub records: Vec<Record>,
}

/// Borrowed form of [`TableFile`] used when saving
#[derive(Serialize)]
pub(crate) struct TableFileRef<'a> {
    pub records: &'a [Record],
}
