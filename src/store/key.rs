//! Record keys

use std::fmt;

/// Record identifier within a collection
///
/// Identifiers are opaque but stringifiable. Lookups always compare the
/// rendered string form, so `7` and `"7"` address the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    /// Numeric identifier
    Int(i64),
    /// String identifier
    Str(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(v) => write!(f, "{}", v),
            RecordId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(v: i64) -> Self {
        RecordId::Int(v)
    }
}

impl From<i32> for RecordId {
    fn from(v: i32) -> Self {
        RecordId::Int(v as i64)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Str(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Str(s)
    }
}

/// Key addressing one record: a collection name plus an identifier
///
/// Supplied by the caller per operation; the store never owns keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    collection: String,
    id: RecordId,
}

impl Key {
    /// Creates a key for a record in a collection.
    pub fn new(collection: impl Into<String>, id: impl Into<RecordId>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Name of the owning collection
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The record identifier
    pub fn id(&self) -> &RecordId {
        &self.id
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}
