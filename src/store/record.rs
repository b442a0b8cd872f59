//! Caller-supplied record containers
//!
//! The store never constructs records. It decodes into the containers it
//! is given and sets the state explicitly before returning, on every exit
//! path. The state on the record is the authoritative outcome; the call's
//! return value only mirrors the most severe thing that happened.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::key::Key;

/// Authoritative outcome of the most recent store operation on a record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecordState {
    /// No operation has touched this record yet
    #[default]
    Unloaded,
    /// The record was located and decoded into its target
    Found,
    /// The key has no stored data; a designated non-error outcome
    NotFound,
    /// A hard error occurred; the same error was returned from the call
    Failed(StoreError),
}

impl RecordState {
    /// Whether the record was located and decoded
    pub fn is_found(&self) -> bool {
        matches!(self, RecordState::Found)
    }

    /// Whether the key had no stored data
    pub fn is_not_found(&self) -> bool {
        matches!(self, RecordState::NotFound)
    }

    /// The hard error, if the operation failed
    pub fn error(&self) -> Option<&StoreError> {
        match self {
            RecordState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Contract for caller-owned record containers
pub trait Record {
    /// Key addressing this record
    fn key(&self) -> &Key;

    /// Outcome of the most recent operation
    fn state(&self) -> &RecordState;

    /// Sets the outcome; called by the store on every exit path.
    fn set_state(&mut self, state: RecordState);

    /// Decodes a raw JSON payload into the record's target.
    fn decode(&mut self, payload: &[u8]) -> StoreResult<()>;

    /// Decodes an already-parsed JSON value into the record's target.
    fn decode_value(&mut self, value: Value) -> StoreResult<()>;
}

/// Record container decoding into any owned deserializable type
#[derive(Debug)]
pub struct JsonRecord<T> {
    key: Key,
    state: RecordState,
    value: Option<T>,
}

impl<T> JsonRecord<T> {
    /// Creates an empty record for the given key.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            state: RecordState::Unloaded,
            value: None,
        }
    }

    /// The decoded value, if the record was found
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Consumes the record, returning the decoded value if any.
    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

impl<T: DeserializeOwned> Record for JsonRecord<T> {
    fn key(&self) -> &Key {
        &self.key
    }

    fn state(&self) -> &RecordState {
        &self.state
    }

    fn set_state(&mut self, state: RecordState) {
        self.state = state;
    }

    fn decode(&mut self, payload: &[u8]) -> StoreResult<()> {
        let value =
            serde_json::from_slice(payload).map_err(|e| StoreError::Malformed(e.to_string()))?;
        self.value = Some(value);
        Ok(())
    }

    fn decode_value(&mut self, value: Value) -> StoreResult<()> {
        let value =
            serde_json::from_value(value).map_err(|e| StoreError::Malformed(e.to_string()))?;
        self.value = Some(value);
        Ok(())
    }
}
