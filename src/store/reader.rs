//! Record lookup engine
//!
//! Resolves a key's collection definition, dispatches on the storage
//! layout, and populates the caller's record from disk. Three outcomes are
//! kept strictly apart: not-found (a non-error state on the record),
//! malformed data, and I/O failure.
//!
//! The record state is set explicitly on every exit path. The returned
//! result mirrors the most severe outcome, but the record carries the
//! authoritative one.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::context::RequestContext;
use crate::schema::{SchemaDefinition, StorageLayout};

use super::errors::{StoreError, StoreResult};
use super::key::Key;
use super::paths;
use super::record::{Record, RecordState};
use super::scan::{ArrayScanner, ArrayStart};

/// Wire shape of one element in a single-file collection array
#[derive(Deserialize)]
struct SingleFileEntry {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    data: Option<Value>,
}

/// Wire shape used by existence checks: the payload is skipped, not decoded
#[derive(Deserialize)]
struct EntryId {
    #[serde(default)]
    id: Option<Value>,
}

/// Compares a stored id against the requested identifier's rendered form.
///
/// String comparison regardless of the native type, so a numeric `7` and a
/// string `"7"` are equivalent. Non-scalar ids never match.
fn id_matches(stored: &Option<Value>, wanted: &str) -> bool {
    match stored {
        Some(Value::String(s)) => s == wanted,
        Some(Value::Number(n)) => n.to_string() == wanted,
        _ => false,
    }
}

enum Lookup {
    Found,
    NotFound,
}

/// Read-side engine over a directory root and a schema definition
pub struct RecordReader<'a> {
    root: &'a Path,
    schema: &'a SchemaDefinition,
}

impl<'a> RecordReader<'a> {
    pub fn new(root: &'a Path, schema: &'a SchemaDefinition) -> Self {
        Self { root, schema }
    }

    /// Loads the record identified by its key.
    ///
    /// The record state carries the authoritative outcome: `Found`,
    /// `NotFound` (non-error), or `Failed` with the same error this call
    /// returns.
    pub fn get(&self, ctx: &RequestContext, record: &mut dyn Record) -> StoreResult<()> {
        match self.lookup(ctx, record) {
            Ok(Lookup::Found) => {
                record.set_state(RecordState::Found);
                Ok(())
            }
            Ok(Lookup::NotFound) => {
                record.set_state(RecordState::NotFound);
                Ok(())
            }
            Err(err) => {
                record.set_state(RecordState::Failed(err.clone()));
                Err(err)
            }
        }
    }

    /// Checks whether the key has stored data, without decoding any payload.
    pub fn exists(&self, ctx: &RequestContext, key: &Key) -> StoreResult<bool> {
        match self.layout_for(key.collection())? {
            StorageLayout::IndividualFiles => {
                match fs::metadata(paths::individual_file_path(self.root, key)) {
                    Ok(_) => Ok(true),
                    Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
                    Err(err) => Err(StoreError::Io(err.to_string())),
                }
            }
            StorageLayout::SingleFile => {
                let mut scanner = match self.open_scanner(key.collection())? {
                    Some(scanner) => scanner,
                    None => return Ok(false),
                };
                if scanner.begin()? == ArrayStart::Empty {
                    return Ok(false);
                }
                let wanted = key.id().to_string();
                loop {
                    if ctx.is_cancelled() {
                        return Err(StoreError::Cancelled);
                    }
                    match scanner.next_element::<EntryId>()? {
                        Some(entry) => {
                            if id_matches(&entry.id, &wanted) {
                                return Ok(true);
                            }
                        }
                        None => return Ok(false),
                    }
                }
            }
        }
    }

    /// Loads every record independently.
    ///
    /// Never short-circuits on a failed record: all records are attempted,
    /// and the first hard error is returned afterwards as a convenience
    /// signal. Each record's own state remains individually inspectable.
    /// Cancellation is observed between records; untouched records keep
    /// their `Unloaded` state.
    pub fn get_multi(
        &self,
        ctx: &RequestContext,
        records: &mut [&mut dyn Record],
    ) -> StoreResult<()> {
        let mut first_err = None;
        for record in records.iter_mut() {
            if ctx.is_cancelled() {
                return Err(StoreError::Cancelled);
            }
            if let Err(err) = self.get(ctx, &mut **record) {
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn lookup(&self, ctx: &RequestContext, record: &mut dyn Record) -> StoreResult<Lookup> {
        let key = record.key().clone();
        match self.layout_for(key.collection())? {
            StorageLayout::IndividualFiles => self.lookup_individual(&key, record),
            StorageLayout::SingleFile => self.lookup_single_file(ctx, &key, record),
        }
    }

    /// Resolves a collection's storage layout.
    ///
    /// A missing definition is a configuration error at lookup time, not
    /// undefined behavior. An unset layout can only reach this point when
    /// schema validation was bypassed; it is rejected the same way.
    fn layout_for(&self, collection: &str) -> StoreResult<StorageLayout> {
        let def = self
            .schema
            .collection(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;
        def.storage
            .ok_or_else(|| StoreError::LayoutUnset(collection.to_string()))
    }

    fn lookup_individual(&self, key: &Key, record: &mut dyn Record) -> StoreResult<Lookup> {
        let path = paths::individual_file_path(self.root, key);
        let payload = match fs::read(&path) {
            Ok(payload) => payload,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Lookup::NotFound),
            Err(err) => return Err(StoreError::Io(err.to_string())),
        };
        record.decode(&payload)?;
        Ok(Lookup::Found)
    }

    fn lookup_single_file(
        &self,
        ctx: &RequestContext,
        key: &Key,
        record: &mut dyn Record,
    ) -> StoreResult<Lookup> {
        let mut scanner = match self.open_scanner(key.collection())? {
            Some(scanner) => scanner,
            None => return Ok(Lookup::NotFound),
        };
        if scanner.begin()? == ArrayStart::Empty {
            return Ok(Lookup::NotFound);
        }

        let wanted = key.id().to_string();
        loop {
            if ctx.is_cancelled() {
                return Err(StoreError::Cancelled);
            }
            let entry = match scanner.next_element::<SingleFileEntry>()? {
                Some(entry) => entry,
                None => return Ok(Lookup::NotFound),
            };
            if !id_matches(&entry.id, &wanted) {
                continue;
            }
            // First match wins; nothing past this element is read.
            let data = match entry.data {
                Some(data) => data,
                None => return Err(StoreError::MissingData(wanted)),
            };
            record.decode_value(data)?;
            return Ok(Lookup::Found);
        }
    }

    /// Opens the shared array file of a single-file collection.
    ///
    /// `None` means the file does not exist, which is an empty collection,
    /// not an error.
    fn open_scanner(
        &self,
        collection: &str,
    ) -> StoreResult<Option<ArrayScanner<BufReader<File>>>> {
        let path = paths::single_file_path(self.root, collection);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err.to_string())),
        };
        Ok(Some(ArrayScanner::new(BufReader::new(file), collection)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CollectionDef;
    use crate::store::record::JsonRecord;

    fn schema() -> SchemaDefinition {
        SchemaDefinition::builder()
            .collection("users", CollectionDef::single_file())
            .build()
    }

    #[test]
    fn test_id_matches_renders_numbers() {
        assert!(id_matches(&Some(Value::String("7".into())), "7"));
        assert!(id_matches(&Some(serde_json::json!(7)), "7"));
        assert!(!id_matches(&Some(serde_json::json!(8)), "7"));
        assert!(!id_matches(&Some(Value::Null), "7"));
        assert!(!id_matches(&None, "7"));
    }

    #[test]
    fn test_unknown_collection_is_config_error() {
        let schema = schema();
        let reader = RecordReader::new(Path::new("/nowhere"), &schema);
        let ctx = RequestContext::new();

        let mut record = JsonRecord::<Value>::new(Key::new("ghosts", 1));
        let err = reader.get(&ctx, &mut record).unwrap_err();
        assert_eq!(err, StoreError::UnknownCollection("ghosts".into()));
        assert_eq!(record.state().error(), Some(&err));
    }

    #[test]
    fn test_unset_layout_is_config_error() {
        let schema = SchemaDefinition::builder()
            .collection("users", CollectionDef::default())
            .build();
        let reader = RecordReader::new(Path::new("/nowhere"), &schema);
        let ctx = RequestContext::new();

        let err = reader.exists(&ctx, &Key::new("users", 1)).unwrap_err();
        assert_eq!(err, StoreError::LayoutUnset("users".into()));
    }
}
