//! Schema Invariant Tests
//!
//! Configuration is validated once, at database construction:
//! - Both layout and format must be set for every collection
//! - Validation failures name the offending collection
//! - Schema validation happens before any directory check
//! - A key whose collection is undefined fails as a configuration error

use serde_json::Value;
use tempfile::TempDir;

use flatdb::context::RequestContext;
use flatdb::db::Database;
use flatdb::schema::{CollectionDef, SchemaDefinition, SchemaError, StorageLayout};
use flatdb::store::{ErrorKind, JsonRecord, Key, Record, StoreError};

// =============================================================================
// Collection Definition Validation
// =============================================================================

#[test]
fn test_both_constructors_produce_valid_defs() {
    assert!(CollectionDef::single_file().validate().is_ok());
    assert!(CollectionDef::individual_files().validate().is_ok());
}

#[test]
fn test_unset_layout_rejected() {
    let def = CollectionDef {
        storage: None,
        format: Some(flatdb::schema::RecordFormat::Json),
    };
    assert_eq!(def.validate(), Err(SchemaError::MissingLayout));
}

#[test]
fn test_unset_format_rejected() {
    let def = CollectionDef {
        storage: Some(StorageLayout::SingleFile),
        format: None,
    };
    assert_eq!(def.validate(), Err(SchemaError::MissingFormat));
}

#[test]
fn test_schema_validation_names_offending_collection() {
    let schema = SchemaDefinition::builder()
        .collection("users", CollectionDef::single_file())
        .collection("orders", CollectionDef::default())
        .build();

    let err = schema.validate().unwrap_err();
    let display = format!("{}", err);
    assert!(display.contains("invalid definition for collection orders"));
}

// =============================================================================
// JSON Configuration Form
// =============================================================================

#[test]
fn test_schema_loaded_from_json() {
    let schema = SchemaDefinition::from_json_str(
        r#"{
            "users": {"storage": "single_file", "format": "json"},
            "orders": {"storage": "individual_files", "format": "json"}
        }"#,
    )
    .unwrap();

    assert_eq!(
        schema.collection("users").unwrap().storage,
        Some(StorageLayout::SingleFile)
    );
    assert_eq!(
        schema.collection("orders").unwrap().storage,
        Some(StorageLayout::IndividualFiles)
    );
}

#[test]
fn test_unknown_layout_string_rejected_at_parse() {
    let result = SchemaDefinition::from_json_str(
        r#"{"users": {"storage": "unknown_storage_type", "format": "json"}}"#,
    );
    assert!(matches!(result, Err(SchemaError::Malformed(_))));
}

#[test]
fn test_incomplete_json_definition_rejected_at_validation() {
    let result = SchemaDefinition::from_json_str(r#"{"users": {"format": "json"}}"#);
    let err = result.unwrap_err();
    assert!(format!("{}", err).contains("users"));
}

// =============================================================================
// Construction Ordering
// =============================================================================

#[test]
fn test_schema_error_reported_before_directory_check() {
    // The directory is also bad; the schema failure must win.
    let schema = SchemaDefinition::builder()
        .collection("users", CollectionDef::default())
        .build();

    let err = Database::open("/non/existent/path", schema).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(format!("{}", err).contains("users"));
}

#[test]
fn test_valid_schema_with_valid_directory_opens() {
    let tmp = TempDir::new().unwrap();
    let schema = SchemaDefinition::builder()
        .collection("users", CollectionDef::single_file())
        .build();
    assert!(Database::open(tmp.path(), schema).is_ok());
}

#[test]
fn test_empty_schema_is_valid() {
    let tmp = TempDir::new().unwrap();
    let db = Database::open(tmp.path(), SchemaDefinition::default()).unwrap();
    assert!(db.schema().is_empty());
}

// =============================================================================
// Undefined Collections at Lookup Time
// =============================================================================

#[test]
fn test_lookup_in_undefined_collection_is_config_error() {
    let tmp = TempDir::new().unwrap();
    let db = Database::open(tmp.path(), SchemaDefinition::default()).unwrap();
    let ctx = RequestContext::new();

    let mut record = JsonRecord::<Value>::new(Key::new("ghosts", 1));
    let err = db.get(&ctx, &mut record).unwrap_err();
    assert_eq!(err, StoreError::UnknownCollection("ghosts".into()));
    assert_eq!(err.kind(), ErrorKind::Config);
    assert_eq!(record.state().error(), Some(&err));

    let err = db.exists(&ctx, &Key::new("ghosts", 1)).unwrap_err();
    assert_eq!(err, StoreError::UnknownCollection("ghosts".into()));
}
