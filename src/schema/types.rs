//! Schema definition types
//!
//! A schema definition maps each collection name to a [`CollectionDef`]
//! describing how that collection's records are physically stored. The
//! definition is validated once at database construction and never
//! mutated afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};

/// Physical layout of a collection's records on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageLayout {
    /// One shared `records.json` file holding a JSON array of entries
    SingleFile,
    /// One `<id>.json` file per record
    IndividualFiles,
}

impl StorageLayout {
    /// Returns the configuration vocabulary name for this layout
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageLayout::SingleFile => "single_file",
            StorageLayout::IndividualFiles => "individual_files",
        }
    }
}

/// Encoding of a stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    /// JSON text, the only format currently supported
    Json,
}

impl RecordFormat {
    /// Returns the configuration vocabulary name for this format
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordFormat::Json => "json",
        }
    }
}

/// How one collection stores its records
///
/// Both fields must be set for the definition to validate; an unrecognized
/// value is rejected when the definition is deserialized from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollectionDef {
    /// Storage layout, required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageLayout>,
    /// Record format, required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<RecordFormat>,
}

impl CollectionDef {
    /// A collection stored as one shared JSON array file
    pub fn single_file() -> Self {
        Self {
            storage: Some(StorageLayout::SingleFile),
            format: Some(RecordFormat::Json),
        }
    }

    /// A collection stored as one JSON file per record
    pub fn individual_files() -> Self {
        Self {
            storage: Some(StorageLayout::IndividualFiles),
            format: Some(RecordFormat::Json),
        }
    }

    /// Checks that both the layout and the format are set.
    pub fn validate(&self) -> SchemaResult<()> {
        if self.storage.is_none() {
            return Err(SchemaError::MissingLayout);
        }
        if self.format.is_none() {
            return Err(SchemaError::MissingFormat);
        }
        Ok(())
    }
}

/// Immutable registry mapping collection names to their definitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDefinition {
    collections: HashMap<String, CollectionDef>,
}

impl SchemaDefinition {
    /// Creates a schema definition from a prepared map.
    pub fn new(collections: HashMap<String, CollectionDef>) -> Self {
        Self { collections }
    }

    /// Starts building a schema definition collection by collection.
    pub fn builder() -> SchemaDefinitionBuilder {
        SchemaDefinitionBuilder::default()
    }

    /// Parses and validates a schema definition from its JSON form.
    ///
    /// The expected shape is an object of collection name to definition:
    /// `{"users": {"storage": "single_file", "format": "json"}}`.
    pub fn from_json_str(json: &str) -> SchemaResult<Self> {
        let schema: Self =
            serde_json::from_str(json).map_err(|e| SchemaError::Malformed(e.to_string()))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Looks up the definition for a collection.
    pub fn collection(&self, name: &str) -> Option<&CollectionDef> {
        self.collections.get(name)
    }

    /// Number of defined collections
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Whether no collections are defined
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Validates every collection definition.
    ///
    /// Fails with the offending collection's name in the message.
    pub fn validate(&self) -> SchemaResult<()> {
        for (name, def) in &self.collections {
            def.validate()
                .map_err(|e| SchemaError::for_collection(name, e))?;
        }
        Ok(())
    }
}

/// Builder for [`SchemaDefinition`]
#[derive(Debug, Default)]
pub struct SchemaDefinitionBuilder {
    collections: HashMap<String, CollectionDef>,
}

impl SchemaDefinitionBuilder {
    /// Adds a collection definition.
    pub fn collection(mut self, name: impl Into<String>, def: CollectionDef) -> Self {
        self.collections.insert(name.into(), def);
        self
    }

    /// Finishes the schema definition without validating it.
    pub fn build(self) -> SchemaDefinition {
        SchemaDefinition::new(self.collections)
    }
}
