//! Schema registry for flatdb
//!
//! The schema definition is the immutable configuration input that tells
//! the store how each collection is physically laid out.
//!
//! # Design Principles
//!
//! - Validated once at database construction, before the filesystem is touched
//! - Never mutated after validation succeeds
//! - Closed set of storage layouts; adding one is a new enum case, not a plugin
//! - Passed by ownership into the database handle; no process-wide state

mod errors;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use types::{
    CollectionDef, RecordFormat, SchemaDefinition, SchemaDefinitionBuilder, StorageLayout,
};
