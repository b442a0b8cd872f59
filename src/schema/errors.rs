//! Schema error types
//!
//! All of these are configuration errors: they fail fast at database
//! construction, before the filesystem is touched.

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A collection definition has no storage layout set
    #[error("must have a storage layout for a collection definition")]
    MissingLayout,

    /// A collection definition has no record format set
    #[error("must have a record format for a collection definition")]
    MissingFormat,

    /// A collection definition failed validation; names the offending collection
    #[error("invalid definition for collection {collection}: {reason}")]
    InvalidCollection {
        /// Name of the offending collection
        collection: String,
        /// The underlying validation failure
        reason: String,
    },

    /// A schema definition could not be parsed from its JSON form
    #[error("malformed schema definition: {0}")]
    Malformed(String),
}

impl SchemaError {
    /// Wraps a per-collection failure with the collection name.
    pub(crate) fn for_collection(collection: &str, err: SchemaError) -> Self {
        SchemaError::InvalidCollection {
            collection: collection.to_string(),
            reason: err.to_string(),
        }
    }
}
