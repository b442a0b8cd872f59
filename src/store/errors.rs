//! Store error taxonomy
//!
//! Not-found is never represented here: it is a designated non-error
//! outcome carried on the record itself (or `false` from an existence
//! check). Everything in this enum is a hard error.

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Coarse classification of store errors
///
/// For callers that dispatch on the taxonomy rather than the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Data present but not decodable per the layout's expected shape
    Malformed,
    /// Filesystem access failure other than not-found
    Io,
    /// Unrecognized or missing configuration
    Config,
    /// Capability explicitly not supported or not implemented
    Unsupported,
    /// Cooperative cancellation observed
    Cancelled,
}

/// Hard errors from store operations
///
/// I/O causes are carried as strings so the error stays cloneable; the
/// record state holds a clone of whatever error failed it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Single-file collection whose content is not a JSON array
    #[error("invalid JSON format for single-file collection {0}: expected array")]
    ExpectedArray(String),

    /// Stored data that could not be decoded
    #[error("malformed record data: {0}")]
    Malformed(String),

    /// Single-file entry matching the requested id but carrying no payload
    #[error("record data not found in single-file entry for id={0}")]
    MissingData(String),

    /// Filesystem failure other than not-found
    #[error("I/O error: {0}")]
    Io(String),

    /// Database root path is absent
    #[error("directory does not exist: {0}")]
    DirectoryNotFound(String),

    /// Database root path could not be inspected
    #[error("failed to check directory: {0}")]
    DirectoryCheck(String),

    /// Database root path exists but is not a directory
    #[error("path is not a directory: {0}")]
    NotADirectory(String),

    /// Schema definition failed validation
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Key whose collection has no entry in the schema definition
    #[error("no collection definition for {0}")]
    UnknownCollection(String),

    /// Collection definition reached the read path without a storage layout
    #[error("collection {0} has no storage layout configured")]
    LayoutUnset(String),

    /// Capability that will not be provided by this backend
    #[error("not supported: {0}")]
    NotSupported(&'static str),

    /// Capability that does not exist yet
    #[error("not implemented yet: {0}")]
    NotImplemented(&'static str),

    /// Operation observed its context's cancellation flag
    #[error("operation cancelled")]
    Cancelled,
}

impl StoreError {
    /// Returns the coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::ExpectedArray(_)
            | StoreError::Malformed(_)
            | StoreError::MissingData(_) => ErrorKind::Malformed,
            StoreError::Io(_) | StoreError::DirectoryCheck(_) => ErrorKind::Io,
            StoreError::DirectoryNotFound(_)
            | StoreError::NotADirectory(_)
            | StoreError::Schema(_)
            | StoreError::UnknownCollection(_)
            | StoreError::LayoutUnset(_) => ErrorKind::Config,
            StoreError::NotSupported(_) | StoreError::NotImplemented(_) => {
                ErrorKind::Unsupported
            }
            StoreError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            StoreError::ExpectedArray("users".into()).kind(),
            ErrorKind::Malformed
        );
        assert_eq!(
            StoreError::MissingData("7".into()).kind(),
            ErrorKind::Malformed
        );
        assert_eq!(StoreError::Io("denied".into()).kind(), ErrorKind::Io);
        assert_eq!(
            StoreError::UnknownCollection("users".into()).kind(),
            ErrorKind::Config
        );
        assert_eq!(
            StoreError::NotImplemented("queries").kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(StoreError::Cancelled.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn test_construction_error_messages() {
        assert_eq!(
            format!("{}", StoreError::DirectoryNotFound("/a/b".into())),
            "directory does not exist: /a/b"
        );
        assert_eq!(
            format!("{}", StoreError::NotADirectory("/a/b".into())),
            "path is not a directory: /a/b"
        );
    }

    #[test]
    fn test_schema_error_passes_through_display() {
        let err = StoreError::from(SchemaError::for_collection(
            "orders",
            SchemaError::MissingLayout,
        ));
        assert!(format!("{}", err).contains("orders"));
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
