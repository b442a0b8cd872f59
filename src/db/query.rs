//! Query descriptions
//!
//! Predicate-driven reads are not implemented. The type exists so the
//! capability gap is reported explicitly instead of as a silent empty
//! result.

/// Description of a read over a whole collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    collection: String,
    limit: Option<usize>,
}

impl Query {
    /// Creates a query over a collection.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            limit: None,
        }
    }

    /// Caps the number of returned records.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The queried collection
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The record cap, if any
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}
