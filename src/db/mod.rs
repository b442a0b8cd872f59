//! Database façade for flatdb
//!
//! Owns the database lifecycle: the schema definition is validated first
//! (fail fast on bad configuration before touching the filesystem), then
//! the root path is checked to exist and be a directory. Per-record work
//! is delegated to the record store.

mod query;

pub use query::Query;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::context::RequestContext;
use crate::observability::Logger;
use crate::schema::SchemaDefinition;
use crate::store::{Key, Record, RecordReader, StoreError, StoreResult};

/// Handle to a directory-backed record database
///
/// Immutable after construction; clone freely, operations only read.
#[derive(Debug, Clone)]
pub struct Database {
    root: PathBuf,
    schema: SchemaDefinition,
}

impl Database {
    /// Opens a database over an existing directory.
    ///
    /// Nothing is created or modified on any failure path. Fails with a
    /// schema validation error naming the offending collection, or with a
    /// distinct message when the root is absent, uninspectable, or not a
    /// directory.
    pub fn open(root: impl Into<PathBuf>, schema: SchemaDefinition) -> StoreResult<Self> {
        let root = root.into();
        schema.validate()?;

        match fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(StoreError::NotADirectory(root.display().to_string())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::DirectoryNotFound(root.display().to_string()))
            }
            Err(err) => return Err(StoreError::DirectoryCheck(err.to_string())),
        }

        Logger::info(
            "DB_OPEN",
            &[
                ("root", &root.display().to_string()),
                ("collections", &schema.len().to_string()),
            ],
        );
        Ok(Self { root, schema })
    }

    /// Root directory this database reads from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The validated schema definition
    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    fn reader(&self) -> RecordReader<'_> {
        RecordReader::new(&self.root, &self.schema)
    }

    /// Loads the record identified by its key.
    ///
    /// The record state carries the authoritative outcome; inspect it
    /// rather than relying on the return value alone.
    pub fn get(&self, ctx: &RequestContext, record: &mut dyn Record) -> StoreResult<()> {
        self.reader().get(ctx, record)
    }

    /// Checks whether the key has stored data, without decoding any payload.
    pub fn exists(&self, ctx: &RequestContext, key: &Key) -> StoreResult<bool> {
        self.reader().exists(ctx, key)
    }

    /// Loads every record independently; never short-circuits on failure.
    ///
    /// Returns the first hard error after all records were attempted.
    pub fn get_multi(
        &self,
        ctx: &RequestContext,
        records: &mut [&mut dyn Record],
    ) -> StoreResult<()> {
        let total = records.len();
        let result = self.reader().get_multi(ctx, records);
        if let Err(ref err) = result {
            Logger::error(
                "GET_MULTI_FAILED",
                &[
                    ("error", &err.to_string()),
                    ("records", &total.to_string()),
                    ("request_id", &ctx.request_id().to_string()),
                ],
            );
        }
        result
    }

    /// Predicate queries are not implemented.
    ///
    /// Surfaces the capability gap explicitly; never a silent empty result.
    pub fn query(
        &self,
        _ctx: &RequestContext,
        _query: &Query,
    ) -> StoreResult<Vec<serde_json::Value>> {
        Err(StoreError::NotImplemented("predicate queries"))
    }

    /// File-backed reads have no transaction support.
    pub fn run_readonly_transaction<F>(
        &self,
        _ctx: &RequestContext,
        _worker: F,
    ) -> StoreResult<()>
    where
        F: FnOnce(&Database) -> StoreResult<()>,
    {
        Err(StoreError::NotSupported("readonly transactions"))
    }

    /// The write path does not exist yet.
    pub fn run_readwrite_transaction<F>(
        &self,
        _ctx: &RequestContext,
        _worker: F,
    ) -> StoreResult<()>
    where
        F: FnOnce(&Database) -> StoreResult<()>,
    {
        Err(StoreError::NotImplemented("readwrite transactions"))
    }
}
