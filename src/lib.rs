//! flatdb - a read-only JSON record store backed by plain files
//!
//! A directory tree is treated as a database: each collection is stored
//! either as one shared `records.json` array or as one JSON file per
//! record, per a caller-supplied schema definition.

pub mod context;
pub mod db;
pub mod observability;
pub mod schema;
pub mod store;
