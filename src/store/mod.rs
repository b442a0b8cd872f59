//! Record store for flatdb
//!
//! The read-side core: given a key, resolve the owning collection's
//! storage layout, locate the backing file, and decode the requested
//! record.
//!
//! # Design Principles
//!
//! - Two closed storage layouts: one shared array file, or one file per record
//! - Streaming scan with early termination for single-file collections
//! - Not-found is a designated non-error outcome on the record itself
//! - Malformed data and I/O failure are distinct hard errors
//! - File handles are scope-bound and closed on every exit path

mod errors;
mod key;
mod paths;
mod reader;
mod record;
mod scan;

pub use errors::{ErrorKind, StoreError, StoreResult};
pub use key::{Key, RecordId};
pub use paths::{collection_dir, individual_file_path, single_file_path, RECORDS_FILE};
pub use reader::RecordReader;
pub use record::{JsonRecord, Record, RecordState};
