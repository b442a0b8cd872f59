//! Path resolution for collection storage
//!
//! Pure functions of their inputs; no I/O, no errors possible.

use std::path::{Path, PathBuf};

use super::key::Key;

/// File name of the shared array file for single-file collections
pub const RECORDS_FILE: &str = "records.json";

/// Directory holding a collection's files: `<root>/<collection>`
pub fn collection_dir(root: &Path, collection: &str) -> PathBuf {
    root.join(collection)
}

/// Backing file of a single-file collection: `<root>/<collection>/records.json`
pub fn single_file_path(root: &Path, collection: &str) -> PathBuf {
    collection_dir(root, collection).join(RECORDS_FILE)
}

/// Backing file of one record in an individual-files collection:
/// `<root>/<collection>/<id>.json`
pub fn individual_file_path(root: &Path, key: &Key) -> PathBuf {
    collection_dir(root, key.collection()).join(format!("{}.json", key.id()))
}
