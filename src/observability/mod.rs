//! Observability for flatdb
//!
//! Structured JSON logging only: synchronous, one line per event,
//! deterministic field ordering. Logging is read-only, never affects
//! execution, and stays off the per-record hot paths.

mod logger;

pub use logger::{Logger, Severity};
