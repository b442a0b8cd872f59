//! Request context carried through store operations
//!
//! Operations are synchronous and blocking; cancellation is cooperative
//! and observed between records in a multi-get and between array elements
//! in a single-file scan. It never changes not-found or error semantics,
//! it only stops further work.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

/// Context carried through a store operation
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: Uuid,
    started_at: Instant,
    cancelled: Arc<AtomicBool>,
}

impl RequestContext {
    /// Creates a fresh context with a new request id.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            started_at: Instant::now(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request id for correlating log events
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Elapsed time since the context was created, in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.started_at.elapsed().as_millis()
    }

    /// Returns a handle that cancels work running under this context.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(Arc::clone(&self.cancelled))
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle that cancels the operations running under a context
#[derive(Debug, Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Requests cancellation; observed at the next check point.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}
