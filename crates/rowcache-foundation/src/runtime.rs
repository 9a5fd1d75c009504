//! Execution-context seams.
//!
//! The population pipeline runs across two contexts: a background worker
//! that performs measurement, and the main/UI context that owns all layout
//! state. These traits abstract both so that platforms (and tests) can
//! supply their own scheduling; `rowcache-runtime-std` provides the
//! std-backed implementations.

/// A unit of work posted to the main context.
pub type MainTask = Box<dyn FnOnce() + Send + 'static>;

/// Fire-and-forget dispatch onto the main/UI context.
///
/// Tasks posted from one thread execute on the main context in the order
/// they were posted.
pub trait MainDispatcher: Send + Sync {
    fn post(&self, task: MainTask);
}

/// Runs a job on a background context.
///
/// The job is executed exactly once, off the caller's context. Rowcache
/// schedules its whole population sweep as a single sequential job, so the
/// executor never needs to order multiple jobs against each other.
pub trait BackgroundExecutor: Send + Sync {
    fn execute(&self, job: Box<dyn FnOnce() + Send + 'static>);
}
