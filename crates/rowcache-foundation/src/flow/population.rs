//! One-time cache population sweep.

use std::sync::{Arc, Weak};

use rowcache_ui_graphics::Size;

use super::CellSizeEstimator;
use crate::runtime::{BackgroundExecutor, MainDispatcher};

/// The owner of the layout being populated.
///
/// `record_size` is invoked on the main context, once per index, in strictly
/// increasing index order.
pub trait PopulationHost: Send + Sync + 'static {
    fn record_size(&self, index: usize, size: Size);
}

/// Drives the cache population sweep.
///
/// One background job walks the index range sequentially; each measured size
/// is posted to the main dispatcher as a fire-and-forget task. Because the
/// background loop never parallelizes and the dispatcher delivers in post
/// order, sizes arrive at the host in strict index order without any
/// reordering buffer.
pub struct PopulationDriver {
    item_count: usize,
    estimator: Arc<CellSizeEstimator>,
    dispatcher: Arc<dyn MainDispatcher>,
    executor: Arc<dyn BackgroundExecutor>,
}

impl PopulationDriver {
    pub fn new(
        item_count: usize,
        estimator: Arc<CellSizeEstimator>,
        dispatcher: Arc<dyn MainDispatcher>,
        executor: Arc<dyn BackgroundExecutor>,
    ) -> Self {
        Self {
            item_count,
            estimator,
            dispatcher,
            executor,
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Starts the sweep for `owner`.
    ///
    /// The driver keeps only a weak handle to the owner and checks liveness
    /// before each unit of work, on both sides of the handoff: the
    /// background loop stops scheduling once the owner is gone, and an
    /// already-posted task delivers nothing if teardown won the race. A
    /// cancelled sweep is not a failure.
    pub fn run<H: PopulationHost>(&self, owner: &Arc<H>) {
        let owner = Arc::downgrade(owner);
        let estimator = Arc::clone(&self.estimator);
        let dispatcher = Arc::clone(&self.dispatcher);
        let item_count = self.item_count;

        self.executor.execute(Box::new(move || {
            for index in 0..item_count {
                if owner.upgrade().is_none() {
                    log::debug!("population cancelled before index {index}: owner is gone");
                    return;
                }
                let size = match estimator.estimate(index) {
                    Ok(size) => size,
                    Err(err) => {
                        // Measurement is deterministic; a failure here means
                        // broken configuration, so halt instead of recording
                        // a corrupt entry.
                        log::error!("population halted at index {index}: {err}");
                        return;
                    }
                };
                let owner = Weak::clone(&owner);
                dispatcher.post(Box::new(move || {
                    if let Some(owner) = owner.upgrade() {
                        owner.record_size(index, size);
                    }
                }));
            }
            log::debug!("population sweep scheduled all {item_count} items");
        }));
    }
}
