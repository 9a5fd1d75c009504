//! End-to-end population sweep tests.
//!
//! These drive the real pipeline: a background measurement pass feeding the
//! layout through a main dispatcher, with the layout mutated only by drained
//! main-loop tasks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rowcache_runtime_std::{MainLoop, StdBackgroundExecutor};
use rowcache_ui_graphics::Size;
use rowcache_ui_layout::{CellTemplate, CellTemplateFactory, Constraints, TemplateError};

use rowcache_foundation::flow::{
    CachedFlowLayout, CellSizeEstimator, ContentProvider, PopulationDriver, PopulationHost,
    PopulationState,
};
use rowcache_foundation::phrase::LoremGenerator;
use rowcache_foundation::runtime::BackgroundExecutor;

/// Runs the job synchronously on the calling thread, for deterministic
/// single-threaded tests.
struct InlineExecutor;

impl BackgroundExecutor for InlineExecutor {
    fn execute(&self, job: Box<dyn FnOnce() + Send + 'static>) {
        job();
    }
}

struct LineTemplate {
    lines: usize,
}

impl CellTemplate for LineTemplate {
    fn bind(&mut self, _title: &str, features: &[String]) {
        self.lines = 1 + features.len();
    }

    fn measure(&self, constraints: &Constraints) -> Size {
        Size::new(constraints.max_width, self.lines as f32 * 20.0)
    }
}

struct LineTemplateFactory;

impl CellTemplateFactory for LineTemplateFactory {
    fn instantiate(&self) -> Result<Box<dyn CellTemplate>, TemplateError> {
        Ok(Box::new(LineTemplate { lines: 0 }))
    }
}

/// Factory that starts failing after a fixed number of instantiations.
struct FailingAfter {
    remaining: AtomicUsize,
}

impl CellTemplateFactory for FailingAfter {
    fn instantiate(&self) -> Result<Box<dyn CellTemplate>, TemplateError> {
        if self.remaining.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            Ok(Box::new(LineTemplate { lines: 0 }))
        } else {
            Err(TemplateError::Instantiation("template pool exhausted".into()))
        }
    }
}

struct TestHost {
    layout: Mutex<CachedFlowLayout>,
    recorded_indices: Mutex<Vec<usize>>,
    record_count: Arc<AtomicUsize>,
}

impl TestHost {
    fn new(item_count: usize, record_count: Arc<AtomicUsize>) -> Self {
        Self {
            layout: Mutex::new(CachedFlowLayout::new(item_count)),
            recorded_indices: Mutex::new(Vec::new()),
            record_count,
        }
    }

    fn state(&self) -> PopulationState {
        self.layout.lock().unwrap().state()
    }
}

impl PopulationHost for TestHost {
    fn record_size(&self, index: usize, size: Size) {
        let mut layout = self.layout.lock().unwrap();
        let height_before = layout.content_size().height;
        layout.record_size(index, size);
        // Content extent must never shrink while populating.
        if layout.recorded_count() > 1 {
            assert!(layout.content_size().height >= height_before);
        }
        self.recorded_indices.lock().unwrap().push(index);
        self.record_count.fetch_add(1, Ordering::SeqCst);
    }
}

fn estimator_with(factory: Box<dyn CellTemplateFactory>, width: f32) -> Arc<CellSizeEstimator> {
    let mut source = LoremGenerator::seeded(3);
    let content = Arc::new(ContentProvider::with_rng(
        &mut source,
        StdRng::seed_from_u64(9),
    ));
    Arc::new(CellSizeEstimator::new(factory, content, width).unwrap())
}

#[test]
fn full_population_preserves_positioning_invariant() {
    const ITEMS: usize = 40;
    let main_loop = MainLoop::new();
    let host = Arc::new(TestHost::new(ITEMS, Arc::new(AtomicUsize::new(0))));
    let driver = PopulationDriver::new(
        ITEMS,
        estimator_with(Box::new(LineTemplateFactory), 320.0),
        Arc::new(main_loop.handle()),
        Arc::new(InlineExecutor),
    );

    driver.run(&host);
    main_loop.run_until_idle();

    assert_eq!(host.state(), PopulationState::Complete);
    let layout = host.layout.lock().unwrap();
    let spacing = layout.spacing();
    assert_eq!(layout.placement_for(0).unwrap().frame.y, spacing);
    for index in 1..ITEMS {
        let previous = layout.placement_for(index - 1).unwrap();
        let current = layout.placement_for(index).unwrap();
        assert_eq!(
            current.frame.y,
            previous.frame.y + previous.frame.height + spacing
        );
    }
}

#[test]
fn sizes_are_recorded_in_strict_index_order() {
    const ITEMS: usize = 25;
    let main_loop = MainLoop::new();
    let host = Arc::new(TestHost::new(ITEMS, Arc::new(AtomicUsize::new(0))));
    let driver = PopulationDriver::new(
        ITEMS,
        estimator_with(Box::new(LineTemplateFactory), 320.0),
        Arc::new(main_loop.handle()),
        Arc::new(InlineExecutor),
    );

    driver.run(&host);
    main_loop.run_until_idle();

    let indices = host.recorded_indices.lock().unwrap();
    let expected: Vec<usize> = (0..ITEMS).collect();
    assert_eq!(*indices, expected);
}

#[test]
fn owner_dropped_before_delivery_records_nothing() {
    const ITEMS: usize = 10;
    let main_loop = MainLoop::new();
    let record_count = Arc::new(AtomicUsize::new(0));
    let host = Arc::new(TestHost::new(ITEMS, Arc::clone(&record_count)));
    let driver = PopulationDriver::new(
        ITEMS,
        estimator_with(Box::new(LineTemplateFactory), 320.0),
        Arc::new(main_loop.handle()),
        Arc::new(InlineExecutor),
    );

    driver.run(&host);
    drop(host);
    main_loop.run_until_idle();

    assert_eq!(record_count.load(Ordering::SeqCst), 0);
}

#[test]
fn owner_dropped_midway_stops_after_k_records() {
    const ITEMS: usize = 10;
    const DELIVERED: usize = 4;
    let main_loop = MainLoop::new();
    let record_count = Arc::new(AtomicUsize::new(0));
    let host = Arc::new(TestHost::new(ITEMS, Arc::clone(&record_count)));
    let driver = PopulationDriver::new(
        ITEMS,
        estimator_with(Box::new(LineTemplateFactory), 320.0),
        Arc::new(main_loop.handle()),
        Arc::new(InlineExecutor),
    );

    driver.run(&host);
    for _ in 0..DELIVERED {
        assert!(main_loop.run_one());
    }
    drop(host);
    main_loop.run_until_idle();

    assert_eq!(record_count.load(Ordering::SeqCst), DELIVERED);
}

#[test]
fn estimator_failure_halts_the_sweep() {
    const ITEMS: usize = 10;
    // One instantiation for the construction probe, two for indices 0 and 1.
    let factory = FailingAfter {
        remaining: AtomicUsize::new(3),
    };
    let main_loop = MainLoop::new();
    let host = Arc::new(TestHost::new(ITEMS, Arc::new(AtomicUsize::new(0))));
    let driver = PopulationDriver::new(
        ITEMS,
        estimator_with(Box::new(factory), 320.0),
        Arc::new(main_loop.handle()),
        Arc::new(InlineExecutor),
    );

    driver.run(&host);
    main_loop.run_until_idle();

    assert_eq!(host.state(), PopulationState::Populating { recorded: 2 });
}

#[test]
fn threaded_population_completes_and_stays_ordered() {
    const ITEMS: usize = 50;
    let main_loop = MainLoop::new();
    let host = Arc::new(TestHost::new(ITEMS, Arc::new(AtomicUsize::new(0))));
    let driver = PopulationDriver::new(
        ITEMS,
        estimator_with(Box::new(LineTemplateFactory), 240.0),
        Arc::new(main_loop.handle()),
        Arc::new(StdBackgroundExecutor),
    );

    driver.run(&host);
    let deadline = Instant::now() + Duration::from_secs(10);
    let observed = Arc::clone(&host);
    main_loop.run_until(|| {
        observed.state() == PopulationState::Complete || Instant::now() > deadline
    });

    assert_eq!(host.state(), PopulationState::Complete);
    let indices = host.recorded_indices.lock().unwrap();
    let expected: Vec<usize> = (0..ITEMS).collect();
    assert_eq!(*indices, expected);
    let layout = host.layout.lock().unwrap();
    assert_eq!(layout.content_size().width, 240.0);
}
