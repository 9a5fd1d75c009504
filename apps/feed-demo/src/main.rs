//! Demo feed built on the Rowcache cached flow layout.
//!
//! Plays the role of the hosting list view: it owns the layout, kicks off
//! the background population sweep over 1000 cells, drains the main loop
//! until every size is cached, then reports the placements visible in the
//! initial viewport.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use rowcache_foundation::prelude::*;
use rowcache_foundation::DEFAULT_ESTIMATED_ITEM_SIZE;
use rowcache_runtime_std::{MainLoop, StdBackgroundExecutor};
use rowcache_ui_graphics::{Rect, Size};
use rowcache_ui_layout::{CellTemplate, CellTemplateFactory, Constraints, TemplateError};

const ITEM_COUNT: usize = 1000;
const CELL_WIDTH: f32 = 320.0;
const VIEWPORT_HEIGHT: f32 = 600.0;

const PADDING: f32 = 12.0;
const TITLE_HEIGHT: f32 = 24.0;
const LINE_HEIGHT: f32 = 18.0;
const CHAR_WIDTH: f32 = 7.2;

/// Text cell measured with a character-budget wrapping model: the title
/// takes one fixed line, each feature wraps at the width's character budget.
#[derive(Default)]
struct TextCellTemplate {
    features: Vec<String>,
}

impl CellTemplate for TextCellTemplate {
    fn bind(&mut self, _title: &str, features: &[String]) {
        self.features = features.to_vec();
    }

    fn measure(&self, constraints: &Constraints) -> Size {
        let width = constraints.max_width;
        let budget = (((width - 2.0 * PADDING) / CHAR_WIDTH).floor() as usize).max(1);
        let mut height = 2.0 * PADDING + TITLE_HEIGHT;
        for feature in &self.features {
            let lines = feature.len().div_ceil(budget).max(1);
            height += lines as f32 * LINE_HEIGHT;
        }
        let (width, height) = constraints.constrain(width, height);
        Size::new(width, height)
    }
}

struct TextCellFactory;

impl CellTemplateFactory for TextCellFactory {
    fn instantiate(&self) -> Result<Box<dyn CellTemplate>, TemplateError> {
        Ok(Box::new(TextCellTemplate::default()))
    }
}

/// The hosting list view: owns the layout and receives recorded sizes on
/// the main context.
struct FeedHost {
    layout: Mutex<CachedFlowLayout>,
}

impl FeedHost {
    fn state(&self) -> PopulationState {
        self.layout.lock().unwrap().state()
    }
}

impl PopulationHost for FeedHost {
    fn record_size(&self, index: usize, size: Size) {
        self.layout.lock().unwrap().record_size(index, size);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut generator = LoremGenerator::new();
    let content = Arc::new(ContentProvider::new(&mut generator));
    let estimator = Arc::new(CellSizeEstimator::new(
        Box::new(TextCellFactory),
        Arc::clone(&content),
        CELL_WIDTH,
    )?);

    let mut layout =
        CachedFlowLayout::new(ITEM_COUNT).with_estimated_size(DEFAULT_ESTIMATED_ITEM_SIZE);
    layout.set_invalidation_handler(|| {
        log::info!("first placement landed, host re-queries geometry");
    });
    log::info!(
        "content size before population: {:?} (estimated)",
        layout.content_size()
    );
    let host = Arc::new(FeedHost {
        layout: Mutex::new(layout),
    });

    let main_loop = MainLoop::new();
    let driver = PopulationDriver::new(
        ITEM_COUNT,
        estimator,
        Arc::new(main_loop.handle()),
        Arc::new(StdBackgroundExecutor),
    );
    driver.run(&host);

    let observed = Arc::clone(&host);
    main_loop.run_until(|| observed.state() == PopulationState::Complete);

    let layout = host.layout.lock().unwrap();
    log::info!(
        "population complete: {} cells, content size {:?}",
        layout.recorded_count(),
        layout.content_size()
    );

    let viewport = Rect::new(0.0, 0.0, CELL_WIDTH + 2.0 * layout.spacing(), VIEWPORT_HEIGHT);
    for placement in layout.placements_in(viewport) {
        let cell = content.content_for(placement.index);
        log::info!(
            "visible: {:<8} y={:>6.1} height={:>6.1} features={}",
            cell.title,
            placement.frame.y,
            placement.frame.height,
            cell.features.len()
        );
    }

    Ok(())
}
