//! The cached flow layout engine.
//!
//! Positions are accumulated incrementally: each recorded size appends one
//! placement whose `y` is the previous placement's bottom edge plus the
//! spacing constant. This makes population O(1) amortized per item and keeps
//! visibility queries at O(log n + k) over the y-sorted placement sequence,
//! instead of an O(n) re-layout per frame.
//!
//! All mutation happens on the main context; the background side of the
//! population pipeline never touches this type directly.

use rowcache_ui_graphics::{Point, Rect, Size};

use super::Placement;

/// Fixed vertical gap between consecutive placements; also the left gutter.
pub const DEFAULT_SPACING: f32 = 10.0;

/// Content size reported before any placement exists, so the host has
/// something to scroll against while the cache is still empty.
pub const DEFAULT_ESTIMATED_ITEM_SIZE: Size = Size {
    width: 240.0,
    height: 300.0,
};

/// Population progress of the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopulationState {
    /// No placements recorded yet.
    Empty,
    /// Some but not all placements recorded.
    Populating { recorded: usize },
    /// Every item has a placement.
    Complete,
}

/// Flow layout over a size cache populated in strict index order.
pub struct CachedFlowLayout {
    item_count: usize,
    spacing: f32,
    estimated_size: Size,
    /// Measured sizes, dense and append-only; entry `i` is item `i`.
    size_cache: Vec<Size>,
    /// Placements in index order; `placements[i].frame.y` satisfies the
    /// running-offset invariant against `placements[i - 1]`.
    placements: Vec<Placement>,
    invalidation_handler: Option<Box<dyn Fn() + Send>>,
}

impl CachedFlowLayout {
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            spacing: DEFAULT_SPACING,
            estimated_size: DEFAULT_ESTIMATED_ITEM_SIZE,
            size_cache: Vec::with_capacity(item_count),
            placements: Vec::with_capacity(item_count),
            invalidation_handler: None,
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the content size reported while no placement exists yet.
    pub fn with_estimated_size(mut self, size: Size) -> Self {
        self.estimated_size = size;
        self
    }

    /// Registers the host's invalidation hook.
    ///
    /// Fired when the first placement lands: hosts may have queried (and
    /// cached) geometry before any data existed and must re-layout.
    pub fn set_invalidation_handler(&mut self, handler: impl Fn() + Send + 'static) {
        self.invalidation_handler = Some(Box::new(handler));
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn recorded_count(&self) -> usize {
        self.placements.len()
    }

    pub fn state(&self) -> PopulationState {
        match self.placements.len() {
            0 => PopulationState::Empty,
            recorded if recorded == self.item_count => PopulationState::Complete,
            recorded => PopulationState::Populating { recorded },
        }
    }

    /// Records the measured size for `index` and appends its placement.
    ///
    /// Sizes must arrive in strict index order with no gaps: `index` must
    /// equal the number of placements already recorded. Anything else is a
    /// programming error in the caller; the entry is rejected rather than
    /// allowed to corrupt the placement sequence.
    pub fn record_size(&mut self, index: usize, size: Size) {
        debug_assert_eq!(
            index,
            self.placements.len(),
            "sizes must be recorded in strict index order"
        );
        debug_assert!(index < self.item_count, "index beyond configured item count");
        if index != self.placements.len() || index >= self.item_count {
            log::error!(
                "rejected size for index {index}: {} placements recorded, {} items total",
                self.placements.len(),
                self.item_count
            );
            return;
        }

        let y = match self.placements.last() {
            Some(previous) => previous.bottom() + self.spacing,
            None => self.spacing,
        };
        let frame = Rect::from_origin_size(Point::new(self.spacing, y), size);
        self.size_cache.push(size);
        self.placements.push(Placement::new(index, frame));
        log::trace!("placed item {index} at y={y:.1} ({:.1}x{:.1})", size.width, size.height);

        if index == 0 {
            if let Some(handler) = &self.invalidation_handler {
                handler();
            }
        }
    }

    /// The measured size cached for `index`, if it has been recorded.
    pub fn size_for(&self, index: usize) -> Option<Size> {
        self.size_cache.get(index).copied()
    }

    /// The placement resolved for `index`, if it has been recorded.
    pub fn placement_for(&self, index: usize) -> Option<Placement> {
        self.placements.get(index).copied()
    }

    /// All currently known placements intersecting `rect`.
    ///
    /// Valid in every population state; while populating this returns the
    /// already-recorded subset, which is what lets the host render and
    /// scroll through known items before the sweep finishes.
    pub fn placements_in(&self, rect: Rect) -> Vec<Placement> {
        // Placements are y-sorted: binary search the first candidate, then
        // walk forward until placements start past the query's bottom edge.
        let first = self
            .placements
            .partition_point(|placement| placement.bottom() <= rect.y);
        self.placements[first..]
            .iter()
            .take_while(|placement| placement.frame.y < rect.bottom())
            .filter(|placement| placement.frame.intersects(&rect))
            .copied()
            .collect()
    }

    /// Total scrollable content size.
    ///
    /// Falls back to the estimated size while empty; otherwise the last
    /// placement's bottom edge and width. Grows monotonically as the cache
    /// fills and is only an approximation of the final extent until
    /// population completes.
    pub fn content_size(&self) -> Size {
        match self.placements.last() {
            None => self.estimated_size,
            Some(last) => Size::new(last.frame.width, last.bottom()),
        }
    }
}
