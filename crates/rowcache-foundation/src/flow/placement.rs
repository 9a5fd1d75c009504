//! Resolved cell placement.

use rowcache_ui_graphics::Rect;

/// An item's resolved rectangle within the scroll content.
///
/// `frame.y` is always derived from the previous placement; it is never set
/// independently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub index: usize,
    pub frame: Rect,
}

impl Placement {
    pub fn new(index: usize, frame: Rect) -> Self {
        Self { index, frame }
    }

    /// Bottom edge of the placement within the scroll content.
    pub fn bottom(&self) -> f32 {
        self.frame.bottom()
    }
}
