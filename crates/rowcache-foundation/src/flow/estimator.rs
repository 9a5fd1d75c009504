//! Off-screen cell size estimation.

use std::sync::Arc;

use rowcache_ui_graphics::Size;
use rowcache_ui_layout::{CellTemplateFactory, Constraints, TemplateError};

use super::ContentProvider;

/// Measures the natural size of a cell at a given index.
///
/// Each estimate instantiates a throwaway template, binds it to the index's
/// memoized content (the same content live rendering will bind), and
/// resolves its compressed fit at the host's cell width. Estimation never
/// touches layout state, so it is safe to run on the background context.
pub struct CellSizeEstimator {
    factory: Box<dyn CellTemplateFactory>,
    content: Arc<ContentProvider>,
    cell_width: f32,
}

impl CellSizeEstimator {
    /// Builds an estimator, probing the factory once so that a broken
    /// template configuration fails at startup instead of surfacing as
    /// missing sizes mid-sweep.
    pub fn new(
        factory: Box<dyn CellTemplateFactory>,
        content: Arc<ContentProvider>,
        cell_width: f32,
    ) -> Result<Self, TemplateError> {
        factory.instantiate()?;
        Ok(Self {
            factory,
            content,
            cell_width,
        })
    }

    /// Width every cell is constrained to.
    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Measures the cell at `index`.
    ///
    /// Idempotent for a fixed content cache: the memoized content and the
    /// fixed width make repeated estimates return the same size.
    pub fn estimate(&self, index: usize) -> Result<Size, TemplateError> {
        let mut template = self.factory.instantiate()?;
        let content = self.content.content_for(index);
        template.bind(&content.title, &content.features);
        Ok(template.measure(&Constraints::width_fixed(self.cell_width)))
    }
}
