//! Reusable cell template contracts.
//!
//! A [`CellTemplate`] is the visual template for one list cell: it accepts
//! the cell's content (a title plus an ordered list of feature strings) and
//! can resolve its own minimal size under measurement constraints. Templates
//! are instantiated through a [`CellTemplateFactory`], both for live cells
//! and for the throwaway instances used during off-screen measurement.

use rowcache_ui_graphics::Size;
use thiserror::Error;

use crate::Constraints;

/// Raised when a cell template cannot be produced.
///
/// Template failures are configuration errors (a missing asset, a broken
/// template definition). They are fatal at startup rather than recoverable
/// at runtime.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("cell template asset `{0}` is missing")]
    MissingAsset(String),
    #[error("cell template could not be instantiated: {0}")]
    Instantiation(String),
}

/// One visual cell template instance.
pub trait CellTemplate {
    /// Binds content into the template: a display title and the ordered
    /// feature strings shown beneath it.
    fn bind(&mut self, title: &str, features: &[String]);

    /// Resolves the template's minimal size under the given constraints.
    ///
    /// With [`Constraints::width_fixed`] this is a compressed-fit
    /// measurement: exact width, minimal height that fits the bound content.
    fn measure(&self, constraints: &Constraints) -> Size;
}

/// Produces fresh [`CellTemplate`] instances.
///
/// Factories are shared with the background measurement context, so they
/// must be thread-safe. The templates they produce are plain measurable
/// data and may be instantiated off the main context.
pub trait CellTemplateFactory: Send + Sync {
    fn instantiate(&self) -> Result<Box<dyn CellTemplate>, TemplateError>;
}
