//! Cached flow layout for self-measuring lists.
//!
//! Cells in a Rowcache list have variable, content-dependent heights. Rather
//! than measuring on every layout pass, the system measures each cell once
//! on a background context before it is first displayed and positions cells
//! from a running vertical offset over the cached sizes:
//!
//! - [`ContentProvider`] materializes and memoizes per-cell content.
//! - [`CellSizeEstimator`] measures a throwaway template bound to that
//!   content at the host's width.
//! - [`CachedFlowLayout`] accumulates placements from the measured sizes and
//!   answers the host's visibility and content-size queries.
//! - [`PopulationDriver`] sweeps the index range once, measuring in the
//!   background and recording on the main context in strict index order.

mod content;
mod estimator;
mod flow_layout;
mod placement;
mod population;

pub use content::*;
pub use estimator::*;
pub use flow_layout::*;
pub use placement::*;
pub use population::*;
