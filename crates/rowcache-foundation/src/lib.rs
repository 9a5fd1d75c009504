//! Foundation elements for Rowcache: the cached flow layout, its population
//! pipeline, and the execution-context seams they run across.

pub mod flow;
pub mod phrase;
pub mod runtime;

pub use flow::*;
pub use phrase::*;
pub use runtime::*;

pub mod prelude {
    pub use crate::flow::{
        CachedFlowLayout, CellContent, CellSizeEstimator, ContentProvider, Placement,
        PopulationDriver, PopulationHost, PopulationState,
    };
    pub use crate::phrase::{LoremGenerator, PhraseSource};
    pub use crate::runtime::{BackgroundExecutor, MainDispatcher, MainTask};
}
