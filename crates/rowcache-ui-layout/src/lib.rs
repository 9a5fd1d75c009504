//! Layout contracts & policies for Rowcache

mod constraints;
mod template;

pub use constraints::*;
pub use template::*;

pub mod prelude {
    pub use crate::constraints::Constraints;
    pub use crate::template::{CellTemplate, CellTemplateFactory, TemplateError};
}
