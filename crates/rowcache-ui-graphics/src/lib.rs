//! Geometry data for Rowcache

mod geometry;

pub use geometry::*;
