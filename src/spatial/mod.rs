//! Spatial data structures and grid manipulation
//!
//! This module contains spatial-related functionality including:
//! - Bounding boxes in planar coordinates
//! - Square grid generation
//! - The boundary region
//! - Clipping grids to the region

/// Axis-aligned bounding boxes
pub mod bounds;
/// Region clipping with pluggable intersection
pub mod clip;
/// Square-cell sweep over a bounding box
pub mod grid;
/// Boundary polygon wrapper
pub mod region;

pub use bounds::BoundingBox;
pub use clip::{ClippedCell, ClippedGrid, clip};
pub use grid::{Cell, Grid, generate_grid};
pub use region::Region;
