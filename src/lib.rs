//! Square grid overlay of a national boundary with simulated per-cell density
//!
//! A boundary is loaded once, reprojected onto an equal-area plane, swept with
//! axis-aligned square cells and clipped back to its outline. Each surviving
//! cell can carry a seeded Poisson sample used to draw a choropleth.

#![forbid(unsafe_code)]

/// Per-cell density sampling and summary statistics
pub mod analysis;
/// Boundary loading, figure rendering, export and error handling
pub mod io;
/// Map projection math
pub mod math;
/// Grid exploration sessions tying generation, clipping and sampling together
pub mod pipeline;
/// Bounding boxes, grid generation, regions and clipping
pub mod spatial;

pub use io::error::{GridError, Result};
