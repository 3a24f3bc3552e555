//! Input/output operations and error handling

/// Command-line arguments and the per-size output runner
pub mod cli;
/// Reversed viridis colour ramp
pub mod colormap;
/// Constants and runtime defaults
pub mod configuration;
/// Error types
pub mod error;
/// GeoJSON export of clipped grids
pub mod export;
/// Progress display across grid sizes
pub mod progress;
/// Vector rasterization onto RGBA images
pub mod raster;
/// Boundary loading and reprojection
pub mod region;
/// Grid overlay and choropleth figures
pub mod render;
