//! Density sampling and summary statistics for clipped grids

/// Seeded Poisson density values per cell
pub mod density;
/// Cell counts, areas and density ranges per run
pub mod statistics;

pub use density::sample_density;
pub use statistics::{GridSummary, summarize};
