//! Grid exploration sessions
//!
//! Ties the sweep, the clip and density sampling into the single synchronous
//! chain run for every grid size selection.

/// Session over a loaded region
pub mod explorer;
/// Selectable grid sizes
pub mod selection;

pub use explorer::{Exploration, GridExplorer};
pub use selection::GridSize;
