//! Mathematical utilities

/// Albers equal-area conic projection
pub mod projection;

pub use projection::{AlbersEqualArea, AlbersParameters};
