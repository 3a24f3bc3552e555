//! Immutable boundary polygon used as clip mask and sweep extent

use geo::{Area, BoundingRect, Coord, MapCoords, MultiPolygon, Polygon};

use crate::spatial::bounds::BoundingBox;

/// National boundary in planar coordinates
///
/// Loaded once per session and never mutated; every grid is derived from it.
/// The bounding box is cached because each sweep and each clip consults it.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    boundary: MultiPolygon<f64>,
    bounds: Option<BoundingBox>,
}

impl Region {
    /// Wrap a boundary, caching its bounding box
    pub fn new(boundary: MultiPolygon<f64>) -> Self {
        let bounds = boundary.bounding_rect().map(BoundingBox::from);
        Self { boundary, bounds }
    }

    /// Region made of a single polygon
    pub fn from_polygon(polygon: Polygon<f64>) -> Self {
        Self::new(MultiPolygon::new(vec![polygon]))
    }

    /// Axis-aligned square region, mostly useful for scenarios and tests
    pub fn from_bounds(bounds: BoundingBox) -> Self {
        Self::from_polygon(bounds.to_rect().to_polygon())
    }

    /// Boundary geometry
    pub const fn boundary(&self) -> &MultiPolygon<f64> {
        &self.boundary
    }

    /// Bounding box `(minx, miny, maxx, maxy)`, absent for an empty boundary
    pub const fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    /// Planar area enclosed by the boundary
    pub fn area(&self) -> f64 {
        self.boundary.unsigned_area()
    }

    /// True when the boundary holds no polygons
    pub fn is_empty(&self) -> bool {
        self.boundary.0.is_empty()
    }

    /// Apply a coordinate transform to every vertex
    pub fn map_coords(&self, transform: impl Fn(Coord<f64>) -> Coord<f64> + Copy) -> Self {
        Self::new(self.boundary.map_coords(transform))
    }
}
