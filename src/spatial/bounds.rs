//! Axis-aligned bounding boxes in planar coordinates

use geo::{Rect, coord};

use crate::io::error::{Result, invalid_parameter};

/// Axis-aligned bounding box `(minx, miny, maxx, maxy)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum coordinates (inclusive)
    pub min: [f64; 2],
    /// Maximum coordinates (inclusive)
    pub max: [f64; 2],
}

impl BoundingBox {
    /// Create a box from its corner coordinates
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: [min_x, min_y],
            max: [max_x, max_y],
        }
    }

    /// Extent along x
    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    /// Extent along y
    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    /// True when the box encloses no area
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Check if a point lies within the closed box
    pub fn contains(&self, point: [f64; 2]) -> bool {
        point[0] >= self.min[0]
            && point[0] <= self.max[0]
            && point[1] >= self.min[1]
            && point[1] <= self.max[1]
    }

    /// True when the interiors of both boxes intersect
    ///
    /// Boxes that only touch along an edge or corner do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min[0] < other.max[0]
            && other.min[0] < self.max[0]
            && self.min[1] < other.max[1]
            && other.min[1] < self.max[1]
    }

    /// Reject non-finite or inverted corners
    ///
    /// # Errors
    ///
    /// Returns an error if any coordinate is NaN or infinite, or if a
    /// minimum exceeds its maximum
    pub fn validate(&self) -> Result<()> {
        let finite = self.min.iter().chain(self.max.iter()).all(|v| v.is_finite());
        if !finite {
            return Err(invalid_parameter(
                "bounding_box",
                &format!("{self:?}"),
                &"coordinates must be finite",
            ));
        }
        if self.min[0] > self.max[0] || self.min[1] > self.max[1] {
            return Err(invalid_parameter(
                "bounding_box",
                &format!("{self:?}"),
                &"minimum corner must not exceed maximum corner",
            ));
        }
        Ok(())
    }

    /// Convert into a `geo` rectangle
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min[0], y: self.min[1] },
            coord! { x: self.max[0], y: self.max[1] },
        )
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }
}
