//! Restricting grid cells to the interior of a region
//!
//! Every cell is intersected with the region boundary. Cells whose overlap has
//! no area are dropped, cells fully inside keep their square, and border cells
//! are replaced by the (possibly multi-part) intersection. Survivors keep the
//! sweep order so later per-cell sequences line up with fixed positions.

use geo::{Area, BooleanOps, BoundingRect, Contains, MultiPolygon};

use crate::spatial::bounds::BoundingBox;
use crate::spatial::grid::{Cell, Grid};
use crate::spatial::region::Region;

// Relative area difference below which a clipped piece counts as the whole cell
const WHOLE_CELL_TOLERANCE: f64 = 1e-9;

/// Polygon intersection capability used by the clipper
pub trait Intersector {
    /// Intersect `piece` with `region`, returning an empty multipolygon when disjoint
    fn intersect(
        &self,
        piece: &MultiPolygon<f64>,
        region: &MultiPolygon<f64>,
    ) -> MultiPolygon<f64>;
}

/// Intersection through `geo`'s boolean operations
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanIntersector;

impl Intersector for BooleanIntersector {
    fn intersect(
        &self,
        piece: &MultiPolygon<f64>,
        region: &MultiPolygon<f64>,
    ) -> MultiPolygon<f64> {
        piece.intersection(region)
    }
}

/// A grid cell that survived clipping
#[derive(Debug, Clone, PartialEq)]
pub struct ClippedCell {
    /// Position of the source cell in the sweep
    pub index: usize,
    /// Source cell before clipping
    pub cell: Cell,
    /// Part of the cell inside the region
    pub geometry: MultiPolygon<f64>,
}

impl ClippedCell {
    /// Area of the clipped geometry
    pub fn area(&self) -> f64 {
        self.geometry.unsigned_area()
    }

    /// True when clipping removed nothing from the square
    pub fn is_whole(&self) -> bool {
        let full = self.cell.area();
        ((full - self.area()) / full).abs() <= WHOLE_CELL_TOLERANCE
    }
}

/// Grid cells restricted to a region, in sweep order
#[derive(Debug, Clone, PartialEq)]
pub struct ClippedGrid {
    cell_size: f64,
    generated: usize,
    cells: Vec<ClippedCell>,
}

impl ClippedGrid {
    /// Edge length of the source grid
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of cells in the source grid before clipping
    pub const fn generated_count(&self) -> usize {
        self.generated
    }

    /// Surviving cells in sweep order
    pub fn cells(&self) -> &[ClippedCell] {
        &self.cells
    }

    /// Number of surviving cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no cell overlaps the region
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate surviving cells in sweep order
    pub fn iter(&self) -> std::slice::Iter<'_, ClippedCell> {
        self.cells.iter()
    }

    /// Total area of the surviving geometry
    pub fn area(&self) -> f64 {
        self.cells.iter().map(ClippedCell::area).sum()
    }

    /// Clip the already clipped geometry again
    ///
    /// Clipping is idempotent, so against the same region this reproduces
    /// `self` up to the precision of the intersection routine.
    pub fn reclip(&self, region: &Region) -> Self {
        self.reclip_with(region, &BooleanIntersector)
    }

    /// [`ClippedGrid::reclip`] with a caller-provided intersection routine
    pub fn reclip_with<I: Intersector + ?Sized>(&self, region: &Region, intersector: &I) -> Self {
        let cells = self
            .cells
            .iter()
            .filter_map(|clipped| {
                clip_geometry(&clipped.geometry, region, intersector).map(|geometry| {
                    ClippedCell {
                        index: clipped.index,
                        cell: clipped.cell,
                        geometry,
                    }
                })
            })
            .collect();

        Self {
            cell_size: self.cell_size,
            generated: self.generated,
            cells,
        }
    }
}

impl<'a> IntoIterator for &'a ClippedGrid {
    type Item = &'a ClippedCell;
    type IntoIter = std::slice::Iter<'a, ClippedCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Restrict every cell of `grid` to `region`
pub fn clip(grid: &Grid, region: &Region) -> ClippedGrid {
    clip_with(grid, region, &BooleanIntersector)
}

/// [`clip`] with a caller-provided intersection routine
pub fn clip_with<I: Intersector + ?Sized>(
    grid: &Grid,
    region: &Region,
    intersector: &I,
) -> ClippedGrid {
    let cells = grid
        .iter()
        .enumerate()
        .filter_map(|(index, cell)| {
            clip_geometry(&cell.to_multi_polygon(), region, intersector).map(|geometry| {
                ClippedCell {
                    index,
                    cell: *cell,
                    geometry,
                }
            })
        })
        .collect();

    ClippedGrid {
        cell_size: grid.cell_size(),
        generated: grid.len(),
        cells,
    }
}

fn clip_geometry<I: Intersector + ?Sized>(
    geometry: &MultiPolygon<f64>,
    region: &Region,
    intersector: &I,
) -> Option<MultiPolygon<f64>> {
    let region_bounds = region.bounds()?;
    let piece_bounds = geometry.bounding_rect().map(BoundingBox::from)?;

    // Disjoint boxes cannot share area
    if !piece_bounds.overlaps(&region_bounds) {
        return None;
    }

    if region.boundary().contains(geometry) {
        return Some(geometry.clone());
    }

    let clipped = intersector.intersect(geometry, region.boundary());
    (clipped.unsigned_area() > 0.0).then_some(clipped)
}
