//! Square-cell sweep over a bounding box
//!
//! The sweep is two independent axis steppers combined as a Cartesian product:
//! every `y` step for the first `x` step, then every `y` step for the next.
//! Coordinates are computed from the step index rather than accumulated, so
//! long sweeps do not drift.

use geo::{MultiPolygon, Polygon};
use num_traits::{Float, NumCast};

use crate::io::configuration::MAX_GRID_CELLS;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::bounds::BoundingBox;

/// Lazy progression `start, start + step, start + 2 * step, ...` stopping before `end`
#[derive(Debug, Clone)]
pub struct AxisSteps<T> {
    start: T,
    end: T,
    step: T,
    index: usize,
}

impl<T: Float> AxisSteps<T> {
    /// Create a stepper over `[start, end)`
    ///
    /// A non-positive or NaN step yields nothing.
    pub const fn new(start: T, end: T, step: T) -> Self {
        Self {
            start,
            end,
            step,
            index: 0,
        }
    }

    fn value_at(&self, index: usize) -> Option<T> {
        <T as NumCast>::from(index).map(|i| i.mul_add(self.step, self.start))
    }
}

impl<T: Float> Iterator for AxisSteps<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if !(self.step > T::zero()) {
            return None;
        }
        let value = self.value_at(self.index)?;
        if value < self.end {
            self.index += 1;
            Some(value)
        } else {
            None
        }
    }
}

/// One square tile of the grid occupying `[x, x + size] × [y, y + size]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Lower-left x
    pub x: f64,
    /// Lower-left y
    pub y: f64,
    /// Edge length
    pub size: f64,
}

impl Cell {
    /// Create a cell from its lower-left corner and edge length
    pub const fn new(x: f64, y: f64, size: f64) -> Self {
        Self { x, y, size }
    }

    /// Corners as `(minx, miny, maxx, maxy)`
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.x + self.size, self.y + self.size)
    }

    /// Square area of the cell
    pub fn area(&self) -> f64 {
        self.size * self.size
    }

    /// Cell outline as a polygon
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds().to_rect().to_polygon()
    }

    /// Cell outline as a single-part multipolygon
    pub fn to_multi_polygon(&self) -> MultiPolygon<f64> {
        MultiPolygon::new(vec![self.to_polygon()])
    }
}

/// Ordered cells tiling a bounding box with a fixed edge length
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cell_size: f64,
    cells: Vec<Cell>,
}

impl Grid {
    /// A grid with no cells, used for regions without extent
    ///
    /// # Errors
    ///
    /// Returns an error if `cell_size` is not a positive finite length
    pub fn empty(cell_size: f64) -> Result<Self> {
        validate_cell_size(cell_size)?;
        Ok(Self {
            cell_size,
            cells: Vec::new(),
        })
    }

    /// Edge length shared by every cell
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cells in sweep order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the sweep produced nothing
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate cells in sweep order
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Reject edge lengths that would stall or explode the sweep
///
/// # Errors
///
/// Returns an error if `cell_size` is zero, negative, NaN or infinite
pub fn validate_cell_size(cell_size: f64) -> Result<()> {
    if cell_size.is_finite() && cell_size > 0.0 {
        Ok(())
    } else {
        Err(invalid_parameter(
            "cell_size",
            &cell_size,
            &"must be a positive finite length",
        ))
    }
}

/// Number of cells a sweep of `bounds` with `cell_size` produces
///
/// Equals `ceil(width / cell_size) * ceil(height / cell_size)`, or zero for a
/// box without area.
pub fn expected_cell_count(bounds: &BoundingBox, cell_size: f64) -> f64 {
    if bounds.is_degenerate() {
        return 0.0;
    }
    (bounds.width() / cell_size).ceil() * (bounds.height() / cell_size).ceil()
}

/// Lazily sweep `bounds` column by column
///
/// Emits one cell per `(x, y)` pair with `x < maxx` and `y < maxy`, all `y`
/// values for one `x` before the next `x`. Cells on the far edges may extend
/// past the box.
pub fn sweep(bounds: BoundingBox, cell_size: f64) -> impl Iterator<Item = Cell> {
    let rows = AxisSteps::new(bounds.min[1], bounds.max[1], cell_size);
    AxisSteps::new(bounds.min[0], bounds.max[0], cell_size)
        .flat_map(move |x| rows.clone().map(move |y| Cell::new(x, y, cell_size)))
}

/// Tile `bounds` with square cells of edge `cell_size`
///
/// The origin is always the lower-left corner of `bounds`. The union of the
/// returned cells covers the box and no two cells share interior area. A box
/// without area yields an empty grid.
///
/// # Errors
///
/// Returns an error if:
/// - `cell_size` is not a positive finite length
/// - `bounds` has non-finite or inverted corners
/// - The sweep would exceed `MAX_GRID_CELLS` cells
pub fn generate_grid(bounds: BoundingBox, cell_size: f64) -> Result<Grid> {
    validate_cell_size(cell_size)?;
    bounds.validate()?;

    if bounds.is_degenerate() {
        return Grid::empty(cell_size);
    }

    let expected = expected_cell_count(&bounds, cell_size);
    if expected > MAX_GRID_CELLS as f64 {
        return Err(invalid_parameter(
            "cell_size",
            &cell_size,
            &format!("sweep would produce {expected} cells (limit {MAX_GRID_CELLS})"),
        ));
    }

    let mut cells = Vec::with_capacity(expected as usize);
    cells.extend(sweep(bounds, cell_size));

    Ok(Grid { cell_size, cells })
}
