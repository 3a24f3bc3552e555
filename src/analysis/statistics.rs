//! Per-run summaries of clipped grids and their density values

use std::fmt;

use crate::io::configuration::METERS_PER_KILOMETER;
use crate::spatial::clip::ClippedGrid;

/// Range and average of a density sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensitySummary {
    /// Smallest sampled value
    pub min: u32,
    /// Largest sampled value
    pub max: u32,
    /// Arithmetic mean
    pub mean: f64,
    /// Sum of all values
    pub total: u64,
}

impl DensitySummary {
    /// Summarize `values`, or `None` when there are none
    pub fn from_values(values: &[u32]) -> Option<Self> {
        let min = values.iter().copied().min()?;
        let max = values.iter().copied().max()?;
        let total: u64 = values.iter().map(|&v| u64::from(v)).sum();
        let mean = total as f64 / values.len() as f64;

        Some(Self {
            min,
            max,
            mean,
            total,
        })
    }
}

/// What one grid size produced after clipping
#[derive(Debug, Clone, PartialEq)]
pub struct GridSummary {
    /// Cell edge length in metres
    pub cell_size: f64,
    /// Cells in the unclipped sweep
    pub generated_cells: usize,
    /// Cells with area inside the region
    pub retained_cells: usize,
    /// Retained cells cut by the region boundary
    pub partial_cells: usize,
    /// Total retained area in square metres
    pub clipped_area: f64,
    /// Density statistics when values were sampled
    pub density: Option<DensitySummary>,
}

impl GridSummary {
    /// Fraction of generated cells that survived clipping
    pub fn retention(&self) -> f64 {
        if self.generated_cells == 0 {
            0.0
        } else {
            self.retained_cells as f64 / self.generated_cells as f64
        }
    }
}

/// Gather counts and areas of `clipped`, plus density statistics if given
pub fn summarize(clipped: &ClippedGrid, densities: Option<&[u32]>) -> GridSummary {
    let partial_cells = clipped.iter().filter(|cell| !cell.is_whole()).count();

    GridSummary {
        cell_size: clipped.cell_size(),
        generated_cells: clipped.generated_count(),
        retained_cells: clipped.len(),
        partial_cells,
        clipped_area: clipped.area(),
        density: densities.and_then(DensitySummary::from_values),
    }
}

impl fmt::Display for GridSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0} km grid: {}/{} cells retained ({} partial), {:.0} km² clipped",
            self.cell_size / METERS_PER_KILOMETER,
            self.retained_cells,
            self.generated_cells,
            self.partial_cells,
            self.clipped_area / METERS_PER_KILOMETER.powi(2)
        )?;
        if let Some(density) = &self.density {
            write!(
                f,
                ", density {}..{} (mean {:.2})",
                density.min, density.max, density.mean
            )?;
        }
        Ok(())
    }
}
