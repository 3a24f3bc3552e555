//! One exploration session over a loaded region
//!
//! A session owns the region and the density seed. Each grid size selection
//! recomputes the sweep, the clip and the density values from scratch; nothing
//! is cached between selections, so independent sessions never share state.

use tracing::{debug, info, warn};

use crate::analysis::density::sample_density;
use crate::analysis::statistics::{GridSummary, summarize};
use crate::io::configuration::DEFAULT_SEED;
use crate::io::error::Result;
use crate::pipeline::selection::GridSize;
use crate::spatial::clip::{BooleanIntersector, ClippedCell, ClippedGrid, Intersector, clip_with};
use crate::spatial::grid::{Grid, generate_grid};
use crate::spatial::region::Region;

/// Output of one grid size selection
#[derive(Debug, Clone, PartialEq)]
pub struct Exploration {
    /// Unclipped sweep over the region's bounding box
    pub grid: Grid,
    /// Sweep restricted to the region
    pub clipped: ClippedGrid,
    /// One density value per clipped cell, in the same order
    pub densities: Option<Vec<u32>>,
}

impl Exploration {
    /// Edge length of every cell, in metres
    pub const fn cell_size(&self) -> f64 {
        self.grid.cell_size()
    }

    /// Clipped cells paired with their density values
    pub fn density_cells(&self) -> Option<impl Iterator<Item = (&ClippedCell, u32)>> {
        self.densities
            .as_ref()
            .map(|values| self.clipped.iter().zip(values.iter().copied()))
    }

    /// Counts, areas and density range of this run
    pub fn summary(&self) -> GridSummary {
        summarize(&self.clipped, self.densities.as_deref())
    }
}

/// Generates, clips and samples grids over a fixed region
#[derive(Debug, Clone)]
pub struct GridExplorer {
    region: Region,
    seed: u64,
    sample_densities: bool,
}

impl GridExplorer {
    /// Create a session sampling densities with `seed`
    pub const fn new(region: Region, seed: u64) -> Self {
        Self {
            region,
            seed,
            sample_densities: true,
        }
    }

    /// Create a session using the default seed
    pub const fn with_default_seed(region: Region) -> Self {
        Self::new(region, DEFAULT_SEED)
    }

    /// Skip density sampling, producing only the grid and its clip
    #[must_use]
    pub fn without_density(mut self) -> Self {
        self.sample_densities = false;
        self
    }

    /// Region every grid is derived from
    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// Seed used for density sampling
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Run the full chain for one of the selectable sizes
    ///
    /// # Errors
    ///
    /// Returns an error if grid generation or density sampling fails
    pub fn explore(&self, size: GridSize) -> Result<Exploration> {
        self.explore_cell_size(size.meters())
    }

    /// Run the full chain for an arbitrary edge length in metres
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `cell_size` is not a positive finite length
    /// - The sweep would exceed the cell limit
    /// - Density sampling fails
    pub fn explore_cell_size(&self, cell_size: f64) -> Result<Exploration> {
        self.explore_with(cell_size, &BooleanIntersector)
    }

    /// [`GridExplorer::explore_cell_size`] with a caller-provided intersection routine
    ///
    /// # Errors
    ///
    /// Same as [`GridExplorer::explore_cell_size`]
    pub fn explore_with<I: Intersector + ?Sized>(
        &self,
        cell_size: f64,
        intersector: &I,
    ) -> Result<Exploration> {
        let grid = match self.region.bounds() {
            Some(bounds) => generate_grid(bounds, cell_size)?,
            None => {
                warn!("region has no extent, grid is empty");
                Grid::empty(cell_size)?
            }
        };
        debug!(cell_size, cells = grid.len(), "generated grid");

        let clipped = clip_with(&grid, &self.region, intersector);
        debug!(
            cell_size,
            retained = clipped.len(),
            dropped = grid.len() - clipped.len(),
            "clipped grid"
        );

        let densities = self
            .sample_densities
            .then(|| sample_density(clipped.len(), self.seed))
            .transpose()?;

        let exploration = Exploration {
            grid,
            clipped,
            densities,
        };
        info!(summary = %exploration.summary(), "explored grid");
        Ok(exploration)
    }
}
