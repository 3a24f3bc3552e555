//! Command-line interface: pick grid sizes for a boundary and render the figures

use crate::io::configuration::{
    CELLS_OUTPUT_SUFFIX, DEFAULT_SEED, DENSITY_OUTPUT_SUFFIX, GRID_OUTPUT_SUFFIX,
    choropleth_title, overlay_title,
};
use crate::io::error::{Result, computation_error};
use crate::io::export::write_clipped_grid;
use crate::io::progress::ProgressManager;
use crate::io::region::{InputCrs, load_region};
use crate::io::render::{FigureSize, render_density_choropleth, render_grid_overlay, save_png};
use crate::pipeline::explorer::{Exploration, GridExplorer};
use crate::pipeline::selection::GridSize;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "innovation-grid")]
#[command(
    author,
    version,
    about = "Overlay a clipped square grid and simulated innovation density on a national boundary"
)]
/// Command-line arguments for the grid explorer
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Boundary GeoJSON file (Polygon/MultiPolygon features)
    #[arg(value_name = "BOUNDARY")]
    pub boundary: PathBuf,

    /// Grid edge length in kilometres (repeat for several figures)
    #[arg(short, long = "grid-size", value_enum, default_values_t = [GridSize::Km20])]
    pub grid_sizes: Vec<GridSize>,

    /// Random seed for reproducible density values
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Coordinate system of the boundary file
    #[arg(long, value_enum, default_value_t = InputCrs::Geographic)]
    pub input_crs: InputCrs,

    /// Directory for figures (defaults to the boundary's directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Only draw the grid overlay, skipping density sampling
    #[arg(long)]
    pub no_density: bool,

    /// Also export the clipped cells as GeoJSON
    #[arg(long)]
    pub geojson: bool,

    /// Suppress progress and summary output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Selected sizes with repeats removed, in the order given
    pub fn selected_sizes(&self) -> Vec<GridSize> {
        let mut sizes: Vec<GridSize> = Vec::with_capacity(self.grid_sizes.len());
        for size in &self.grid_sizes {
            if !sizes.contains(size) {
                sizes.push(*size);
            }
        }
        sizes
    }

    /// Log level for the `-v` count
    pub const fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// Install the stderr log subscriber at the `-v` level
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init_logging(&self) -> Result<()> {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(self.log_level())
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| computation_error("install log subscriber", &e))
    }
}

/// Paths written for one grid size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Grid overlay figure
    pub grid: PathBuf,
    /// Density choropleth figure
    pub density: PathBuf,
    /// Exported cells
    pub cells: PathBuf,
}

/// Loads the boundary once and renders every selected grid size
pub struct ExplorerRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl ExplorerRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Load the boundary and produce outputs for each selected grid size
    ///
    /// # Errors
    ///
    /// Returns an error if the boundary cannot be loaded, a grid cannot be
    /// generated, or an output cannot be written
    pub fn run(&mut self) -> Result<Vec<OutputPaths>> {
        let region = load_region(&self.cli.boundary, self.cli.input_crs)?;
        let mut explorer = GridExplorer::new(region, self.cli.seed);
        if self.cli.no_density {
            explorer = explorer.without_density();
        }

        let sizes = self.cli.selected_sizes();
        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(sizes.len());
        }

        let mut written = Vec::with_capacity(sizes.len());
        for size in sizes {
            written.push(self.run_size(&explorer, size)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        Ok(written)
    }

    fn run_size(&self, explorer: &GridExplorer, size: GridSize) -> Result<OutputPaths> {
        let start_time = Instant::now();
        if let Some(ref pm) = self.progress_manager {
            pm.start_grid(size);
        }

        let exploration = explorer.explore(size)?;
        let paths = self.output_paths(size);
        self.write_outputs(explorer, &exploration, size, &paths)?;

        let summary = exploration.summary();
        info!(
            %size,
            elapsed_ms = start_time.elapsed().as_millis(),
            "finished grid"
        );
        if let Some(ref pm) = self.progress_manager {
            pm.report(&summary.to_string());
            pm.complete_grid();
        }
        Ok(paths)
    }

    fn write_outputs(
        &self,
        explorer: &GridExplorer,
        exploration: &Exploration,
        size: GridSize,
        paths: &OutputPaths,
    ) -> Result<()> {
        let figure = FigureSize::default();
        let overlay = render_grid_overlay(
            explorer.region(),
            &exploration.clipped,
            &overlay_title(size.kilometers()),
            figure,
        )?;
        save_png(&overlay, &paths.grid)?;

        if let Some(densities) = &exploration.densities {
            let choropleth = render_density_choropleth(
                explorer.region(),
                &exploration.clipped,
                densities,
                &choropleth_title(size.kilometers()),
                figure,
            )?;
            save_png(&choropleth, &paths.density)?;
        }

        if self.cli.geojson {
            write_clipped_grid(
                &exploration.clipped,
                exploration.densities.as_deref(),
                &paths.cells,
            )?;
        }
        Ok(())
    }

    /// Where the outputs for `size` are written
    pub fn output_paths(&self, size: GridSize) -> OutputPaths {
        let directory = self.output_directory();
        let stem = self
            .cli
            .boundary
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        OutputPaths {
            grid: directory.join(format!("{stem}_{size}_{GRID_OUTPUT_SUFFIX}.png")),
            density: directory.join(format!("{stem}_{size}_{DENSITY_OUTPUT_SUFFIX}.png")),
            cells: directory.join(format!("{stem}_{size}_{CELLS_OUTPUT_SUFFIX}.geojson")),
        }
    }

    fn output_directory(&self) -> PathBuf {
        self.cli.output_dir.clone().unwrap_or_else(|| {
            self.cli
                .boundary
                .parent()
                .map_or_else(PathBuf::new, Path::to_path_buf)
        })
    }
}
