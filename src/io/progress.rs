//! Progress display across the selected grid sizes

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

use crate::pipeline::selection::GridSize;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Grids: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar advancing once per grid size
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager with no bar yet
    pub const fn new() -> Self {
        Self { bar: None }
    }

    /// Show a bar sized for `grid_count` runs
    pub fn initialize(&mut self, grid_count: usize) {
        let bar = ProgressBar::new(grid_count as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        self.bar = Some(bar);
    }

    /// Label the bar with the grid size being computed
    pub fn start_grid(&self, size: GridSize) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("{size} cells"));
        }
    }

    /// Advance past a finished grid size
    pub fn complete_grid(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Print a line above the bar, or straight to stdout without one
    // Allow print for the per-grid summary shown to the user
    #[allow(clippy::print_stdout)]
    pub fn report(&self, line: &str) {
        match &self.bar {
            Some(bar) => bar.println(line),
            None => println!("{line}"),
        }
    }

    /// Clean up the progress display
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message("all grids rendered");
        }
    }
}
