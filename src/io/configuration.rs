//! Constants and runtime configuration defaults

// Sampling
/// Fixed seed for reproducible density samples
pub const DEFAULT_SEED: u64 = 42;
/// Mean of the Poisson distribution behind simulated densities
pub const POISSON_MEAN: f64 = 10.0;

// Safety limit to prevent excessive memory allocation
/// Maximum number of cells a single sweep may generate
pub const MAX_GRID_CELLS: usize = 4_000_000;

/// Metres per kilometre, for converting grid size selections
pub const METERS_PER_KILOMETER: f64 = 1_000.0;

// Figure layout
/// Rendered figure width in pixels
pub const FIGURE_WIDTH_PX: u32 = 1000;
/// Rendered figure height in pixels
pub const FIGURE_HEIGHT_PX: u32 = 600;
/// Blank border around the plotted geometry
pub const FIGURE_MARGIN_PX: u32 = 20;
/// Width of the choropleth colour bar
pub const COLORBAR_WIDTH_PX: u32 = 24;
/// Space between the map and the colour bar
pub const COLORBAR_GAP_PX: u32 = 30;
/// Colour bar height as a fraction of the plot height
pub const COLORBAR_SHRINK: f64 = 0.6;
/// Room right of the colour bar for tick values and the rotated label
pub const COLORBAR_LEGEND_PX: u32 = 72;
/// Length of the min/max tick marks on the colour bar
pub const COLORBAR_TICK_PX: u32 = 4;
/// Height of the title band above the plot
pub const TITLE_BAND_PX: u32 = 36;
/// Title glyph height
pub const TITLE_FONT_PX: f32 = 20.0;
/// Colour bar label and tick glyph height
pub const LABEL_FONT_PX: f32 = 14.0;
/// Opacity of filled choropleth cells
pub const CHOROPLETH_ALPHA: f64 = 0.9;

// Colours
/// Figure background
pub const BACKGROUND_COLOR: [u8; 4] = [255, 255, 255, 255];
/// Grid cell outlines on the overlay figure
pub const GRID_LINE_COLOR: [u8; 4] = [255, 0, 0, 255];
/// Region outline on both figures
pub const BOUNDARY_COLOR: [u8; 4] = [0, 0, 0, 255];
/// Cell outlines on the choropleth figure
pub const CELL_EDGE_COLOR: [u8; 4] = [255, 255, 255, 255];
/// Titles, tick values and the colour bar label
pub const TEXT_COLOR: [u8; 4] = [0, 0, 0, 255];

// Figure text
/// Label beside the choropleth colour bar
pub const COLORBAR_LABEL: &str = "Simulated Innovation Density";

/// Title of the grid overlay figure for a cell edge in kilometres
pub fn overlay_title(kilometers: u32) -> String {
    format!("{kilometers}km Grid Overlay of U.S.")
}

/// Title of the density choropleth figure for a cell edge in kilometres
pub fn choropleth_title(kilometers: u32) -> String {
    format!("Simulated Innovation Density ({kilometers}km Grid)")
}

// Output settings
/// Suffix for the grid overlay figure
pub const GRID_OUTPUT_SUFFIX: &str = "grid";
/// Suffix for the density choropleth figure
pub const DENSITY_OUTPUT_SUFFIX: &str = "density";
/// Suffix for the exported cell collection
pub const CELLS_OUTPUT_SUFFIX: &str = "cells";
/// Feature property holding each cell's simulated density
pub const DENSITY_PROPERTY: &str = "hidden_champions";
/// Feature property holding each cell's position in the sweep
pub const CELL_INDEX_PROPERTY: &str = "cell_index";
