//! PNG figures: grid overlay and density choropleth
//!
//! Both figures carry a centred title above a plot area that the region's
//! bounding box is fitted into. Drawing an empty grid, or a region without
//! extent, still yields the titled figure with an empty plot.

use std::path::Path;

use ab_glyph::FontRef;
use image::RgbaImage;
use tracing::debug;

use crate::io::colormap::{ColorScale, viridis_reversed};
use crate::io::configuration::{
    BACKGROUND_COLOR, BOUNDARY_COLOR, CELL_EDGE_COLOR, CHOROPLETH_ALPHA, COLORBAR_GAP_PX,
    COLORBAR_LABEL, COLORBAR_LEGEND_PX, COLORBAR_SHRINK, COLORBAR_TICK_PX, COLORBAR_WIDTH_PX,
    FIGURE_HEIGHT_PX, FIGURE_MARGIN_PX, FIGURE_WIDTH_PX, GRID_LINE_COLOR, LABEL_FONT_PX,
    TEXT_COLOR, TITLE_BAND_PX, TITLE_FONT_PX,
};
use crate::io::error::{GridError, Result, WithPath, invalid_parameter};
use crate::io::raster::{PixelArea, Raster, Viewport, figure_font, text_extent};
use crate::spatial::clip::ClippedGrid;
use crate::spatial::region::Region;

/// Canvas dimensions of a figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for FigureSize {
    fn default() -> Self {
        Self {
            width: FIGURE_WIDTH_PX,
            height: FIGURE_HEIGHT_PX,
        }
    }
}

/// Where the title, the plot and the colour bar sit in a figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureLayout {
    /// Band above the plot holding the title
    pub title: PixelArea,
    /// Area the region is fitted into
    pub plot: PixelArea,
    /// Colour bar right of the plot, choropleths only
    pub colorbar: Option<PixelArea>,
}

impl FigureSize {
    /// Split the figure into title band, plot and, if asked for, a colour bar
    ///
    /// The colour bar is centred on the plot and followed by room for its
    /// tick values and rotated label.
    pub fn layout(self, with_colorbar: bool) -> FigureLayout {
        let margin = FIGURE_MARGIN_PX.min(self.width / 4).min(self.height / 4);
        let title_height = TITLE_BAND_PX.min(self.height / 5);
        let inner_width = self.width.saturating_sub(2 * margin);
        let reserved = if with_colorbar {
            COLORBAR_GAP_PX + COLORBAR_WIDTH_PX + COLORBAR_LEGEND_PX
        } else {
            0
        };

        let plot = PixelArea {
            x: margin,
            y: margin + title_height,
            width: inner_width.saturating_sub(reserved),
            height: self
                .height
                .saturating_sub(2 * margin)
                .saturating_sub(title_height),
        };
        let colorbar = with_colorbar.then(|| {
            let bar_height = (f64::from(plot.height) * COLORBAR_SHRINK).round() as u32;
            PixelArea {
                x: plot.right() + COLORBAR_GAP_PX,
                y: plot.y + plot.height.saturating_sub(bar_height) / 2,
                width: COLORBAR_WIDTH_PX,
                height: bar_height,
            }
        });

        FigureLayout {
            title: PixelArea {
                x: margin,
                y: margin,
                width: inner_width,
                height: title_height,
            },
            plot,
            colorbar,
        }
    }
}

/// Region outline in black with clipped cell outlines in red, under `title`
///
/// # Errors
///
/// Returns an error if the embedded figure font cannot be loaded
pub fn render_grid_overlay(
    region: &Region,
    clipped: &ClippedGrid,
    title: &str,
    size: FigureSize,
) -> Result<RgbaImage> {
    let font = figure_font()?;
    let layout = size.layout(false);
    let mut raster = Raster::new(size.width, size.height, BACKGROUND_COLOR);
    draw_title(&mut raster, &layout, title, &font);

    let Some(bounds) = region.bounds() else {
        return Ok(raster.into_image());
    };
    let viewport = Viewport::fit(&bounds, layout.plot);

    for cell in clipped {
        raster.stroke_multi_polygon(&cell.geometry, &viewport, GRID_LINE_COLOR);
    }
    raster.stroke_multi_polygon(region.boundary(), &viewport, BOUNDARY_COLOR);

    debug!(cells = clipped.len(), "rendered grid overlay");
    Ok(raster.into_image())
}

/// Clipped cells coloured by density on the reversed viridis ramp, with a
/// labelled colour bar, under `title`
///
/// # Errors
///
/// Returns an error if:
/// - `densities` does not hold exactly one value per clipped cell
/// - The embedded figure font cannot be loaded
pub fn render_density_choropleth(
    region: &Region,
    clipped: &ClippedGrid,
    densities: &[u32],
    title: &str,
    size: FigureSize,
) -> Result<RgbaImage> {
    if densities.len() != clipped.len() {
        return Err(invalid_parameter(
            "densities",
            &densities.len(),
            &format!("expected one value per clipped cell ({})", clipped.len()),
        ));
    }

    let font = figure_font()?;
    let layout = size.layout(true);
    let mut raster = Raster::new(size.width, size.height, BACKGROUND_COLOR);
    draw_title(&mut raster, &layout, title, &font);

    let Some(bounds) = region.bounds() else {
        return Ok(raster.into_image());
    };
    let viewport = Viewport::fit(&bounds, layout.plot);

    if let Some(scale) = ColorScale::from_values(densities) {
        let alpha = (CHOROPLETH_ALPHA * 255.0).round() as u8;
        for (cell, &value) in clipped.iter().zip(densities) {
            let [r, g, b, _] = scale.color(f64::from(value));
            raster.fill_multi_polygon(&cell.geometry, &viewport, [r, g, b, alpha]);
        }
        for cell in clipped {
            raster.stroke_multi_polygon(&cell.geometry, &viewport, CELL_EDGE_COLOR);
        }
        if let Some(bar) = layout.colorbar {
            draw_colorbar(&mut raster, bar, scale, &font);
        }
    }
    raster.stroke_multi_polygon(region.boundary(), &viewport, BOUNDARY_COLOR);

    debug!(cells = clipped.len(), "rendered density choropleth");
    Ok(raster.into_image())
}

// Centred over the plot, vertically centred in the title band
fn draw_title(raster: &mut Raster, layout: &FigureLayout, title: &str, font: &FontRef<'_>) {
    let (width, height) = text_extent(title, TITLE_FONT_PX, font);
    let x = i64::from(layout.plot.x) + (i64::from(layout.plot.width) - i64::from(width)) / 2;
    let y = i64::from(layout.title.y) + (i64::from(layout.title.height) - i64::from(height)) / 2;
    raster.draw_text(title, [x as i32, y as i32], TITLE_FONT_PX, font, TEXT_COLOR);
}

// Vertical ramp with the highest values at the top, min/max ticks and a rotated label
fn draw_colorbar(raster: &mut Raster, bar: PixelArea, scale: ColorScale, font: &FontRef<'_>) {
    if bar.height < 2 {
        return;
    }

    let last_row = bar.height - 1;
    for row in 0..bar.height {
        let t = 1.0 - f64::from(row) / f64::from(last_row);
        let [r, g, b] = viridis_reversed(t);
        let stripe = PixelArea {
            y: bar.y + row,
            height: 1,
            ..bar
        };
        raster.fill_rect(stripe, [r, g, b, 255]);
    }
    raster.stroke_rect(bar, BOUNDARY_COLOR);

    let tick_start = bar.right() as f32;
    let tick_end = (bar.right() + COLORBAR_TICK_PX) as f32;
    for (value, row) in [(scale.max, bar.y), (scale.min, bar.y + last_row)] {
        raster.draw_segment(
            [tick_start, row as f32],
            [tick_end, row as f32],
            BOUNDARY_COLOR,
        );

        let text = value.to_string();
        let (_, text_height) = text_extent(&text, LABEL_FONT_PX, font);
        let origin = [
            (bar.right() + 2 * COLORBAR_TICK_PX) as i32,
            row as i32 - (text_height / 2) as i32,
        ];
        raster.draw_text(&text, origin, LABEL_FONT_PX, font, TEXT_COLOR);
    }

    // Turned a quarter, the label's width runs down the bar
    let (label_width, label_height) = text_extent(COLORBAR_LABEL, LABEL_FONT_PX, font);
    let origin = [
        i64::from(bar.right() + COLORBAR_LEGEND_PX) - i64::from(label_height),
        i64::from(bar.y) + (i64::from(bar.height) - i64::from(label_width)) / 2,
    ];
    raster.draw_vertical_text(COLORBAR_LABEL, origin, LABEL_FONT_PX, font, TEXT_COLOR);
}

/// Write a figure as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }

    image
        .save(output_path)
        .map_err(|e| GridError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    debug!(path = %output_path.display(), "saved figure");
    Ok(())
}
