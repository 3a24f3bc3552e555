//! World-to-pixel mapping and vector drawing onto RGBA images
//!
//! Drawing goes through `imageproc` on a [`Blend`] surface, so translucent
//! colours composite over what is already there. Polygons with holes are the
//! one exception: `draw_polygon_mut` has no notion of interior rings, so those
//! parts are filled with an even-odd scanline instead.

use ab_glyph::{FontRef, PxScale};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use image::{Rgba, RgbaImage, imageops};
use imageproc::drawing::{
    Blend, Canvas, draw_filled_rect_mut, draw_hollow_polygon_mut, draw_hollow_rect_mut,
    draw_line_segment_mut, draw_polygon_mut, draw_text_mut, text_size,
};
use imageproc::point::Point;
use imageproc::rect::Rect;

use crate::io::error::{Result, computation_error};
use crate::spatial::bounds::BoundingBox;

static FIGURE_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// DejaVu Sans, embedded for titles and legend text
///
/// # Errors
///
/// Returns an error if the embedded font data cannot be parsed
pub fn figure_font() -> Result<FontRef<'static>> {
    FontRef::try_from_slice(FIGURE_FONT).map_err(|e| computation_error("load figure font", &e))
}

/// Pixel extent of `text` at a glyph height of `px`
pub fn text_extent(text: &str, px: f32, font: &FontRef<'_>) -> (u32, u32) {
    text_size(PxScale::from(px), font, text)
}

/// Rectangle of the image reserved for a plot, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelArea {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl PixelArea {
    /// First column right of the area
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// First row below the area
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    fn to_rect(self) -> Option<Rect> {
        (self.width > 0 && self.height > 0)
            .then(|| Rect::at(self.x as i32, self.y as i32).of_size(self.width, self.height))
    }
}

/// Uniform scaling of planar coordinates into a pixel area, y pointing down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    min_x: f64,
    max_y: f64,
    scale: f64,
    offset: [f64; 2],
}

impl Viewport {
    /// Fit `bounds` into `area`, keeping the aspect ratio and centring the slack
    pub fn fit(bounds: &BoundingBox, area: PixelArea) -> Self {
        let width = f64::from(area.width);
        let height = f64::from(area.height);

        let scale_x = (bounds.width() > 0.0).then(|| width / bounds.width());
        let scale_y = (bounds.height() > 0.0).then(|| height / bounds.height());
        let scale = match (scale_x, scale_y) {
            (Some(sx), Some(sy)) => sx.min(sy),
            (Some(s), None) | (None, Some(s)) => s,
            (None, None) => 1.0,
        };

        let offset = [
            f64::from(area.x) + bounds.width().mul_add(-scale, width) / 2.0,
            f64::from(area.y) + bounds.height().mul_add(-scale, height) / 2.0,
        ];

        Self {
            min_x: bounds.min[0],
            max_y: bounds.max[1],
            scale,
            offset,
        }
    }

    /// Pixels per planar unit
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Pixel position of a planar coordinate
    pub fn to_pixel(&self, point: Coord<f64>) -> [f64; 2] {
        [
            (point.x - self.min_x).mul_add(self.scale, self.offset[0]),
            (self.max_y - point.y).mul_add(self.scale, self.offset[1]),
        ]
    }

    fn to_point(&self, point: Coord<f64>) -> Point<f32> {
        let [x, y] = self.to_pixel(point);
        Point::new(x as f32, y as f32)
    }
}

/// Figure surface that alpha-blends everything drawn onto it
pub struct Raster {
    surface: Blend<RgbaImage>,
    background: Rgba<u8>,
}

impl Raster {
    /// Surface of the given size filled with `background`
    pub fn new(width: u32, height: u32, background: [u8; 4]) -> Self {
        Self {
            surface: Blend(RgbaImage::from_pixel(width, height, Rgba(background))),
            background: Rgba(background),
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.surface.0.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.surface.0.height()
    }

    /// Borrow the image drawn so far
    pub const fn image(&self) -> &RgbaImage {
        &self.surface.0
    }

    /// Finish drawing and take the image
    pub fn into_image(self) -> RgbaImage {
        self.surface.0
    }

    /// Line between two pixel positions
    pub fn draw_segment(&mut self, from: [f32; 2], to: [f32; 2], color: [u8; 4]) {
        draw_line_segment_mut(
            &mut self.surface,
            (from[0], from[1]),
            (to[0], to[1]),
            Rgba(color),
        );
    }

    /// Solid rectangle; empty areas draw nothing
    pub fn fill_rect(&mut self, area: PixelArea, color: [u8; 4]) {
        if let Some(rect) = area.to_rect() {
            draw_filled_rect_mut(&mut self.surface, rect, Rgba(color));
        }
    }

    /// One-pixel rectangle outline along the inside of `area`
    pub fn stroke_rect(&mut self, area: PixelArea, color: [u8; 4]) {
        if let Some(rect) = area.to_rect() {
            draw_hollow_rect_mut(&mut self.surface, rect, Rgba(color));
        }
    }

    /// Outline every ring of `polygon`
    pub fn stroke_polygon(&mut self, polygon: &Polygon<f64>, viewport: &Viewport, color: [u8; 4]) {
        for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
            let points = open_ring(ring.coords().map(|c| viewport.to_point(*c)).collect());
            if points.len() >= 2 {
                draw_hollow_polygon_mut(&mut self.surface, &points, Rgba(color));
            }
        }
    }

    /// Outline every ring of every part of `shape`
    pub fn stroke_multi_polygon(
        &mut self,
        shape: &MultiPolygon<f64>,
        viewport: &Viewport,
        color: [u8; 4],
    ) {
        for polygon in &shape.0 {
            self.stroke_polygon(polygon, viewport, color);
        }
    }

    /// Fill every part of `shape`, leaving holes empty
    pub fn fill_multi_polygon(
        &mut self,
        shape: &MultiPolygon<f64>,
        viewport: &Viewport,
        color: [u8; 4],
    ) {
        for polygon in &shape.0 {
            if polygon.interiors().is_empty() {
                let corners = open_ring(
                    polygon
                        .exterior()
                        .coords()
                        .map(|c| {
                            let [x, y] = viewport.to_pixel(*c);
                            Point::new(x.round() as i32, y.round() as i32)
                        })
                        .collect(),
                );
                if corners.len() >= 3 {
                    draw_polygon_mut(&mut self.surface, &corners, Rgba(color));
                }
            } else {
                self.fill_even_odd(polygon, viewport, color);
            }
        }
    }

    // Pixels whose centres fall inside an odd number of rings
    fn fill_even_odd(&mut self, polygon: &Polygon<f64>, viewport: &Viewport, color: [u8; 4]) {
        let edges: Vec<([f64; 2], [f64; 2])> = std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .flat_map(LineString::lines)
            .map(|segment| (viewport.to_pixel(segment.start), viewport.to_pixel(segment.end)))
            .filter(|(a, b)| (a[1] - b[1]).abs() > f64::EPSILON)
            .collect();

        let Some((top, bottom)) = edges.iter().fold(None, |range, (a, b)| {
            let low = a[1].min(b[1]);
            let high = a[1].max(b[1]);
            Some(match range {
                None => (low, high),
                Some((lo, hi)) => (f64::min(lo, low), f64::max(hi, high)),
            })
        }) else {
            return;
        };

        let first_row = (top.floor() as i64).max(0);
        let last_row = (bottom.ceil() as i64).min(i64::from(self.height()) - 1);
        let last_col = i64::from(self.width()) - 1;
        let mut crossings = Vec::new();

        for row in first_row..=last_row {
            let scan_y = row as f64 + 0.5;
            crossings.clear();
            for (a, b) in &edges {
                let (upper, lower) = if a[1] < b[1] { (a, b) } else { (b, a) };
                if scan_y >= upper[1] && scan_y < lower[1] {
                    let t = (scan_y - upper[1]) / (lower[1] - upper[1]);
                    crossings.push(t.mul_add(lower[0] - upper[0], upper[0]));
                }
            }
            crossings.sort_by(f64::total_cmp);

            for span in crossings.chunks_exact(2) {
                if let [start, end] = span {
                    let from = ((start - 0.5).ceil() as i64).max(0);
                    let to = ((end - 0.5).floor() as i64).min(last_col);
                    for col in from..=to {
                        self.surface.draw_pixel(col as u32, row as u32, Rgba(color));
                    }
                }
            }
        }
    }

    /// Horizontal text with its top-left corner at `origin`
    pub fn draw_text(
        &mut self,
        text: &str,
        origin: [i32; 2],
        px: f32,
        font: &FontRef<'_>,
        color: [u8; 4],
    ) {
        draw_text_mut(
            &mut self.surface,
            Rgba(color),
            origin[0],
            origin[1],
            PxScale::from(px),
            font,
            text,
        );
    }

    /// Text turned a quarter counter-clockwise, reading upward, with its top-left corner at `origin`
    ///
    /// The turned text replaces the pixels beneath it with the background.
    pub fn draw_vertical_text(
        &mut self,
        text: &str,
        origin: [i64; 2],
        px: f32,
        font: &FontRef<'_>,
        color: [u8; 4],
    ) {
        let (width, height) = text_extent(text, px, font);
        if width == 0 || height == 0 {
            return;
        }

        let mut label = RgbaImage::from_pixel(width, height, self.background);
        draw_text_mut(&mut label, Rgba(color), 0, 0, PxScale::from(px), font, text);
        let turned = imageops::rotate270(&label);
        imageops::replace(&mut self.surface.0, &turned, origin[0], origin[1]);
    }
}

// Drop repeated vertices and the closing vertex, which imageproc adds itself
fn open_ring<T: PartialEq>(mut points: Vec<T>) -> Vec<T> {
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}
