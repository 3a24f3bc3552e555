//! Boundary loading from GeoJSON with reprojection onto the equal-area plane

use std::path::Path;

use clap::ValueEnum;
use geo::{Coord, LineString, MultiPolygon, Polygon, coord};
use geojson::{GeoJson, Geometry, Value};
use tracing::{debug, info};

use crate::io::error::{Result, WithPath, region_error};
use crate::math::projection::AlbersEqualArea;
use crate::spatial::region::Region;

/// Coordinate system of the boundary file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputCrs {
    /// WGS84 longitude/latitude, reprojected to EPSG:5070
    #[default]
    Geographic,
    /// Already planar, in metres; used as is
    Projected,
}

/// Read a boundary file and bring it onto the planar grid coordinates
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The content is not GeoJSON or holds no polygons
/// - Geographic input has coordinates outside longitude/latitude range
pub fn load_region(path: &Path, crs: InputCrs) -> Result<Region> {
    let text = std::fs::read_to_string(path).with_path(path, "read boundary")?;
    let region = parse_region(&text, path, crs)?;
    info!(
        path = %path.display(),
        polygons = region.boundary().0.len(),
        "loaded boundary"
    );
    Ok(region)
}

/// Parse GeoJSON text into a region; `source` only labels errors
///
/// # Errors
///
/// Same as [`load_region`], minus the file read
pub fn parse_region(text: &str, source: &Path, crs: InputCrs) -> Result<Region> {
    let document = text
        .parse::<GeoJson>()
        .map_err(|e| region_error(source, &e))?;
    let boundary = boundary_from_geojson(&document).map_err(|reason| region_error(source, &reason))?;

    match crs {
        InputCrs::Projected => Ok(Region::new(boundary)),
        InputCrs::Geographic => {
            if let Some(bad) = first_non_geographic(&boundary) {
                return Err(region_error(
                    source,
                    &format!(
                        "coordinate ({}, {}) is not longitude/latitude; use projected input",
                        bad.x, bad.y
                    ),
                ));
            }
            let projection = AlbersEqualArea::conus()?;
            debug!("reprojecting boundary to EPSG:5070");
            Ok(Region::new(boundary).map_coords(|c| projection.project(c)))
        }
    }
}

/// Gather every polygon in a GeoJSON document into one multipolygon
///
/// Features without geometry are skipped; any non-polygonal geometry is an error.
///
/// # Errors
///
/// Returns a description of the first offending geometry, or of an empty document
pub fn boundary_from_geojson(document: &GeoJson) -> std::result::Result<MultiPolygon<f64>, String> {
    let mut polygons = Vec::new();
    match document {
        GeoJson::Geometry(geometry) => collect_polygons(geometry, &mut polygons)?,
        GeoJson::Feature(feature) => {
            if let Some(geometry) = &feature.geometry {
                collect_polygons(geometry, &mut polygons)?;
            }
        }
        GeoJson::FeatureCollection(collection) => {
            for geometry in collection.features.iter().filter_map(|f| f.geometry.as_ref()) {
                collect_polygons(geometry, &mut polygons)?;
            }
        }
    }

    if polygons.is_empty() {
        return Err("document contains no polygon geometry".to_string());
    }
    Ok(MultiPolygon::new(polygons))
}

fn collect_polygons(
    geometry: &Geometry,
    polygons: &mut Vec<Polygon<f64>>,
) -> std::result::Result<(), String> {
    match &geometry.value {
        Value::Polygon(rings) => polygons.push(to_polygon(rings)?),
        Value::MultiPolygon(parts) => {
            for rings in parts {
                polygons.push(to_polygon(rings)?);
            }
        }
        Value::GeometryCollection(members) => {
            for member in members {
                collect_polygons(member, polygons)?;
            }
        }
        _ => return Err("boundary must contain only polygonal geometry".to_string()),
    }
    Ok(())
}

fn to_polygon(rings: &[Vec<Vec<f64>>]) -> std::result::Result<Polygon<f64>, String> {
    let mut rings = rings.iter().map(|ring| to_line_string(ring));
    let exterior = rings
        .next()
        .ok_or_else(|| "polygon without exterior ring".to_string())??;
    let interiors = rings.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn to_line_string(positions: &[Vec<f64>]) -> std::result::Result<LineString<f64>, String> {
    positions
        .iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] if x.is_finite() && y.is_finite() => Ok(coord! { x: *x, y: *y }),
            _ => Err(format!("invalid position {position:?}")),
        })
        .collect::<std::result::Result<Vec<Coord<f64>>, _>>()
        .map(LineString::new)
}

fn first_non_geographic(boundary: &MultiPolygon<f64>) -> Option<Coord<f64>> {
    boundary
        .0
        .iter()
        .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()))
        .flat_map(|ring| ring.0.iter().copied())
        .find(|c| c.x.abs() > 180.0 || c.y.abs() > 90.0)
}
