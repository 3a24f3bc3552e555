//! GeoJSON export of clipped grids
//!
//! Coordinates are written in the planar metres used for the sweep, not
//! reprojected back to longitude/latitude.

use std::path::Path;

use geo::{LineString, MultiPolygon, Polygon};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde_json::json;
use tracing::debug;

use crate::io::configuration::{CELL_INDEX_PROPERTY, DENSITY_PROPERTY};
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::spatial::clip::ClippedGrid;

/// One feature per clipped cell carrying its sweep index and, if given, its density
///
/// # Errors
///
/// Returns an error if `densities` does not hold exactly one value per clipped cell
pub fn clipped_grid_to_geojson(
    clipped: &ClippedGrid,
    densities: Option<&[u32]>,
) -> Result<GeoJson> {
    if let Some(values) = densities {
        if values.len() != clipped.len() {
            return Err(invalid_parameter(
                "densities",
                &values.len(),
                &format!("expected one value per clipped cell ({})", clipped.len()),
            ));
        }
    }

    let features = clipped
        .iter()
        .enumerate()
        .map(|(position, cell)| {
            let mut properties = JsonObject::new();
            properties.insert(CELL_INDEX_PROPERTY.to_string(), json!(cell.index));
            if let Some(value) = densities.and_then(|values| values.get(position)) {
                properties.insert(DENSITY_PROPERTY.to_string(), json!(value));
            }

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(multi_polygon_value(&cell.geometry))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    Ok(GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }))
}

/// Write the clipped grid as a GeoJSON feature collection
///
/// # Errors
///
/// Returns an error if:
/// - `densities` does not match the number of clipped cells
/// - The parent directory or the file cannot be written
pub fn write_clipped_grid(
    clipped: &ClippedGrid,
    densities: Option<&[u32]>,
    output_path: &Path,
) -> Result<()> {
    let document = clipped_grid_to_geojson(clipped, densities)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }
    std::fs::write(output_path, document.to_string()).with_path(output_path, "write cells")?;

    debug!(path = %output_path.display(), cells = clipped.len(), "exported cells");
    Ok(())
}

fn multi_polygon_value(shape: &MultiPolygon<f64>) -> Value {
    Value::MultiPolygon(shape.0.iter().map(polygon_rings).collect())
}

fn polygon_rings(polygon: &Polygon<f64>) -> Vec<Vec<Vec<f64>>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(ring_positions)
        .collect()
}

fn ring_positions(ring: &LineString<f64>) -> Vec<Vec<f64>> {
    ring.0.iter().map(|c| vec![c.x, c.y]).collect()
}
