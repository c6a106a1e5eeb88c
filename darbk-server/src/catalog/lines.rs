//! Line geometry decoding from GeoJSON.

use geojson::{Feature, GeoJson};
use tracing::{debug, warn};

use crate::domain::{GeoPoint, LineGeometry, UNKNOWN_LINE_COLOR};

use super::error::CatalogError;

/// Decode a GeoJSON document into line geometries.
///
/// Accepts a FeatureCollection (or a single Feature). Each feature needs a
/// `metrolinename` property and a `LineString` or `MultiLineString` geometry;
/// multi-part geometries are concatenated in order. Coordinates are converted
/// from GeoJSON `[lon, lat]` to [`GeoPoint`]. Features that don't qualify are
/// logged and skipped.
pub fn decode_lines(body: &str) -> Result<Vec<LineGeometry>, CatalogError> {
    let geojson: GeoJson = body.parse().map_err(|e: geojson::Error| CatalogError::GeoJson {
        message: e.to_string(),
    })?;

    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(CatalogError::GeoJson {
                message: "expected a Feature or FeatureCollection".to_string(),
            });
        }
    };

    let total = features.len();
    let lines: Vec<LineGeometry> = features
        .into_iter()
        .enumerate()
        .filter_map(|(i, feature)| {
            let line = feature_to_line(feature);
            if line.is_none() {
                warn!(index = i, "Skipping line feature without name or line geometry");
            }
            line
        })
        .collect();

    debug!(total, decoded = lines.len(), "Decoded line geometries");
    Ok(lines)
}

fn feature_to_line(feature: Feature) -> Option<LineGeometry> {
    let name = string_property(&feature, "metrolinename")?;
    let name_secondary = string_property(&feature, "metrolinenamear").unwrap_or_default();
    let color = string_property(&feature, "m_linecolorcode")
        .and_then(|c| normalize_color(&c))
        .unwrap_or_else(|| UNKNOWN_LINE_COLOR.to_string());

    let points: Vec<GeoPoint> = match feature.geometry?.value {
        geojson::Value::LineString(positions) => to_points(&positions),
        geojson::Value::MultiLineString(parts) => parts.iter().flat_map(|p| to_points(p)).collect(),
        _ => return None,
    };

    Some(LineGeometry {
        name,
        name_secondary,
        color,
        points,
    })
}

fn string_property(feature: &Feature, key: &str) -> Option<String> {
    feature
        .property(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn to_points(positions: &[Vec<f64>]) -> Vec<GeoPoint> {
    positions
        .iter()
        .filter_map(|p| GeoPoint::from_lon_lat(p))
        .collect()
}

/// Normalise a colour to lowercase `#rrggbb`.
fn normalize_color(raw: &str) -> Option<String> {
    let hex = raw.trim().trim_start_matches('#');
    (hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .then(|| format!("#{}", hex.to_ascii_lowercase()))
}
