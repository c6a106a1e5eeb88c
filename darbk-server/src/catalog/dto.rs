//! Station feed decoding.
//!
//! Decoding is two-stage. Each feed entry is first read into a [`RawStation`]
//! where every field is optional and a value of the wrong type reads as
//! absent. [`RawStation::into_record`] then substitutes defaults for the
//! descriptive fields and builds an immutable [`StationRecord`]. Only the
//! code and the location are required; an entry missing either is skipped,
//! never failing the whole feed.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{GeoPoint, InvalidStationCode, LocalizedName, StationCode, StationRecord};

use super::error::CatalogError;

/// Default for a missing Latin-script name or line field.
pub const DEFAULT_NAME: &str = "Unknown";

/// Default for a missing Arabic-script name.
pub const DEFAULT_NAME_SECONDARY: &str = "غير معروف";

/// Top-level shape of the station feed.
#[derive(Debug, Deserialize)]
struct StationsPayload {
    results: Vec<Value>,
}

/// A station entry as it appears in the feed, before defaults are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStation {
    pub metrostationcode: Option<Value>,
    pub metrostationname: Option<Value>,
    pub metrostationnamear: Option<Value>,
    pub metroline: Option<Value>,
    pub metrolinename: Option<Value>,
    pub stationseq: Option<Value>,
    pub geo_point_2d: Option<Value>,
}

/// Why a feed entry could not become a station record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("missing station code")]
    MissingCode,

    #[error(transparent)]
    InvalidCode(#[from] InvalidStationCode),

    #[error("missing or invalid geo_point_2d")]
    MissingLocation,
}

impl RawStation {
    /// Apply defaults and build a station record.
    pub fn into_record(self) -> Result<StationRecord, RecordError> {
        let code = text(self.metrostationcode.as_ref()).ok_or(RecordError::MissingCode)?;
        let code = StationCode::parse_normalized(&code)?;
        let location = location(self.geo_point_2d.as_ref()).ok_or(RecordError::MissingLocation)?;

        let name = LocalizedName::new(
            text(self.metrostationname.as_ref()).unwrap_or_else(|| DEFAULT_NAME.to_string()),
            text(self.metrostationnamear.as_ref())
                .unwrap_or_else(|| DEFAULT_NAME_SECONDARY.to_string()),
        );

        Ok(StationRecord::new(
            code,
            name,
            text(self.metroline.as_ref()).unwrap_or_else(|| DEFAULT_NAME.to_string()),
            text(self.metrolinename.as_ref()).unwrap_or_else(|| DEFAULT_NAME.to_string()),
            sequence(self.stationseq.as_ref()).unwrap_or(0),
            location,
        ))
    }
}

/// Decode a station feed body into records.
///
/// Entries that cannot be decoded are logged and skipped. The body itself
/// must be a JSON object with a `results` array.
pub fn decode_stations(body: &str) -> Result<Vec<StationRecord>, CatalogError> {
    let payload: StationsPayload = serde_json::from_str(body).map_err(|e| CatalogError::Json {
        message: e.to_string(),
    })?;

    let total = payload.results.len();
    let records: Vec<StationRecord> = payload
        .results
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let raw: RawStation = match serde_json::from_value(entry) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(index = i, error = %e, "Skipping station entry that is not an object");
                    return None;
                }
            };
            match raw.into_record() {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(index = i, error = %e, "Skipping station entry");
                    None
                }
            }
        })
        .collect();

    debug!(total, decoded = records.len(), "Decoded station feed");
    Ok(records)
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Accepts non-negative integers, integral floats and numeric strings.
fn sequence(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return u32::try_from(v).ok();
            }
            let f = n.as_f64()?;
            (f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64).then_some(f as u32)
        }
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn location(value: Option<&Value>) -> Option<GeoPoint> {
    let point = value?.as_object()?;
    let lat = point.get("lat")?.as_f64()?;
    let lon = point.get("lon")?.as_f64()?;
    (lat.is_finite() && lon.is_finite()).then_some(GeoPoint::new(lat, lon))
}
