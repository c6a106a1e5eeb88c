//! Station identity and station records.

use std::fmt;

use serde::Serialize;

use super::GeoPoint;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A stable metro station code.
///
/// Station codes are the sole identity of a station. Any non-empty string
/// without whitespace is accepted; the feed does not document a stricter
/// format, so none is imposed.
///
/// # Examples
///
/// ```
/// use darbk_server::domain::StationCode;
///
/// let code = StationCode::parse("1A1").unwrap();
/// assert_eq!(code.as_str(), "1A1");
///
/// // Empty codes are rejected
/// assert!(StationCode::parse("").is_err());
///
/// // Embedded whitespace is rejected
/// assert!(StationCode::parse("1A 1").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        if s.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }

        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(InvalidStationCode {
                reason: "must not contain whitespace or control characters",
            });
        }

        Ok(StationCode(s.to_string()))
    }

    /// Parse a station code after trimming surrounding whitespace.
    ///
    /// Use this for user input (query strings, request bodies).
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(s.trim())
    }

    /// Returns the station code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A station name in both scripts used by the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedName {
    /// Latin-script name.
    pub primary: String,

    /// Arabic-script name. Interchange duplicates share this value.
    pub secondary: String,
}

impl LocalizedName {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }
}

/// One station on one line.
///
/// Interchange stations appear once per line they serve, each with its own
/// code but the same secondary name. Records are immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    /// Unique station code.
    pub code: StationCode,

    /// Display name.
    pub name: LocalizedName,

    /// Line identifier, e.g. `"Line1"`.
    pub line_code: String,

    /// Line display name. Matches the name of the line geometry.
    pub line_name: String,

    /// Position along the line. Not unique across lines.
    pub sequence: u32,

    /// Platform location.
    pub location: GeoPoint,
}

impl StationRecord {
    /// Create a station record.
    pub fn new(
        code: StationCode,
        name: LocalizedName,
        line_code: impl Into<String>,
        line_name: impl Into<String>,
        sequence: u32,
        location: GeoPoint,
    ) -> Self {
        Self {
            code,
            name,
            line_code: line_code.into(),
            line_name: line_name.into(),
            sequence,
            location,
        }
    }
}
