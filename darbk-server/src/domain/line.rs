//! Metro lines: track geometry and per-line presentation data.

use serde::Serialize;

use super::GeoPoint;

/// Colour used for line codes outside the known network.
pub const UNKNOWN_LINE_COLOR: &str = "#8e8e93";

/// Display name used for line codes outside the known network.
pub const UNKNOWN_LINE_NAME: &str = "مسار غير معروف";

/// Track geometry for one line.
///
/// Identified by its display name, which matches `StationRecord::line_name`.
/// Used only for drawing and projection, never for routing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineGeometry {
    /// Display name (Latin script).
    pub name: String,

    /// Display name (Arabic script).
    pub name_secondary: String,

    /// Colour as a `#rrggbb` string.
    pub color: String,

    /// Ordered track polyline.
    pub points: Vec<GeoPoint>,
}

/// Brand colour for a line code.
pub fn line_color(line_code: &str) -> &'static str {
    match line_code {
        "Line1" => "#00ade5",
        "Line2" => "#f0493a",
        "Line3" => "#f68d39",
        "Line4" => "#ffd105",
        "Line5" => "#43b649",
        "Line6" => "#984c9d",
        _ => UNKNOWN_LINE_COLOR,
    }
}

/// Arabic display name for a line code.
pub fn line_display_name(line_code: &str) -> &'static str {
    match line_code {
        "Line1" => "المسار الأزرق",
        "Line2" => "المسار الأحمر",
        "Line3" => "المسار البرتقالي",
        "Line4" => "المسار الأصفر",
        "Line5" => "المسار الأخضر",
        "Line6" => "المسار البنفسجي",
        _ => UNKNOWN_LINE_NAME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_lines() {
        assert_eq!(line_color("Line1"), "#00ade5");
        assert_eq!(line_color("Line6"), "#984c9d");
        assert_eq!(line_display_name("Line2"), "المسار الأحمر");
    }

    #[test]
    fn unknown_lines_fall_back() {
        assert_eq!(line_color("Line9"), UNKNOWN_LINE_COLOR);
        assert_eq!(line_color(""), UNKNOWN_LINE_COLOR);
        assert_eq!(line_display_name("line1"), UNKNOWN_LINE_NAME);
    }
}
