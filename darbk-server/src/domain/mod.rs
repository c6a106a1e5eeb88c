//! Domain types for the metro router.
//!
//! This module contains the validated values the rest of the crate works
//! with. Types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod line;
mod point;
mod station;

pub use line::{
    LineGeometry, UNKNOWN_LINE_COLOR, UNKNOWN_LINE_NAME, line_color, line_display_name,
};
pub use point::{GeoPoint, Region};
pub use station::{InvalidStationCode, LocalizedName, StationCode, StationRecord};
