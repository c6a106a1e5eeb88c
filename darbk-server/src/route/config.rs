//! Tracking configuration.

/// Configuration for following a route with live positions.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// Distance from the destination station (metres) that counts as arrived.
    pub arrival_radius_m: f64,
}

impl TrackerConfig {
    /// Create a new configuration.
    pub fn new(arrival_radius_m: f64) -> Self {
        Self { arrival_radius_m }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            arrival_radius_m: 150.0,
        }
    }
}
