//! Location model for the cities covered by the weather report

use serde::{Deserialize, Serialize};

/// A named place the report covers
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationSpec {
    /// City name as shown in the report table
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl LocationSpec {
    /// Create a new location
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Whether both coordinates are inside their valid ranges
    #[must_use]
    pub fn has_valid_coordinates(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// The major Indian cities the report covers unless configured otherwise
#[must_use]
pub fn default_locations() -> Vec<LocationSpec> {
    vec![
        LocationSpec::new("Delhi", 28.61, 77.23),
        LocationSpec::new("Mumbai", 19.07, 72.88),
        LocationSpec::new("Kolkata", 22.57, 88.36),
        LocationSpec::new("Chennai", 13.08, 80.27),
        LocationSpec::new("Bengaluru", 12.97, 77.59),
        LocationSpec::new("Hyderabad", 17.38, 78.48),
        LocationSpec::new("Jaipur", 26.91, 75.79),
    ]
}
