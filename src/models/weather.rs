//! Weather observation model and display methods

use serde::{Deserialize, Serialize};

/// Condition text for weather codes missing from the lookup table
pub const CONDITION_UNAVAILABLE: &str = "Not available";

/// One city's current conditions, already formatted for display.
///
/// Units are part of the strings, the record keeps no numeric values.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ObservationRecord {
    pub city: String,
    /// Temperature with unit, e.g. `28.4°C`
    pub temperature: String,
    /// Relative humidity with unit, e.g. `65%`
    pub humidity: String,
    /// Wind speed with unit, e.g. `12.3 km/h`
    pub wind_speed: String,
    /// Human-readable condition derived from the WMO weather code
    pub condition: String,
}

impl ObservationRecord {
    /// Build a record from raw provider values
    #[must_use]
    pub fn from_measurements(
        city: impl Into<String>,
        temperature_c: f64,
        humidity_percent: f64,
        weather_code: i64,
        wind_speed_kmh: f64,
    ) -> Self {
        Self {
            city: city.into(),
            temperature: Self::format_temperature(temperature_c),
            humidity: Self::format_humidity(humidity_percent),
            wind_speed: Self::format_wind_speed(wind_speed_kmh),
            condition: weather_code_to_description(weather_code).to_string(),
        }
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(celsius: f64) -> String {
        format!("{celsius}°C")
    }

    /// Format relative humidity with unit
    #[must_use]
    pub fn format_humidity(percent: f64) -> String {
        format!("{percent}%")
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind_speed(kmh: f64) -> String {
        format!("{kmh} km/h")
    }
}

/// Convert a WMO weather code to the condition shown in the report
#[must_use]
pub fn weather_code_to_description(code: i64) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        95 => "Slight/moderate thunderstorm",
        _ => CONDITION_UNAVAILABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "Clear sky")]
    #[case(2, "Partly cloudy")]
    #[case(48, "Depositing rime fog")]
    #[case(63, "Moderate rain")]
    #[case(95, "Slight/moderate thunderstorm")]
    fn test_known_weather_codes(#[case] code: i64, #[case] expected: &str) {
        assert_eq!(weather_code_to_description(code), expected);
    }

    #[rstest]
    #[case(4)]
    #[case(71)]
    #[case(96)]
    #[case(255)]
    #[case(300)]
    #[case(-1)]
    fn test_unmapped_codes_are_unavailable(#[case] code: i64) {
        assert_eq!(weather_code_to_description(code), CONDITION_UNAVAILABLE);
    }

    #[test]
    fn test_units_are_baked_in() {
        let record = ObservationRecord::from_measurements("Delhi", 28.4, 65.0, 1, 12.3);
        assert_eq!(record.city, "Delhi");
        assert_eq!(record.temperature, "28.4°C");
        assert_eq!(record.humidity, "65%");
        assert_eq!(record.wind_speed, "12.3 km/h");
        assert_eq!(record.condition, "Mainly clear");
    }

    #[test]
    fn test_whole_numbers_have_no_trailing_fraction() {
        assert_eq!(ObservationRecord::format_temperature(30.0), "30°C");
        assert_eq!(ObservationRecord::format_wind_speed(0.0), "0 km/h");
    }
}
