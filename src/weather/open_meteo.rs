//! `OpenMeteo` API response structures and conversion utilities

use serde::Deserialize;

use crate::models::ObservationRecord;

/// Variables requested in the `current` block
pub const CURRENT_VARIABLES: &str =
    "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m";

/// Forecast response restricted to the current conditions block
#[derive(Debug, Deserialize)]
pub struct CurrentResponse {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub current: Option<CurrentData>,
}

/// Current weather data from `OpenMeteo`
#[derive(Debug, Deserialize)]
pub struct CurrentData {
    /// ISO8601 local time of the observation
    pub time: Option<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub relative_humidity: f64,
    /// WMO code; values outside the lookup table are still accepted
    pub weather_code: i64,
    /// Wind speed in km/h (the API default unit)
    #[serde(rename = "wind_speed_10m")]
    pub wind_speed: f64,
}

impl CurrentData {
    /// Convert to the display record for `city`
    #[must_use]
    pub fn into_record(self, city: &str) -> ObservationRecord {
        ObservationRecord::from_measurements(
            city,
            self.temperature,
            self.relative_humidity,
            self.weather_code,
            self.wind_speed,
        )
    }
}

/// Query URL for the current conditions at the given coordinates
#[must_use]
pub fn current_conditions_url(base_url: &str, latitude: f64, longitude: f64) -> String {
    format!(
        "{}/forecast?latitude={}&longitude={}&current={}&forecast_days=1",
        base_url.trim_end_matches('/'),
        latitude,
        longitude,
        CURRENT_VARIABLES
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_conditions_url() {
        let url = current_conditions_url("https://api.open-meteo.com/v1/", 28.61, 77.23);
        assert_eq!(
            url,
            "https://api.open-meteo.com/v1/forecast?latitude=28.61&longitude=77.23\
&current=temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m&forecast_days=1"
        );
    }

    #[test]
    fn test_parse_current_response() {
        let body = r#"{
            "latitude": 28.625,
            "longitude": 77.25,
            "current_units": {"temperature_2m": "°C"},
            "current": {
                "time": "2025-11-14T10:15",
                "interval": 900,
                "temperature_2m": 24.6,
                "relative_humidity_2m": 48,
                "weather_code": 45,
                "wind_speed_10m": 6.8
            }
        }"#;

        let response: CurrentResponse = serde_json::from_str(body).unwrap();
        let record = response.current.unwrap().into_record("Delhi");
        assert_eq!(record.temperature, "24.6°C");
        assert_eq!(record.humidity, "48%");
        assert_eq!(record.wind_speed, "6.8 km/h");
        assert_eq!(record.condition, "Fog");
    }

    #[test]
    fn test_out_of_range_code_parses() {
        let body = r#"{"current":{"temperature_2m":20.0,"relative_humidity_2m":50,"weather_code":300,"wind_speed_10m":5.0}}"#;
        let response: CurrentResponse = serde_json::from_str(body).unwrap();
        let record = response.current.unwrap().into_record("Leh");
        assert_eq!(record.condition, "Not available");
    }

    #[test]
    fn test_missing_current_block() {
        let response: CurrentResponse =
            serde_json::from_str(r#"{"latitude": 1.0, "longitude": 2.0}"#).unwrap();
        assert!(response.current.is_none());
    }
}
