use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::codes::Icon;

// ============================================================================
// API Response Models (External - what we return to clients)
// ============================================================================

/// Current conditions at the resolved location
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CurrentConditions {
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub humidity: Option<f64>,
    pub description: String,
    pub icon: Icon,
}

/// A single day of the short forecast
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub wind_speed: Option<f64>,
    pub description: String,
    pub icon: Icon,
}

/// Normalized weather for a city: current conditions plus up to five forecast days
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WeatherResult {
    pub city: String,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
}

// ============================================================================
// Open-Meteo Responses (Internal)
// Every field is optional; missing data becomes null in the result
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Option<Vec<GeoLocation>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub current_weather: Option<CurrentWeather>,
    #[serde(default)]
    pub hourly: Option<HourlySeries>,
    #[serde(default)]
    pub daily: Option<DailySeries>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub windspeed: Option<f64>,
    #[serde(default)]
    pub weathercode: Option<f64>,
    #[serde(default)]
    pub time: Option<String>,
}

/// Hourly series; the humidity key changed name between API versions
#[derive(Debug, Default, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Option<Vec<String>>,
    #[serde(default)]
    pub relativehumidity_2m: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub relative_humidity_2m: Option<Vec<Option<f64>>>,
}

impl HourlySeries {
    pub fn times(&self) -> &[String] {
        self.time.as_deref().unwrap_or_default()
    }

    /// First non-empty humidity series, checking the legacy key first
    pub fn humidity(&self) -> &[Option<f64>] {
        [&self.relativehumidity_2m, &self.relative_humidity_2m]
            .into_iter()
            .filter_map(|series| series.as_deref())
            .find(|series| !series.is_empty())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DailySeries {
    #[serde(default)]
    pub time: Option<Vec<String>>,
    #[serde(default)]
    pub weathercode: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub temperature_2m_max: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub temperature_2m_min: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub windspeed_10m_max: Option<Vec<Option<f64>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hourly_prefers_legacy_humidity_key() {
        let hourly: HourlySeries = serde_json::from_value(serde_json::json!({
            "time": ["2024-01-01T00:00"],
            "relativehumidity_2m": [80],
            "relative_humidity_2m": [10]
        }))
        .unwrap();
        assert_eq!(hourly.humidity(), &[Some(80.0)]);
    }

    #[test]
    fn test_hourly_uses_new_key_when_legacy_missing_or_empty() {
        let hourly: HourlySeries = serde_json::from_value(serde_json::json!({
            "relativehumidity_2m": [],
            "relative_humidity_2m": [55, null]
        }))
        .unwrap();
        assert_eq!(hourly.humidity(), &[Some(55.0), None]);
        assert!(hourly.times().is_empty());
    }

    #[test]
    fn test_geocoding_without_results_key() {
        let geo: GeocodingResponse =
            serde_json::from_value(serde_json::json!({ "generationtime_ms": 0.5 })).unwrap();
        assert!(geo.results.is_none());
    }

    #[test]
    fn test_forecast_tolerates_missing_sections() {
        let data: ForecastResponse = serde_json::from_value(serde_json::json!({
            "latitude": 55.75,
            "longitude": 37.62
        }))
        .unwrap();
        assert!(data.current_weather.is_none());
        assert!(data.hourly.is_none());
        assert!(data.daily.is_none());
    }
}
