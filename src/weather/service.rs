use std::time::Duration;

use axum::http::StatusCode;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use thiserror::Error;

use super::codes;
use super::models::*;
use crate::config::AppConfig;
use crate::error::HttpError;
use crate::impl_into_response;

/// Number of forecast days returned to clients
pub const FORECAST_DAYS: usize = 5;

const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min,windspeed_10m_max";
const HOURLY_FIELDS: &str = "relativehumidity_2m";

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("City not specified")]
    InvalidInput,

    #[error("Weather service unavailable: {0}")]
    UpstreamUnavailable(#[from] reqwest::Error),

    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Malformed forecast response: {0}")]
    MalformedResponse(String),
}

impl HttpError for WeatherError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::CityNotFound(_) => StatusCode::NOT_FOUND,
            Self::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput => Some("INVALID_INPUT"),
            Self::UpstreamUnavailable(_) => Some("UPSTREAM_UNAVAILABLE"),
            Self::CityNotFound(_) => Some("CITY_NOT_FOUND"),
            Self::MalformedResponse(_) => Some("MALFORMED_RESPONSE"),
        }
    }
}

impl_into_response!(WeatherError);

/// Resolves a city through Open-Meteo geocoding and fetches its weather.
///
/// Holds no mutable state: every call issues two fresh requests, geocoding
/// first and then the forecast for the resolved coordinates. Failures are
/// returned immediately without retrying.
pub struct WeatherService {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
    language: String,
    timeout: Duration,
}

impl WeatherService {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        Self {
            client,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            language: config.language.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// Fetch current conditions and a five day forecast for `city`
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherResult, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::InvalidInput);
        }

        let location = self.geocode(city).await?;
        let resolved_name = location.name.clone().unwrap_or_else(|| city.to_string());

        tracing::debug!(
            city = %resolved_name,
            lat = %location.latitude,
            lon = %location.longitude,
            "Fetching forecast"
        );

        let data = self.fetch_forecast(&location).await?;
        let result = normalize(resolved_name, data)?;

        tracing::info!(
            city = %result.city,
            temp = ?result.current.temperature,
            days = result.forecast.len(),
            "Weather data fetched successfully"
        );

        Ok(result)
    }

    /// Resolve a city name to its best matching location
    async fn geocode(&self, city: &str) -> Result<GeoLocation, WeatherError> {
        tracing::debug!(city = %city, "Geocoding city");

        let response = self
            .client
            .get(&self.geocoding_url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        let data: GeocodingResponse = response.json().await?;

        data.results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))
    }

    async fn fetch_forecast(&self, location: &GeoLocation) -> Result<ForecastResponse, WeatherError> {
        let response = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Received forecast response");

        Ok(response.error_for_status()?.json().await?)
    }
}

/// Map a raw forecast response into a [`WeatherResult`]
pub(crate) fn normalize(city: String, data: ForecastResponse) -> Result<WeatherResult, WeatherError> {
    let current_raw = data.current_weather.unwrap_or_default();
    let hourly = data.hourly.unwrap_or_default();
    let daily = data.daily.unwrap_or_default();

    let condition = codes::lookup(current_raw.weathercode.map_or(0, |c| c as i64));
    let current = CurrentConditions {
        temperature: current_raw.temperature,
        wind_speed: current_raw.windspeed,
        humidity: resolve_humidity(current_raw.time.as_deref(), &hourly),
        description: condition.description.to_string(),
        icon: condition.icon,
    };

    Ok(WeatherResult {
        city,
        current,
        forecast: normalize_forecast(&daily)?,
    })
}

/// Humidity at the current snapshot time.
///
/// Falls back to the first hourly value when the snapshot time is missing or
/// absent from the series, so the value may belong to a different hour.
fn resolve_humidity(current_time: Option<&str>, hourly: &HourlySeries) -> Option<f64> {
    let humidity = hourly.humidity();

    let exact = current_time
        .and_then(|time| hourly.times().iter().position(|t| t == time))
        .and_then(|idx| humidity.get(idx).copied());

    exact
        .flatten()
        .or_else(|| humidity.first().copied().flatten())
}

fn normalize_forecast(daily: &DailySeries) -> Result<Vec<ForecastDay>, WeatherError> {
    let dates = truncated(&daily.time);
    let weather_codes = truncated(&daily.weathercode);
    let max_t = truncated(&daily.temperature_2m_max);
    let min_t = truncated(&daily.temperature_2m_min);
    let wind_max = truncated(&daily.windspeed_10m_max);

    let at = |series: &[Option<f64>], idx: usize| series.get(idx).copied().flatten();

    dates
        .iter()
        .enumerate()
        .map(|(idx, day)| -> Result<ForecastDay, WeatherError> {
            let condition = codes::lookup(at(weather_codes, idx).map_or(0, |c| c as i64));
            Ok(ForecastDay {
                date: parse_forecast_date(day)?,
                temp_max: at(max_t, idx),
                temp_min: at(min_t, idx),
                wind_speed: at(wind_max, idx),
                description: condition.description.to_string(),
                icon: condition.icon,
            })
        })
        .collect()
}

fn truncated<T>(series: &Option<Vec<T>>) -> &[T] {
    let series = series.as_deref().unwrap_or_default();
    &series[..series.len().min(FORECAST_DAYS)]
}

/// Parse a daily date, accepting a plain date or an ISO datetime
fn parse_forecast_date(value: &str) -> Result<NaiveDate, WeatherError> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| WeatherError::MalformedResponse(format!("invalid date '{}'", value)))
}
