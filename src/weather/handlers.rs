use axum::{extract::State, Json};
use serde::Serialize;

use super::models::WeatherResult;
use super::service::WeatherError;
use crate::extractors::{CityParam, MaybeUser};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AboutResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub data_provider: &'static str,
    pub data_provider_url: &'static str,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Service information and data attribution
pub async fn about() -> Json<AboutResponse> {
    Json(AboutResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        description: env!("CARGO_PKG_DESCRIPTION"),
        data_provider: "Open-Meteo",
        data_provider_url: "https://open-meteo.com/",
    })
}

/// Current weather and five day forecast
///
/// GET /weather?city=Moscow or GET /weather/{city}
///
/// Lookups made with a valid token are added to the caller's history.
pub async fn get_weather(
    State(state): State<AppState>,
    city: CityParam,
    MaybeUser(user): MaybeUser,
) -> Result<Json<WeatherResult>, WeatherError> {
    let city = city.or_default(state.config.default_city.clone());
    let weather = state.weather_service.fetch_weather(&city).await?;

    if let Some(user) = user {
        // History is best effort; the lookup itself already succeeded
        if let Err(e) = state.history_service.record(user.id, &weather).await {
            tracing::warn!(error = %e, user_id = user.id, "Failed to record lookup");
        }
    }

    Ok(Json(weather))
}
