use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::db::User;
use crate::middleware::request_token;
use crate::AppState;

/// Query parameters for weather requests
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    /// City name from query string
    pub city: Option<String>,
}

/// Extracts city from either path parameter or query parameter
///
/// Checks path first, then falls back to query parameter.
/// Returns None if city is not provided in either location, or is empty
/// (`?city=`); whitespace-only values are passed through.
#[derive(Debug)]
pub struct CityParam(pub Option<String>);

impl CityParam {
    /// Get the city value or use a default
    pub fn or_default(self, default: impl Into<String>) -> String {
        self.0.unwrap_or_else(|| default.into())
    }
}

impl<S> FromRequestParts<S> for CityParam
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Ok(Path(city)) = Path::<String>::from_request_parts(parts, state).await {
            if !city.is_empty() {
                return Ok(CityParam(Some(city)));
            }
        }

        if let Ok(Query(query)) = Query::<WeatherQuery>::from_request_parts(parts, state).await {
            return Ok(CityParam(query.city.filter(|c| !c.is_empty())));
        }

        Ok(CityParam(None))
    }
}

/// The caller if a valid token was sent; anonymous otherwise
#[derive(Debug)]
pub struct MaybeUser(pub Option<User>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = request_token(&parts.headers) else {
            return Ok(MaybeUser(None));
        };

        match state.users_service.authenticate(&token).await {
            Ok(user) => {
                if user.is_none() {
                    tracing::debug!("Ignoring unknown API token on public route");
                }
                Ok(MaybeUser(user))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token lookup failed, continuing anonymously");
                Ok(MaybeUser(None))
            }
        }
    }
}
