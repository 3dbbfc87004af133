use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::User;
use crate::error::HttpError;
use crate::impl_into_response;
use crate::users::UsersError;
use crate::AppState;

const API_KEY_HEADER: &str = "x-api-key";

/// The authenticated user, inserted into request extensions by [`require_auth`]
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("API token required. Provide an Authorization: Bearer or X-API-Key header.")]
    MissingToken,

    #[error("Invalid API token")]
    InvalidToken,

    #[error(transparent)]
    Lookup(#[from] UsersError),
}

impl HttpError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Lookup(e) => e.status_code(),
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::MissingToken => Some("MISSING_TOKEN"),
            Self::InvalidToken => Some("INVALID_TOKEN"),
            Self::Lookup(e) => e.error_code(),
        }
    }
}

impl_into_response!(AuthError);

/// Token from `Authorization: Bearer <token>`, else from `X-API-Key`
pub fn request_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let api_key = || {
        headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
    };

    bearer
        .or_else(api_key)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
}

/// Middleware that rejects requests without a valid user token
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = request_token(request.headers()) else {
        tracing::warn!(path = %request.uri().path(), "Missing API token");
        return AuthError::MissingToken.into_response();
    };

    match state.users_service.authenticate(&token).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(AuthUser(user));
            next.run(request).await
        }
        Ok(None) => {
            tracing::warn!(path = %request.uri().path(), "Invalid API token");
            AuthError::InvalidToken.into_response()
        }
        Err(e) => AuthError::from(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_token_from_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(request_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn test_request_token_from_api_key() {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_static("  key-9 "));
        assert_eq!(request_token(&headers), Some("key-9".to_string()));
    }

    #[test]
    fn test_request_token_prefers_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer first"));
        headers.insert(API_KEY_HEADER, HeaderValue::from_static("second"));
        assert_eq!(request_token(&headers), Some("first".to_string()));
    }

    #[test]
    fn test_request_token_missing_or_blank() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(request_token(&headers), None);

        headers.insert(API_KEY_HEADER, HeaderValue::from_static("   "));
        assert_eq!(request_token(&headers), None);
    }

    #[test]
    fn test_auth_error_codes() {
        assert_eq!(
            AuthError::MissingToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::InvalidToken.error_code(), Some("INVALID_TOKEN"));
    }
}
