use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::favorites::handlers as favorites_handlers;
use crate::history::handlers as history_handlers;
use crate::middleware::require_auth;
use crate::openapi::swagger_ui;
use crate::users::handlers as users_handlers;
use crate::weather::handlers as weather_handlers;
use crate::AppState;

/// Public routes; a token is optional and only enables history recording
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/weather", get(weather_handlers::get_weather))
        .route("/weather/{city}", get(weather_handlers::get_weather))
        .route("/users", post(users_handlers::register))
        .route("/about", get(weather_handlers::about))
}

/// Routes that require a valid user token
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users/me", get(users_handlers::me))
        .route(
            "/favorites",
            get(favorites_handlers::list_favorites).post(favorites_handlers::add_favorite),
        )
        .route(
            "/favorites/{id}",
            delete(favorites_handlers::remove_favorite),
        )
        .route("/history", get(history_handlers::get_history))
        .layer(middleware::from_fn_with_state(state, require_auth))
}

/// Build all API v1 routes
pub fn api_v1_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state))
}

/// Build the complete application router
pub fn build_router(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check at root level
        .route("/", get(weather_handlers::health))
        .route("/health", get(weather_handlers::health))
        .nest("/api/v1", api_v1_routes(state))
        .merge(swagger_ui())
}
