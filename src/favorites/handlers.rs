use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::models::{AddFavoriteRequest, FavoritesResponse};
use super::service::FavoritesError;
use crate::db::FavoriteCity;
use crate::middleware::AuthUser;
use crate::AppState;

/// GET /favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Json<FavoritesResponse>, FavoritesError> {
    let favorites = state.favorites_service.list(user.id).await?;
    Ok(Json(favorites.into()))
}

/// POST /favorites
pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Json(request): Json<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<FavoriteCity>), FavoritesError> {
    let favorite = state.favorites_service.add(user.id, &request.city).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// DELETE /favorites/{id}
pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, FavoritesError> {
    state.favorites_service.remove(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
