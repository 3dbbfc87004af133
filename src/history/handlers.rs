use axum::{extract::State, Extension, Json};

use super::models::HistoryResponse;
use super::service::HistoryError;
use crate::middleware::AuthUser;
use crate::AppState;

/// Most recent lookups of the signed-in user
///
/// GET /history
pub async fn get_history(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Json<HistoryResponse>, HistoryError> {
    let queries = state.history_service.recent(user.id).await?;
    Ok(Json(queries.into()))
}
