use axum::{extract::State, http::StatusCode, Extension, Json};

use super::models::{RegisterRequest, RegisteredUser, UserProfile};
use super::service::UsersError;
use crate::middleware::AuthUser;
use crate::AppState;

/// Register a user and issue an API token
///
/// POST /users
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisteredUser>), UsersError> {
    let user = state.users_service.register(&request.username).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisteredUser {
            id: user.id,
            username: user.username,
            token: user.token,
        }),
    ))
}

/// GET /users/me
pub async fn me(Extension(AuthUser(user)): Extension<AuthUser>) -> Json<UserProfile> {
    Json(UserProfile {
        id: user.id,
        username: user.username,
        created_at: user.created_at,
    })
}
