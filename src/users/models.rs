use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// POST /users body
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
}

/// Returned once at registration; the token is not shown again
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisteredUser {
    pub id: i64,
    pub username: String,
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub created_at: i64,
}
