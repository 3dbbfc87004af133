use axum::http::StatusCode;
use sqlx::SqlitePool;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{DbError, SqliteUserRepository, User, UserRepository};
use crate::error::HttpError;
use crate::impl_into_response;

const MAX_USERNAME_LEN: usize = 64;

#[derive(Error, Debug)]
pub enum UsersError {
    #[error("Username must be 1-64 characters")]
    InvalidUsername,

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error(transparent)]
    Database(#[from] DbError),
}

impl HttpError for UsersError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUsername => StatusCode::BAD_REQUEST,
            Self::UsernameTaken(_) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::InvalidUsername => Some("INVALID_INPUT"),
            Self::UsernameTaken(_) => Some("USERNAME_TAKEN"),
            Self::Database(_) => Some("DATABASE_ERROR"),
        }
    }
}

impl_into_response!(UsersError);

/// User registration and token authentication
pub struct UsersService {
    repo: SqliteUserRepository,
}

impl UsersService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: SqliteUserRepository::new(pool),
        }
    }

    /// Create a user with a fresh API token
    pub async fn register(&self, username: &str) -> Result<User, UsersError> {
        let username = username.trim();
        if username.is_empty() || username.chars().count() > MAX_USERNAME_LEN {
            return Err(UsersError::InvalidUsername);
        }

        let token = Uuid::new_v4().simple().to_string();
        let now = chrono::Utc::now().timestamp();

        let user = self
            .repo
            .create(username, &token, now)
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    UsersError::UsernameTaken(username.to_string())
                } else {
                    UsersError::Database(e)
                }
            })?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Resolve an API token to its user
    pub async fn authenticate(&self, token: &str) -> Result<Option<User>, UsersError> {
        if token.is_empty() {
            return Ok(None);
        }
        Ok(self.repo.get_by_token(token).await?)
    }
}
