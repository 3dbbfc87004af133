use axum::http::StatusCode;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::{DbError, FavoriteCity, FavoriteRepository, SqliteFavoriteRepository};
use crate::error::HttpError;
use crate::impl_into_response;

#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("City not specified")]
    InvalidInput,

    #[error("City is already a favorite: {0}")]
    AlreadyExists(String),

    #[error("Favorite not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] DbError),
}

impl HttpError for FavoritesError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput => Some("INVALID_INPUT"),
            Self::AlreadyExists(_) => Some("ALREADY_FAVORITE"),
            Self::NotFound => Some("FAVORITE_NOT_FOUND"),
            Self::Database(_) => Some("DATABASE_ERROR"),
        }
    }
}

impl_into_response!(FavoritesError);

/// Per-user list of saved cities
pub struct FavoritesService {
    repo: SqliteFavoriteRepository,
}

impl FavoritesService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: SqliteFavoriteRepository::new(pool),
        }
    }

    pub async fn list(&self, user_id: i64) -> Result<Vec<FavoriteCity>, FavoritesError> {
        Ok(self.repo.list_for_user(user_id).await?)
    }

    /// Save a city for the user, refusing exact duplicates
    pub async fn add(&self, user_id: i64, city: &str) -> Result<FavoriteCity, FavoritesError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FavoritesError::InvalidInput);
        }

        if self.repo.find(user_id, city).await?.is_some() {
            return Err(FavoritesError::AlreadyExists(city.to_string()));
        }

        let now = chrono::Utc::now().timestamp();
        let favorite = self.repo.insert(user_id, city, now).await.map_err(|e| {
            // Lost a race with a concurrent insert of the same city
            if e.is_unique_violation() {
                FavoritesError::AlreadyExists(city.to_string())
            } else {
                FavoritesError::Database(e)
            }
        })?;

        tracing::info!(user_id, city = %favorite.city, "Favorite city added");
        Ok(favorite)
    }

    pub async fn remove(&self, user_id: i64, favorite_id: i64) -> Result<(), FavoritesError> {
        if !self.repo.remove(user_id, favorite_id).await? {
            return Err(FavoritesError::NotFound);
        }

        tracing::info!(user_id, favorite_id, "Favorite city removed");
        Ok(())
    }
}
