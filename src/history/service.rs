use axum::http::StatusCode;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::{
    DbError, NewWeatherQuery, QueryRepository, SqliteQueryRepository, WeatherQueryRecord,
};
use crate::error::HttpError;
use crate::impl_into_response;
use crate::weather::WeatherResult;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error(transparent)]
    Database(#[from] DbError),
}

impl HttpError for HistoryError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Database(_) => Some("DATABASE_ERROR"),
        }
    }
}

impl_into_response!(HistoryError);

/// Records weather lookups and lists them back per user
pub struct HistoryService {
    repo: SqliteQueryRepository,
    limit: u32,
}

impl HistoryService {
    pub fn new(pool: SqlitePool, limit: u32) -> Self {
        Self {
            repo: SqliteQueryRepository::new(pool),
            limit,
        }
    }

    /// Store the current conditions of a lookup made by `user_id`
    pub async fn record(&self, user_id: i64, result: &WeatherResult) -> Result<i64, HistoryError> {
        let query = NewWeatherQuery {
            user_id: Some(user_id),
            city: result.city.clone(),
            temperature: result.current.temperature,
            humidity: result.current.humidity,
            wind_speed: result.current.wind_speed,
            description: Some(result.current.description.clone()),
            icon: Some(result.current.icon.as_str().to_string()),
            created_at: chrono::Utc::now().timestamp(),
        };

        let id = self.repo.insert(&query).await?;
        tracing::debug!(user_id, city = %query.city, "Lookup recorded");
        Ok(id)
    }

    /// Latest lookups of a user, newest first
    pub async fn recent(&self, user_id: i64) -> Result<Vec<WeatherQueryRecord>, HistoryError> {
        Ok(self.repo.recent_for_user(user_id, self.limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, SqliteUserRepository, UserRepository};
    use crate::weather::codes::Icon;
    use crate::weather::models::CurrentConditions;

    fn create_test_result(city: &str) -> WeatherResult {
        WeatherResult {
            city: city.to_string(),
            current: CurrentConditions {
                temperature: Some(-2.0),
                wind_speed: Some(4.5),
                humidity: Some(88.0),
                description: "Snow".to_string(),
                icon: Icon::Snow,
            },
            forecast: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_record_and_recent() {
        let pool = test_pool().await;
        let user = SqliteUserRepository::new(pool.clone())
            .create("nina", "t-nina", 1)
            .await
            .unwrap();
        let service = HistoryService::new(pool, 50);

        service.record(user.id, &create_test_result("Tula")).await.unwrap();

        let recent = service.recent(user.id).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].city, "Tula");
        assert_eq!(recent[0].humidity, Some(88.0));
        assert_eq!(recent[0].description.as_deref(), Some("Snow"));
        assert_eq!(recent[0].icon.as_deref(), Some("snow"));
    }

    #[tokio::test]
    async fn test_recent_is_capped() {
        let pool = test_pool().await;
        let user = SqliteUserRepository::new(pool.clone())
            .create("nina", "t-nina", 1)
            .await
            .unwrap();
        let service = HistoryService::new(pool, 2);

        for city in ["A", "B", "C"] {
            service.record(user.id, &create_test_result(city)).await.unwrap();
        }

        let recent = service.recent(user.id).await.unwrap();
        assert_eq!(recent.len(), 2);
        // Same-second inserts fall back to id order
        assert_eq!(recent[0].city, "C");
        assert_eq!(recent[1].city, "B");
    }
}
