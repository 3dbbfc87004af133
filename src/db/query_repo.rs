use async_trait::async_trait;
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use super::DbError;

/// A stored weather lookup
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema, sqlx::FromRow)]
pub struct WeatherQueryRecord {
    pub id: i64,
    #[serde(skip)]
    pub user_id: Option<i64>,
    pub city: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub created_at: i64,
}

/// Fields of a lookup before it is stored
#[derive(Debug, Clone)]
pub struct NewWeatherQuery {
    pub user_id: Option<i64>,
    pub city: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub created_at: i64,
}

/// Repository trait for the lookup history
#[async_trait]
pub trait QueryRepository: Send + Sync {
    /// Store a lookup and return its row id
    async fn insert(&self, query: &NewWeatherQuery) -> Result<i64, DbError>;

    /// Most recent lookups of a user, newest first
    async fn recent_for_user(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Vec<WeatherQueryRecord>, DbError>;
}

/// SQLite implementation of QueryRepository
pub struct SqliteQueryRepository {
    pool: SqlitePool,
}

impl SqliteQueryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryRepository for SqliteQueryRepository {
    async fn insert(&self, query: &NewWeatherQuery) -> Result<i64, DbError> {
        let id = sqlx::query(
            "INSERT INTO weather_queries
                (user_id, city, temperature, humidity, wind_speed, description, icon, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(query.user_id)
        .bind(&query.city)
        .bind(query.temperature)
        .bind(query.humidity)
        .bind(query.wind_speed)
        .bind(&query.description)
        .bind(&query.icon)
        .bind(query.created_at)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    async fn recent_for_user(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Vec<WeatherQueryRecord>, DbError> {
        let rows = sqlx::query_as::<_, WeatherQueryRecord>(
            "SELECT id, user_id, city, temperature, humidity, wind_speed, description, icon, created_at
             FROM weather_queries
             WHERE user_id = ?
             ORDER BY created_at DESC, id DESC
             LIMIT ?",
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, SqliteUserRepository, UserRepository};

    fn lookup(user_id: i64, city: &str, created_at: i64) -> NewWeatherQuery {
        NewWeatherQuery {
            user_id: Some(user_id),
            city: city.to_string(),
            temperature: Some(12.5),
            humidity: None,
            wind_speed: Some(3.0),
            description: Some("Overcast".to_string()),
            icon: Some("cloudy".to_string()),
            created_at,
        }
    }

    #[tokio::test]
    async fn test_insert_and_recent() {
        let pool = test_pool().await;
        let user = SqliteUserRepository::new(pool.clone())
            .create("olga", "t-olga", 1)
            .await
            .unwrap();
        let repo = SqliteQueryRepository::new(pool);

        repo.insert(&lookup(user.id, "Perm", 10)).await.unwrap();
        repo.insert(&lookup(user.id, "Ufa", 20)).await.unwrap();

        let recent = repo.recent_for_user(user.id, 50).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].city, "Ufa");
        assert_eq!(recent[1].city, "Perm");
        assert_eq!(recent[1].temperature, Some(12.5));
        assert_eq!(recent[1].humidity, None);
    }

    #[tokio::test]
    async fn test_recent_respects_limit_and_owner() {
        let pool = test_pool().await;
        let users = SqliteUserRepository::new(pool.clone());
        let olga = users.create("olga", "t-olga", 1).await.unwrap();
        let petr = users.create("petr", "t-petr", 1).await.unwrap();
        let repo = SqliteQueryRepository::new(pool);

        for i in 0..5 {
            repo.insert(&lookup(olga.id, "Perm", i)).await.unwrap();
        }
        repo.insert(&lookup(petr.id, "Omsk", 100)).await.unwrap();

        let recent = repo.recent_for_user(olga.id, 3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert!(recent.iter().all(|r| r.city == "Perm"));
        assert_eq!(recent[0].created_at, 4);
    }
}
