use async_trait::async_trait;
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use super::DbError;

/// A city saved by a user
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema, sqlx::FromRow)]
pub struct FavoriteCity {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    pub city: String,
    pub created_at: i64,
}

/// Repository trait for favorite cities
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// All favorites of a user, newest first
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<FavoriteCity>, DbError>;

    /// Exact-name lookup within one user's favorites
    async fn find(&self, user_id: i64, city: &str) -> Result<Option<FavoriteCity>, DbError>;

    async fn insert(
        &self,
        user_id: i64,
        city: &str,
        created_at: i64,
    ) -> Result<FavoriteCity, DbError>;

    /// Remove a favorite owned by `user_id`; false if there was none
    async fn remove(&self, user_id: i64, id: i64) -> Result<bool, DbError>;
}

/// SQLite implementation of FavoriteRepository
pub struct SqliteFavoriteRepository {
    pool: SqlitePool,
}

impl SqliteFavoriteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for SqliteFavoriteRepository {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<FavoriteCity>, DbError> {
        let rows = sqlx::query_as::<_, FavoriteCity>(
            "SELECT id, user_id, city, created_at
             FROM favorite_cities
             WHERE user_id = ?
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find(&self, user_id: i64, city: &str) -> Result<Option<FavoriteCity>, DbError> {
        let row = sqlx::query_as::<_, FavoriteCity>(
            "SELECT id, user_id, city, created_at
             FROM favorite_cities
             WHERE user_id = ? AND city = ?",
        )
        .bind(user_id)
        .bind(city)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn insert(
        &self,
        user_id: i64,
        city: &str,
        created_at: i64,
    ) -> Result<FavoriteCity, DbError> {
        let id = sqlx::query(
            "INSERT INTO favorite_cities (user_id, city, created_at) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(city)
        .bind(created_at)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(FavoriteCity {
            id,
            user_id,
            city: city.to_string(),
            created_at,
        })
    }

    async fn remove(&self, user_id: i64, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM favorite_cities WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, SqliteUserRepository, UserRepository};

    async fn setup() -> (SqliteFavoriteRepository, i64, i64) {
        let pool = test_pool().await;
        let users = SqliteUserRepository::new(pool.clone());
        let alice = users.create("alice", "t-alice", 1).await.unwrap();
        let bob = users.create("bob", "t-bob", 1).await.unwrap();
        (SqliteFavoriteRepository::new(pool), alice.id, bob.id)
    }

    #[tokio::test]
    async fn test_insert_and_list_newest_first() {
        let (repo, alice, _) = setup().await;

        repo.insert(alice, "Kazan", 100).await.unwrap();
        repo.insert(alice, "Sochi", 200).await.unwrap();

        let favorites = repo.list_for_user(alice).await.unwrap();
        let cities: Vec<_> = favorites.iter().map(|f| f.city.as_str()).collect();
        assert_eq!(cities, vec!["Sochi", "Kazan"]);
    }

    #[tokio::test]
    async fn test_find_is_scoped_to_user() {
        let (repo, alice, bob) = setup().await;
        repo.insert(alice, "Omsk", 100).await.unwrap();

        assert!(repo.find(alice, "Omsk").await.unwrap().is_some());
        assert!(repo.find(bob, "Omsk").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_rejected() {
        let (repo, alice, _) = setup().await;
        repo.insert(alice, "Omsk", 100).await.unwrap();

        let err = repo.insert(alice, "Omsk", 101).await.unwrap_err();
        assert!(err.is_unique_violation());
    }

    #[tokio::test]
    async fn test_remove_only_own_favorite() {
        let (repo, alice, bob) = setup().await;
        let fav = repo.insert(alice, "Tver", 100).await.unwrap();

        assert!(!repo.remove(bob, fav.id).await.unwrap());
        assert!(repo.remove(alice, fav.id).await.unwrap());
        assert!(!repo.remove(alice, fav.id).await.unwrap());
        assert!(repo.list_for_user(alice).await.unwrap().is_empty());
    }
}
