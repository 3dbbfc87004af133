use async_trait::async_trait;
use sqlx::SqlitePool;

use super::DbError;

/// A registered user; `token` authenticates API requests
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub token: String,
    pub created_at: i64,
}

/// Repository trait for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; fails with a unique violation if the name or token is taken
    async fn create(&self, username: &str, token: &str, created_at: i64)
        -> Result<User, DbError>;

    async fn get_by_token(&self, token: &str) -> Result<Option<User>, DbError>;
}

/// SQLite implementation of UserRepository
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(
        &self,
        username: &str,
        token: &str,
        created_at: i64,
    ) -> Result<User, DbError> {
        let id = sqlx::query("INSERT INTO users (username, token, created_at) VALUES (?, ?, ?)")
            .bind(username)
            .bind(token)
            .bind(created_at)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(User {
            id,
            username: username.to_string(),
            token: token.to_string(),
            created_at,
        })
    }

    async fn get_by_token(&self, token: &str) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, token, created_at FROM users WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_create_and_get_by_token() {
        let repo = SqliteUserRepository::new(test_pool().await);

        let user = repo.create("ivan", "secret-token", 1700000000).await.unwrap();
        assert!(user.id > 0);

        let found = repo.get_by_token("secret-token").await.unwrap();
        assert_eq!(found, Some(user));
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let repo = SqliteUserRepository::new(test_pool().await);
        repo.create("ivan", "secret-token", 1700000000).await.unwrap();

        assert!(repo.get_by_token("other").await.unwrap().is_none());
    }
}
