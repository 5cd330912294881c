//! User repository for database operations.
//!
//! Credential store for storefront accounts: logins and their password hashes.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use mebel_core::{Login, UserId};

use super::{RepositoryError, is_unique_violation};
use crate::models::User;

/// Row shape shared by the user queries.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    login: String,
    created_at: DateTime<Utc>,
}

/// User row joined with its password hash.
#[derive(sqlx::FromRow)]
struct UserWithHashRow {
    id: UserId,
    login: String,
    created_at: DateTime<Utc>,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let login = Login::parse(&row.login).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid login in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            login,
            created_at: row.created_at,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user with a login and an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the login already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, login: &Login, password_hash: &str) -> Result<User, RepositoryError> {
        let row: UserRow = sqlx::query_as(
            r"
            INSERT INTO users (login, password_hash, created_at)
            VALUES (?, ?, ?)
            RETURNING id, login, created_at
            ",
        )
        .bind(login)
        .bind(password_hash)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return RepositoryError::Conflict("login already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        User::try_from(row)
    }

    /// Get a user and their password hash by login.
    ///
    /// Returns `None` if the user doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        login: &Login,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row: Option<UserWithHashRow> = sqlx::query_as(
            "SELECT id, login, created_at, password_hash FROM users WHERE login = ?",
        )
        .bind(login)
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let user = User::try_from(UserRow {
            id: r.id,
            login: r.login,
            created_at: r.created_at,
        })?;

        Ok(Some((user, r.password_hash)))
    }

    /// Count registered users.
    #[cfg(test)]
    pub(crate) async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let pool = memory_pool().await;
        let users = UserRepository::new(&pool);
        let login = Login::parse("buyer_01").unwrap();

        let created = users.create(&login, "hash-value").await.unwrap();
        assert_eq!(created.login, login);

        let (found, hash) = users.get_with_password_hash(&login).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(hash, "hash-value");
    }

    #[tokio::test]
    async fn test_duplicate_login_is_conflict() {
        let pool = memory_pool().await;
        let users = UserRepository::new(&pool);
        let login = Login::parse("buyer_01").unwrap();

        users.create(&login, "first").await.unwrap();
        let err = users.create(&login, "second").await.unwrap_err();

        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_login_is_none() {
        let pool = memory_pool().await;
        let users = UserRepository::new(&pool);
        let login = Login::parse("nobody").unwrap();

        assert!(users.get_with_password_hash(&login).await.unwrap().is_none());
    }
}
