//! Authentication service.
//!
//! Password registration and login. Session handling lives in the route
//! layer; this service only answers "who is this".

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use mebel_core::Login;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user.
    ///
    /// The login is trimmed; the password is taken as-is.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is blank.
    /// Returns `AuthError::InvalidLogin` if the login format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the login is taken.
    pub async fn register(&self, login: &str, password: &str) -> Result<User, AuthError> {
        let login = login.trim();
        if login.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let login = Login::parse(login)?;
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&login, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, login = %user.login, "User registered");
        Ok(user)
    }

    /// Log in with login and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the login is unknown, badly
    /// formed, or the password is wrong.
    pub async fn login(&self, login: &str, password: &str) -> Result<User, AuthError> {
        // A login that can't exist can't match.
        let login = Login::parse(login.trim()).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_with_password_hash(&login)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password using Argon2id with a random salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHash)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    #[test]
    fn test_hash_and_verify_password() {
        let password = "correct horse battery staple";
        let hash = hash_password(password).unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(password, &hash).is_ok());
        assert!(matches!(
            verify_password("wrong", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let first = hash_password("secret").unwrap();
        let second = hash_password("secret").unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        let user = auth.register("  buyer_01 ", "pa55word").await.unwrap();
        assert_eq!(user.login.as_str(), "buyer_01");

        let logged_in = auth.login("buyer_01", "pa55word").await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn test_register_rejects_blank_fields() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        assert!(matches!(
            auth.register("   ", "pw").await,
            Err(AuthError::MissingCredentials)
        ));
        assert!(matches!(
            auth.register("buyer", "").await,
            Err(AuthError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_login_without_creating_user() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        let too_long = "a".repeat(31);
        for login in ["ab", "иван", "john doe", too_long.as_str()] {
            let err = auth.register(login, "pw").await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidLogin(_)), "{login}");
            assert_eq!(
                err.to_string(),
                "Логин: латиница, цифры, _ и -, от 3 до 30 символов."
            );
        }

        assert_eq!(UserRepository::new(&pool).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_login() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);

        auth.register("buyer", "one").await.unwrap();
        let err = auth.register("buyer", "two").await.unwrap_err();

        assert!(matches!(err, AuthError::UserAlreadyExists));
        assert_eq!(err.to_string(), "Такой логин уже существует.");
        assert_eq!(UserRepository::new(&pool).count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let pool = memory_pool().await;
        let auth = AuthService::new(&pool);
        auth.register("buyer", "right").await.unwrap();

        for (login, password) in [("buyer", "wrong"), ("nobody", "right"), ("", ""), ("x y", "right")] {
            let err = auth.login(login, password).await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials), "{login}");
            assert_eq!(err.to_string(), "Неверный логин или пароль.");
        }
    }
}
