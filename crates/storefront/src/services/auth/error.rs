//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during registration and login.
///
/// `Display` of the client-facing variants is the message shown to the user.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login or password was blank.
    #[error("Логин и пароль обязательны.")]
    MissingCredentials,

    /// Login doesn't match `^[A-Za-z0-9_-]{3,30}$`.
    #[error("Логин: латиница, цифры, _ и -, от 3 до 30 символов.")]
    InvalidLogin(#[from] mebel_core::LoginError),

    /// Login is taken.
    #[error("Такой логин уже существует.")]
    UserAlreadyExists,

    /// Unknown login or wrong password.
    #[error("Неверный логин или пароль.")]
    InvalidCredentials,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
