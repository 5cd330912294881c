//! CLI subcommands.

pub mod catalog;
pub mod migrate;
pub mod seed;
pub mod user;

use secrecy::SecretString;
use sqlx::SqlitePool;
use thiserror::Error;

use mebel_storefront::db::{self, MigrationError, RepositoryError};
use mebel_storefront::services::AuthError;

/// Errors shared by all commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] MigrationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Connect to the storefront database named by the environment.
///
/// # Errors
///
/// Returns `CommandError` if no database URL is configured or the
/// connection fails.
pub async fn connect() -> Result<SqlitePool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("STOREFRONT_DATABASE_URL"))?;

    tracing::info!("Connecting to storefront database...");
    Ok(db::create_pool(&database_url).await?)
}
