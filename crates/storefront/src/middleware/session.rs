//! Session middleware configuration.
//!
//! Sets up `SQLite`-backed sessions using tower-sessions.

use sqlx::SqlitePool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "mebel_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session table if it doesn't exist.
///
/// # Errors
///
/// Returns `sqlx::Error` if the table cannot be created.
pub async fn migrate_session_store(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    SqliteStore::new(pool.clone()).migrate().await
}

/// Create the session layer with `SQLite` store.
///
/// The session table must already exist (see [`migrate_session_store`]).
///
/// # Arguments
///
/// * `pool` - `SQLite` connection pool
/// * `config` - Storefront configuration (for the `Secure` cookie flag)
#[must_use]
pub fn create_session_layer(
    pool: &SqlitePool,
    config: &StorefrontConfig,
) -> SessionManagerLayer<SqliteStore> {
    let store = SqliteStore::new(pool.clone());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
