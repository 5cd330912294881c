//! Handler state.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::StorefrontConfig;

/// Configuration and the database pool, shared by every request.
///
/// Cloning bumps a reference count; handlers take it by value through
/// `State<AppState>` and build short-lived repositories/services from
/// [`AppState::pool`].
#[derive(Clone)]
pub struct AppState {
    shared: Arc<Shared>,
}

struct Shared {
    config: StorefrontConfig,
    pool: SqlitePool,
}

impl AppState {
    /// Wrap an already-migrated pool and its configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: SqlitePool) -> Self {
        Self {
            shared: Arc::new(Shared { config, pool }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.shared.config
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.shared.pool
    }
}
