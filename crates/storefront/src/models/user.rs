//! User domain types.

use chrono::{DateTime, Utc};

use mebel_core::{Login, UserId};

/// A storefront user (domain type).
///
/// Users are created on registration and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique login name.
    pub login: Login,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
