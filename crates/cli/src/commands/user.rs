//! Customer account management.

use mebel_storefront::services::AuthService;

use super::{CommandError, connect};

/// Create a customer account with the same rules as web registration.
///
/// # Errors
///
/// Returns `CommandError` if the login is invalid or already taken.
pub async fn create(login: &str, password: &str) -> Result<(), CommandError> {
    let pool = connect().await?;
    let user = AuthService::new(&pool).register(login, password).await?;

    tracing::info!(user_id = %user.id, login = %user.login, "Customer account created");
    Ok(())
}
