//! Registration, login and logout API.

use axum::{Json, extract::State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::{ApiJson, StatusResponse};
use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::AuthService;
use crate::state::AppState;

/// Body of `register` and `login`. Missing fields are empty.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CredentialsRequest {
    pub login: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Put the user into the session and the Sentry scope.
async fn establish_session(session: &Session, user: &User) -> Result<()> {
    set_current_user(session, &CurrentUser::from(user)).await?;
    set_sentry_user(&user.id, Some(user.login.as_str()));
    Ok(())
}

/// `POST /api/auth/register`: create an account and log it in.
#[instrument(skip(state, session, body), fields(login = %body.login.trim()))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    ApiJson(body): ApiJson<CredentialsRequest>,
) -> Result<Json<StatusResponse>> {
    let user = AuthService::new(state.pool())
        .register(&body.login, &body.password)
        .await?;

    establish_session(&session, &user).await?;
    Ok(StatusResponse::ok())
}

/// `POST /api/auth/login`
#[instrument(skip(state, session, body), fields(login = %body.login.trim()))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ApiJson(body): ApiJson<CredentialsRequest>,
) -> Result<Json<StatusResponse>> {
    let user = AuthService::new(state.pool())
        .login(&body.login, &body.password)
        .await
        .inspect_err(|_| tracing::info!("Failed login attempt"))?;

    establish_session(&session, &user).await?;
    tracing::info!(user_id = %user.id, "User logged in");
    Ok(StatusResponse::ok())
}

/// `POST /api/auth/logout`
#[instrument(skip(session, user), fields(user_id = %user.id))]
pub async fn logout(session: Session, RequireAuth(user): RequireAuth) -> Result<Json<StatusResponse>> {
    clear_current_user(&session).await?;
    clear_sentry_user();
    tracing::info!("User logged out");
    Ok(StatusResponse::ok())
}
