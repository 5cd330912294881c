//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Every error renders as the JSON envelope the storefront scripts expect:
//!
//! ```json
//! {"status": "error", "message": "..."}
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{AuthError, CartError, CheckoutError};

/// Message for failures the client can't act on.
const INTERNAL_MESSAGE: &str = "Внутренняя ошибка сервера. Попробуйте позже.";

/// Message for bodies that aren't the expected JSON.
const MALFORMED_BODY_MESSAGE: &str = "Неверный формат запроса.";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Registration or login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Session store failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        Self::BadRequest(MALFORMED_BODY_MESSAGE.to_string())
    }
}

/// Body of every API error response.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    message: &'a str,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(err) => match err {
                AuthError::MissingCredentials | AuthError::InvalidLogin(_) => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Cart(err) => match err {
                CartError::MissingProduct | CartError::InvalidDelta => StatusCode::BAD_REQUEST,
                CartError::ProductNotFound => StatusCode::NOT_FOUND,
                CartError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Checkout(err) => match err {
                CheckoutError::Payment(_) | CheckoutError::Address(_) => StatusCode::BAD_REQUEST,
                CheckoutError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Internal details are never exposed.
    #[must_use]
    pub fn client_message(&self) -> String {
        if self.status_code().is_server_error() {
            return INTERNAL_MESSAGE.to_string();
        }

        match self {
            Self::Auth(err) => err.to_string(),
            Self::Cart(err) => err.to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::BadRequest(message) => message.clone(),
            _ => INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let message = self.client_message();
        let body = ErrorBody {
            status: "error",
            message: &message,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, username: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            username: username.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "12")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::validation::{AddressError, PaymentError};

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_envelope_shape() {
        let (status, body) = render(AppError::Cart(CartError::MissingProduct)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Не указан товар.");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Auth(AuthError::UserAlreadyExists).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Auth(AuthError::InvalidCredentials).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Auth(AuthError::MissingCredentials).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Cart(CartError::ProductNotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Checkout(CheckoutError::Payment(PaymentError::Cvv)).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database(RepositoryError::DataCorruption("x".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::Database(RepositoryError::Database(sqlx::Error::Protocol(
            "connection refused on /var/db".to_string(),
        )));
        assert_eq!(err.client_message(), INTERNAL_MESSAGE);

        let err = AppError::Cart(CartError::Repository(RepositoryError::DataCorruption(
            "bad quantity".to_string(),
        )));
        assert_eq!(err.client_message(), INTERNAL_MESSAGE);
    }

    #[test]
    fn test_address_message_joins_all_errors() {
        let err = AppError::Checkout(CheckoutError::Address(vec![
            AddressError::House,
            AddressError::Apartment,
        ]));
        assert_eq!(
            err.client_message(),
            "Номер дома должен быть числом (например: 33, 33/1, 12-А). \
             Номер квартиры должен быть числом (например: 15, 15/2)."
        );
    }
}
