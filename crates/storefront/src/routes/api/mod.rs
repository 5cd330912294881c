//! JSON API consumed by the storefront scripts.
//!
//! Mutations answer with the status envelope:
//!
//! ```json
//! {"status": "ok"}
//! {"status": "error", "message": "..."}
//! ```
//!
//! Errors are produced by [`AppError`](crate::error::AppError).

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;

use axum::{
    Json, Router,
    extract::FromRequest,
    routing::{get, post},
};
use serde::Serialize;

use crate::error::AppError;
use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// JSON body extractor whose rejections use the error envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Success (or error) envelope for mutation endpoints.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusResponse {
    /// `{"status": "ok"}`
    #[must_use]
    pub const fn ok() -> Json<Self> {
        Json(Self {
            status: "ok",
            message: None,
        })
    }

    /// `{"status": "ok", "message": ...}`
    #[must_use]
    pub fn ok_with_message(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            status: "ok",
            message: Some(message.into()),
        })
    }
}

/// Create the auth API router, rate limited per client IP when enabled.
fn auth_routes(rate_limit: bool) -> Router<AppState> {
    let router = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let router = if rate_limit {
        router.layer(auth_rate_limiter())
    } else {
        router
    };

    // Logout is never limited.
    router.route("/logout", post(auth::logout))
}

/// Create the cart API router.
fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(cart::items))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/change", post(cart::change))
}

/// Create all `/api` routes.
pub fn routes(rate_limit: bool) -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list))
        .nest("/cart", cart_routes())
        .nest("/auth", auth_routes(rate_limit))
        .route("/checkout", post(checkout::submit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_omits_message() {
        let Json(body) = StatusResponse::ok();
        let json = serde_json::to_value(body).unwrap_or_default();
        assert_eq!(json, serde_json::json!({"status": "ok"}));
    }
}
