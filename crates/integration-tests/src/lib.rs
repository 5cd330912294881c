//! End-to-end tests for the Mebel storefront.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the storefront against a scratch database
//! STOREFRONT_DATABASE_URL=sqlite://e2e.db STOREFRONT_BASE_URL=http://localhost:3000 \
//!     STOREFRONT_RATE_LIMIT=false cargo run -p mebel-storefront
//!
//! # Run the ignored live-server tests
//! cargo test -p mebel-integration-tests -- --ignored
//! ```
//!
//! `STOREFRONT_URL` overrides the target (default `http://localhost:3000`).

use reqwest::{Client, Response};
use serde_json::{Value, json};

/// Base URL of the storefront under test.
#[must_use]
pub fn storefront_url() -> String {
    std::env::var("STOREFRONT_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A login that is valid and unique per call.
#[must_use]
pub fn unique_login() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("e2e_{}", &id[..12])
}

/// One browser-like visitor: its own cookie jar against the storefront.
pub struct Visitor {
    pub client: Client,
    pub base_url: String,
}

impl Visitor {
    /// New anonymous visitor.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: storefront_url(),
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the server is unreachable.
    pub async fn get(&self, path: &str) -> reqwest::Result<Response> {
        self.client.get(self.url(path)).send().await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the server is unreachable.
    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Result<Response> {
        self.client.post(self.url(path)).json(body).send().await
    }

    /// Register `login` and keep the session cookie.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the server is unreachable.
    pub async fn register(&self, login: &str, password: &str) -> reqwest::Result<Response> {
        self.post(
            "/api/auth/register",
            &json!({ "login": login, "password": password }),
        )
        .await
    }

    /// Current cart as returned by `GET /api/cart/items`.
    ///
    /// # Errors
    ///
    /// Returns the transport or decoding error.
    pub async fn cart(&self) -> reqwest::Result<Value> {
        self.get("/api/cart/items").await?.json().await
    }
}

impl Default for Visitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Checkout form with values that pass every rule.
#[must_use]
pub fn valid_checkout() -> Value {
    json!({
        "card": "4111 1111 1111 1111",
        "cvv": "123",
        "name": "IVAN PETROV",
        "city": "Санкт-Петербург",
        "street": "Невский пр.",
        "house": "33/1",
        "apartment": "15",
    })
}
