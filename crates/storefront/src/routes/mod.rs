//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! # Pages
//! GET  /                    - Catalog
//! GET  /login               - Login page
//! GET  /register            - Registration page
//! GET  /cart                - Cart (requires auth, redirects to /login)
//! GET  /checkout            - Checkout form (requires auth, redirects to /login)
//!
//! # JSON API
//! GET  /api/products        - Catalog
//! GET  /api/cart/items      - Cart lines and total (auth)
//! POST /api/cart/add        - Add one unit (auth)
//! POST /api/cart/remove     - Remove a line (auth)
//! POST /api/cart/change     - Change quantity by delta (auth)
//! POST /api/auth/register   - Register and log in (rate limited)
//! POST /api/auth/login      - Log in (rate limited)
//! POST /api/auth/logout     - Log out (auth)
//! POST /api/checkout        - Validate and clear the cart (auth)
//! ```

pub mod api;
pub mod pages;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes(rate_limit: bool) -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/login", get(pages::login))
        .route("/register", get(pages::register))
        .route("/cart", get(pages::cart))
        .route("/checkout", get(pages::checkout))
        .nest("/api", api::routes(rate_limit))
}
