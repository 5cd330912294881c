//! Server-rendered pages.
//!
//! Pages render the catalog and cart directly; the script in
//! `static/js/app.js` drives the JSON API and reloads the page afterwards.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::{CartSummary, CurrentUser, Product};
use crate::services::CartService;
use crate::state::AppState;

// =============================================================================
// View Models
// =============================================================================

/// A catalog card: the product and how many the viewer already has in the cart.
pub struct ProductCard {
    pub product: Product,
    pub in_cart: Option<u32>,
}

// =============================================================================
// Templates
// =============================================================================

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub current_user: Option<CurrentUser>,
    pub cards: Vec<ProductCard>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub current_user: Option<CurrentUser>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub current_user: Option<CurrentUser>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub current_user: Option<CurrentUser>,
    pub cart: CartSummary,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub current_user: Option<CurrentUser>,
    pub cart: CartSummary,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /`: the catalog.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<IndexTemplate> {
    let products = ProductRepository::new(state.pool()).list().await?;

    let quantities: HashMap<_, _> = match &user {
        Some(user) => CartService::new(state.pool())
            .summary(user.id)
            .await?
            .lines
            .into_iter()
            .map(|line| (line.product_id, line.quantity))
            .collect(),
        None => HashMap::new(),
    };

    let cards = products
        .into_iter()
        .map(|product| ProductCard {
            in_cart: quantities.get(&product.id).copied(),
            product,
        })
        .collect();

    Ok(IndexTemplate {
        current_user: user,
        cards,
    })
}

/// `GET /login`
pub async fn login(OptionalAuth(user): OptionalAuth) -> LoginTemplate {
    LoginTemplate { current_user: user }
}

/// `GET /register`
pub async fn register(OptionalAuth(user): OptionalAuth) -> RegisterTemplate {
    RegisterTemplate { current_user: user }
}

/// `GET /cart`: requires login.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn cart(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<CartTemplate> {
    let cart = CartService::new(state.pool()).summary(user.id).await?;
    Ok(CartTemplate {
        current_user: Some(user),
        cart,
    })
}

/// `GET /checkout`: requires login.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<CheckoutTemplate> {
    let cart = CartService::new(state.pool()).summary(user.id).await?;
    Ok(CheckoutTemplate {
        current_user: Some(user),
        cart,
    })
}
