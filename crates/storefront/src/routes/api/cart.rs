//! Cart API. Every endpoint requires a logged-in user.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::instrument;

use mebel_core::ProductId;

use super::{ApiJson, StatusResponse};
use crate::error::{Result, add_breadcrumb};
use crate::middleware::RequireAuth;
use crate::models::{CartLine, CartSummary};
use crate::services::{CartError, CartService};
use crate::services::cart::{parse_delta, parse_product_id};
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Body of `add` and `remove`.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub product_id: Option<Value>,
}

/// Body of `change`.
#[derive(Debug, Deserialize)]
pub struct ChangeRequest {
    #[serde(default)]
    pub product_id: Option<Value>,
    /// `None` when absent; `Some(Value::Null)` for an explicit `null`.
    #[serde(default, deserialize_with = "present")]
    pub delta: Option<Value>,
}

/// Keep explicit `null` distinguishable from an absent field.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// One cart line as JSON.
#[derive(Debug, Serialize)]
pub struct CartItemJson {
    pub product_id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl From<&CartLine> for CartItemJson {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name.clone(),
            price: line.price.amount,
            quantity: line.quantity,
            total: line.total().amount,
        }
    }
}

/// Body of `GET /api/cart/items`.
#[derive(Debug, Serialize)]
pub struct CartJson {
    pub items: Vec<CartItemJson>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl From<&CartSummary> for CartJson {
    fn from(summary: &CartSummary) -> Self {
        Self {
            items: summary.lines.iter().map(CartItemJson::from).collect(),
            total: summary.total.amount,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /api/cart/items`
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn items(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<CartJson>> {
    let summary = CartService::new(state.pool()).summary(user.id).await?;
    Ok(Json(CartJson::from(&summary)))
}

/// `POST /api/cart/add`
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(body): ApiJson<ProductRequest>,
) -> Result<Json<StatusResponse>> {
    let product_id = parse_product_id(body.product_id.as_ref())?;
    CartService::new(state.pool()).add(user.id, product_id).await?;

    let product = product_id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product.as_str())]));
    Ok(StatusResponse::ok())
}

/// `POST /api/cart/remove`
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(body): ApiJson<ProductRequest>,
) -> Result<Json<StatusResponse>> {
    // Nothing named, nothing to remove.
    let product_id = match parse_product_id(body.product_id.as_ref()) {
        Err(CartError::MissingProduct) => return Ok(StatusResponse::ok()),
        parsed => parsed?,
    };
    CartService::new(state.pool()).remove(user.id, product_id).await?;

    let product = product_id.to_string();
    add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", product.as_str())]));
    Ok(StatusResponse::ok())
}

/// `POST /api/cart/change`
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn change(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(body): ApiJson<ChangeRequest>,
) -> Result<Json<StatusResponse>> {
    let delta = parse_delta(body.delta.as_ref())?;
    let product_id = parse_product_id(body.product_id.as_ref())?;
    CartService::new(state.pool())
        .change(user.id, product_id, delta)
        .await?;

    let (product, delta) = (product_id.to_string(), delta.to_string());
    add_breadcrumb(
        "cart",
        "Changed quantity",
        Some(&[("product_id", product.as_str()), ("delta", delta.as_str())]),
    );
    Ok(StatusResponse::ok())
}
