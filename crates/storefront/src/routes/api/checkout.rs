//! Checkout API.

use axum::{Json, extract::State};
use tracing::instrument;

use super::{ApiJson, StatusResponse};
use crate::error::{Result, add_breadcrumb};
use crate::middleware::RequireAuth;
use crate::services::{CheckoutRequest, CheckoutService};
use crate::state::AppState;

/// `POST /api/checkout`: validate the form and empty the cart.
///
/// The request is logged through its redacting `Debug`, never field by field.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn submit(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(request): ApiJson<CheckoutRequest>,
) -> Result<Json<StatusResponse>> {
    let lines = CheckoutService::new(state.pool())
        .submit(user.id, &request)
        .await?;

    let lines = lines.to_string();
    add_breadcrumb("checkout", "Order placed", Some(&[("lines", lines.as_str())]));
    Ok(StatusResponse::ok_with_message("Заказ оформлен!"))
}
