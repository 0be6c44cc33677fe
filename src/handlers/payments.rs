//! Payment collaborator handlers
//!
//! Order creation runs through the booking workflow so the charged amount is
//! always computed server-side from the event price, never taken from the
//! client.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::handlers::AppState;
use crate::middleware::auth::AuthContext;
use crate::services::booking::BookingIntent;
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub event_id: i64,
    pub quantity: i32,
}

/// POST /api/create-order — start a booking.
///
/// Paid events get a gateway order for checkout; free events are committed
/// immediately and return the booking instead.
pub async fn create_order(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<serde_json::Value>> {
    state
        .rate_limit
        .check_rate_limit(&ctx.user_id, ctx.is_admin)?;

    let intent = state
        .services
        .booking_service
        .start(&ctx, request.event_id, request.quantity)
        .await?;

    let body = match intent {
        BookingIntent::OrderCreated(order) => json!({
            "id": order.id,
            "amount": order.amount,
            "currency": order.currency,
        }),
        BookingIntent::Committed(booking) => json!({
            "booking": booking,
        }),
    };

    Ok(Json(body))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// POST /api/verify-payment — check a callback signature.
///
/// Validity is a result, not an exception: a bad signature returns
/// `valid: false`. The booking commit re-verifies independently.
pub async fn verify_payment(
    State(state): State<AppState>,
    _ctx: AuthContext,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<Json<serde_json::Value>> {
    let valid = state
        .services
        .payment_service
        .verify(&request.order_id, &request.payment_id, &request.signature)
        .is_ok();

    Ok(Json(json!({ "valid": valid })))
}
