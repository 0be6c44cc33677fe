//! Booking handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::handlers::AppState;
use crate::middleware::auth::AuthContext;
use crate::models::booking::{Booking, BookingCursor, CreateBookingRequest};
use crate::utils::errors::{CornerClubError, Result};

/// POST /api/bookings — commit a booking (free, or paid with a verified
/// payment confirmation)
pub async fn create_booking(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>)> {
    state
        .rate_limit
        .check_rate_limit(&ctx.user_id, ctx.is_admin)?;

    let booking = state.services.booking_service.book(&ctx, request).await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListQuery {
    pub last_booked_at: Option<DateTime<Utc>>,
    pub last_id: Option<i64>,
}

/// GET /api/users/:id/bookings — a user's booking history
pub async fn user_bookings(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(user_id): Path<String>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<serde_json::Value>> {
    if ctx.user_id != user_id && !ctx.is_admin {
        return Err(CornerClubError::PermissionDenied(
            "Bookings are only visible to their owner".to_string(),
        ));
    }

    let cursor = match (query.last_booked_at, query.last_id) {
        (Some(last_booked_at), Some(last_id)) => Some(BookingCursor {
            last_booked_at,
            last_id,
        }),
        (None, None) => None,
        _ => {
            return Err(CornerClubError::InvalidInput(
                "lastBookedAt and lastId must be provided together".to_string(),
            ))
        }
    };

    let page = state
        .services
        .booking_service
        .user_bookings(&user_id, cursor)
        .await?;

    Ok(Json(json!({
        "bookings": page.bookings,
        "hasMore": page.has_more,
    })))
}
