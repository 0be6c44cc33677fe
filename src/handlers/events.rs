//! Event catalog handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::handlers::AppState;
use crate::middleware::auth::AuthContext;
use crate::models::booking::Booking;
use crate::models::event::{CreateEventRequest, Event, EventCursor, EventFilter};
use crate::utils::errors::{CornerClubError, Result};
use crate::utils::helpers;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListQuery {
    pub city: Option<String>,
    pub category: Option<String>,
    pub last_date: Option<DateTime<Utc>>,
    pub last_id: Option<i64>,
}

/// GET /api/events — cursor-paginated catalog listing
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<serde_json::Value>> {
    let filter = EventFilter {
        city: helpers::filter_value(query.city.as_deref()),
        category: helpers::filter_value(query.category.as_deref()),
    };

    // Both cursor halves are required; one alone is an incomplete key
    let cursor = match (query.last_date, query.last_id) {
        (Some(last_date), Some(last_id)) => Some(EventCursor { last_date, last_id }),
        (None, None) => None,
        _ => {
            return Err(CornerClubError::InvalidInput(
                "lastDate and lastId must be provided together".to_string(),
            ))
        }
    };

    let page = state.services.catalog_service.list(&filter, cursor).await?;

    Ok(Json(json!({
        "events": page.events,
        "hasMore": page.has_more,
    })))
}

/// GET /api/events/:id — event detail
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<Event>> {
    let event = state
        .services
        .catalog_service
        .get(event_id)
        .await?
        .ok_or(CornerClubError::EventNotFound { event_id })?;

    Ok(Json(event))
}

/// POST /api/events — create an event (starts in pending status)
pub async fn create_event(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>)> {
    let event = state.services.catalog_service.create(&ctx, request).await?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/events/:id/bookings — attendee roster, creator only
pub async fn event_attendees(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(event_id): Path<i64>,
) -> Result<Json<Vec<Booking>>> {
    let roster = state
        .services
        .booking_service
        .attendee_roster(&ctx, event_id)
        .await?;

    Ok(Json(roster))
}
