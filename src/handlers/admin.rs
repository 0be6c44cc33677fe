//! Admin moderation handlers

use axum::extract::{Path, State};
use axum::Json;

use crate::handlers::AppState;
use crate::middleware::auth::AuthContext;
use crate::models::event::Event;
use crate::utils::errors::{CornerClubError, Result};
use crate::utils::logging;

fn ensure_admin_panel(state: &AppState, ctx: &AuthContext) -> Result<()> {
    if !state.settings.features.admin_panel {
        return Err(CornerClubError::ServiceUnavailable(
            "Admin panel is disabled".to_string(),
        ));
    }
    ctx.require_admin()
}

/// GET /api/admin/events/pending — events awaiting moderation
pub async fn pending_events(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<Event>>> {
    ensure_admin_panel(&state, &ctx)?;

    let events = state.services.catalog_service.pending().await?;
    Ok(Json(events))
}

/// GET /api/admin/events/history — past moderation decisions
pub async fn event_history(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Vec<Event>>> {
    ensure_admin_panel(&state, &ctx)?;

    let events = state.services.catalog_service.history().await?;
    Ok(Json(events))
}

/// POST /api/admin/events/:id/approve
pub async fn approve_event(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(event_id): Path<i64>,
) -> Result<Json<Event>> {
    ensure_admin_panel(&state, &ctx)?;

    let event = state.services.catalog_service.approve(event_id).await?;
    logging::log_admin_action(&ctx.user_id, "approve_event", Some(&event_id.to_string()), None);

    Ok(Json(event))
}

/// POST /api/admin/events/:id/reject
///
/// Rejection is a status transition; the event stays in the moderation
/// history and is never deleted.
pub async fn reject_event(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(event_id): Path<i64>,
) -> Result<Json<Event>> {
    ensure_admin_panel(&state, &ctx)?;

    let event = state.services.catalog_service.reject(event_id).await?;
    logging::log_admin_action(&ctx.user_id, "reject_event", Some(&event_id.to_string()), None);

    Ok(Json(event))
}

/// GET /api/admin/stats — record counts for the admin dashboard
pub async fn stats(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<serde_json::Value>> {
    ensure_admin_panel(&state, &ctx)?;

    let stats = state.database.get_system_stats().await?;
    Ok(Json(stats))
}
