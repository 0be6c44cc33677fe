//! User profile handlers

use axum::extract::{Path, State};
use axum::Json;

use crate::handlers::AppState;
use crate::middleware::auth::AuthContext;
use crate::models::event::{Event, EventStatus};
use crate::models::user::{UpsertProfileRequest, UserProfile};
use crate::utils::errors::{CornerClubError, Result};

/// GET /api/users/:id — fetch a profile.
///
/// Fetching your own profile creates it lazily on first login, seeded from
/// the auth provider snapshot. Profiles carry contact details, so other
/// users' profiles are not readable.
pub async fn get_profile(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(user_id): Path<String>,
) -> Result<Json<UserProfile>> {
    if ctx.user_id == user_id {
        let profile = state.services.profile_service.ensure_exists(&ctx).await?;
        return Ok(Json(profile));
    }

    if !ctx.is_admin {
        return Err(CornerClubError::PermissionDenied(
            "Profiles are only visible to their owner".to_string(),
        ));
    }

    let profile = state
        .services
        .profile_service
        .get(&user_id)
        .await?
        .ok_or(CornerClubError::UserNotFound { user_id })?;

    Ok(Json(profile))
}

/// POST /api/users/:id — upsert a profile
pub async fn upsert_profile(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(user_id): Path<String>,
    Json(request): Json<UpsertProfileRequest>,
) -> Result<Json<UserProfile>> {
    let profile = state
        .services
        .profile_service
        .upsert(&ctx, &user_id, request)
        .await?;

    Ok(Json(profile))
}

/// GET /api/users/:id/hosted-events — events created by a user.
///
/// The owner sees every status; everyone else only sees approved events.
pub async fn hosted_events(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Event>>> {
    let mut events = state.services.catalog_service.hosted_by(&user_id).await?;

    if ctx.user_id != user_id && !ctx.is_admin {
        events.retain(|event| event.status == EventStatus::Approved.as_str());
    }

    Ok(Json(events))
}
