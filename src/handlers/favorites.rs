//! Favorites handlers

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::handlers::AppState;
use crate::middleware::auth::AuthContext;
use crate::models::event::Event;
use crate::utils::errors::{CornerClubError, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleFavoriteBody {
    pub event_id: i64,
}

/// POST /api/favorites/toggle — flip favorite membership
pub async fn toggle_favorite(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(body): Json<ToggleFavoriteBody>,
) -> Result<Json<serde_json::Value>> {
    let result = state
        .services
        .favorites_service
        .toggle(&ctx, body.event_id)
        .await?;

    Ok(Json(json!({ "added": result.added })))
}

/// GET /api/users/:id/favorites — favorited events
pub async fn list_favorites(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Event>>> {
    if ctx.user_id != user_id && !ctx.is_admin {
        return Err(CornerClubError::PermissionDenied(
            "Favorites are only visible to their owner".to_string(),
        ));
    }

    let events = state.services.favorites_service.list(&user_id).await?;
    Ok(Json(events))
}

/// GET /api/users/:id/favorites/:event_id/check — membership check
pub async fn check_favorite(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path((user_id, event_id)): Path<(String, i64)>,
) -> Result<Json<serde_json::Value>> {
    if ctx.user_id != user_id && !ctx.is_admin {
        return Err(CornerClubError::PermissionDenied(
            "Favorites are only visible to their owner".to_string(),
        ));
    }

    let favorited = state
        .services
        .favorites_service
        .is_favorited(&user_id, event_id)
        .await?;

    Ok(Json(json!({ "isFavorited": favorited })))
}
