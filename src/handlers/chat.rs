//! Chat handlers
//!
//! Bounded feed window over GET, live delivery over server-sent events.

use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use axum::Json;
use futures::{Stream, StreamExt};

use crate::handlers::AppState;
use crate::middleware::auth::AuthContext;
use crate::models::chat::{ChatMessage, PostMessageRequest};
use crate::utils::errors::Result;

/// GET /api/chat/:channel/messages — the current feed window
pub async fn get_messages(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(channel): Path<String>,
) -> Result<Json<Vec<ChatMessage>>> {
    let channel = state.services.chat_service.parse_channel(&channel)?;
    let messages = state.services.chat_service.feed(&ctx, &channel).await?;

    Ok(Json(messages))
}

/// POST /api/chat/:channel/messages — append a message
pub async fn post_message(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(channel): Path<String>,
    Json(request): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>)> {
    state
        .rate_limit
        .check_rate_limit(&ctx.user_id, ctx.is_admin)?;

    let channel = state.services.chat_service.parse_channel(&channel)?;
    let message = state
        .services
        .chat_service
        .post(&ctx, &channel, &request.text)
        .await?;

    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/chat/:channel/stream — live feed as server-sent events.
///
/// Each SSE event carries one batch of messages; the first batch is the
/// current window. Closing the connection drops the subscription, which
/// detaches the underlying pub/sub connection.
pub async fn stream_messages(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(channel): Path<String>,
) -> Result<Sse<impl Stream<Item = std::result::Result<SseEvent, Infallible>>>> {
    let channel = state.services.chat_service.parse_channel(&channel)?;
    let subscription = state
        .services
        .chat_service
        .subscribe(&ctx, &channel)
        .await?;

    let stream = subscription.into_stream().map(|batch| {
        let event = match SseEvent::default().json_data(&batch) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode chat batch for SSE");
                SseEvent::default().data("[]")
            }
        };
        Ok(event)
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
