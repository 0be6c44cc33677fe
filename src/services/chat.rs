//! Chat service implementation
//!
//! Append-only channel feeds with Redis pub/sub fan-out. Event channels are
//! restricted to the event creator and booked attendees; the global channel
//! only requires authentication.

use async_stream::stream;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::middleware::auth::AuthContext;
use crate::models::chat::{Channel, ChatMessage};
use crate::models::event::EventStatus;
use crate::services::redis::RedisService;
use crate::utils::errors::{CornerClubError, Result};
use crate::utils::logging;

/// Maximum accepted message length in characters
const MAX_MESSAGE_CHARS: usize = 1000;

#[derive(Clone)]
pub struct ChatService {
    db: DatabaseService,
    redis: RedisService,
    settings: Settings,
}

impl ChatService {
    pub fn new(db: DatabaseService, redis: RedisService, settings: Settings) -> Self {
        Self {
            db,
            redis,
            settings,
        }
    }

    /// Parse a channel token against the configured global channel
    pub fn parse_channel(&self, token: &str) -> Result<Channel> {
        Channel::parse(token, &self.settings.chat.global_channel)
            .ok_or_else(|| CornerClubError::InvalidInput(format!("Unknown channel: {}", token)))
    }

    /// Check that the caller may read and post in a channel.
    ///
    /// Event channels admit the creator and booked attendees; a pending
    /// event admits only its creator. The global channel admits any
    /// authenticated user.
    pub async fn ensure_access(&self, ctx: &AuthContext, channel: &Channel) -> Result<()> {
        let event_id = match channel {
            Channel::Global => return Ok(()),
            Channel::Event(event_id) => *event_id,
        };

        let event = self.db.require_event(event_id).await?;

        if event.creator_id == ctx.user_id {
            return Ok(());
        }

        if event.status != EventStatus::Approved.as_str() {
            return Err(CornerClubError::PermissionDenied(
                "This event chat is not open yet".to_string(),
            ));
        }

        if self.db.bookings.has_booking(event_id, &ctx.user_id).await? {
            return Ok(());
        }

        Err(CornerClubError::PermissionDenied(
            "Only attendees and the event creator can access this chat".to_string(),
        ))
    }

    /// Post a message: append to storage, then publish for live delivery.
    /// Ordering is decided by the storage-assigned timestamp, not by
    /// publish order.
    pub async fn post(&self, ctx: &AuthContext, channel: &Channel, text: &str) -> Result<ChatMessage> {
        if !self.settings.features.chat {
            return Err(CornerClubError::ServiceUnavailable(
                "Chat is currently disabled".to_string(),
            ));
        }

        self.ensure_access(ctx, channel).await?;

        let text = text.trim();
        if text.is_empty() {
            return Err(CornerClubError::InvalidInput(
                "Message text is required".to_string(),
            ));
        }
        if text.chars().count() > MAX_MESSAGE_CHARS {
            return Err(CornerClubError::InvalidInput(format!(
                "Messages are limited to {} characters",
                MAX_MESSAGE_CHARS
            )));
        }

        let token = channel.token(&self.settings.chat.global_channel);
        let sender_name = ctx.name.as_deref().unwrap_or("Anonymous");

        let message = self
            .db
            .chat
            .append(&token, &ctx.user_id, sender_name, ctx.avatar.as_deref(), text)
            .await?;

        // Live delivery is best-effort; the message is already durable and
        // will appear in the next feed window either way.
        if let Err(e) = self.redis.publish(&pubsub_channel(&token), &message).await {
            warn!(channel_id = %token, error = %e, "Chat fan-out publish failed");
        }

        logging::log_chat_event(&token, &ctx.user_id, "message_posted");

        Ok(message)
    }

    /// The bounded feed window: most recent messages in delivery order
    pub async fn feed(&self, ctx: &AuthContext, channel: &Channel) -> Result<Vec<ChatMessage>> {
        self.ensure_access(ctx, channel).await?;

        let token = channel.token(&self.settings.chat.global_channel);
        self.db
            .chat
            .latest_window(&token, self.settings.chat.feed_limit)
            .await
    }

    /// Open a live subscription: the current feed window as a first batch,
    /// then one batch per newly published message. Dropping the handle
    /// aborts the relay task, which closes the pub/sub connection.
    pub async fn subscribe(&self, ctx: &AuthContext, channel: &Channel) -> Result<ChatSubscription> {
        self.ensure_access(ctx, channel).await?;

        let token = channel.token(&self.settings.chat.global_channel);
        let initial = self
            .db
            .chat
            .latest_window(&token, self.settings.chat.feed_limit)
            .await?;

        let (tx, rx) = mpsc::channel::<Vec<ChatMessage>>(32);

        if !initial.is_empty() {
            // The channel was just created with room for the first batch
            let _ = tx.try_send(initial);
        }

        let client = self.redis.client().clone();
        let pubsub_name = self.redis.channel_name(&pubsub_channel(&token));
        let channel_id = token.clone();

        let task = tokio::spawn(async move {
            let conn = match client.get_async_connection().await {
                Ok(conn) => conn,
                Err(e) => {
                    warn!(channel_id = %channel_id, error = %e, "Chat subscription connect failed");
                    return;
                }
            };

            let mut pubsub = conn.into_pubsub();
            if let Err(e) = pubsub.subscribe(&pubsub_name).await {
                warn!(channel_id = %channel_id, error = %e, "Chat subscription subscribe failed");
                return;
            }

            let mut messages = pubsub.on_message();
            while let Some(msg) = messages.next().await {
                let payload: String = match msg.get_payload() {
                    Ok(payload) => payload,
                    Err(e) => {
                        warn!(channel_id = %channel_id, error = %e, "Bad chat payload");
                        continue;
                    }
                };

                match serde_json::from_str::<ChatMessage>(&payload) {
                    Ok(message) => {
                        if tx.send(vec![message]).await.is_err() {
                            // Subscriber went away; detach
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(channel_id = %channel_id, error = %e, "Undecodable chat payload");
                    }
                }
            }

            debug!(channel_id = %channel_id, "Chat subscription relay finished");
        });

        Ok(ChatSubscription { rx, task })
    }
}

fn pubsub_channel(token: &str) -> String {
    format!("chat:{}", token)
}

/// Cancellable handle over a live chat feed
pub struct ChatSubscription {
    rx: mpsc::Receiver<Vec<ChatMessage>>,
    task: JoinHandle<()>,
}

impl ChatSubscription {
    /// Next batch of messages; `None` once the subscription is closed
    pub async fn next_batch(&mut self) -> Option<Vec<ChatMessage>> {
        self.rx.recv().await
    }

    /// Detach from the channel
    pub fn cancel(self) {
        // Drop does the work
    }

    /// Adapt the subscription into a lazy stream of batches
    pub fn into_stream(mut self) -> impl Stream<Item = Vec<ChatMessage>> {
        stream! {
            while let Some(batch) = self.next_batch().await {
                yield batch;
            }
        }
    }
}

impl Drop for ChatSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pubsub_channel_naming() {
        assert_eq!(pubsub_channel("general_community"), "chat:general_community");
        assert_eq!(pubsub_channel("event:12"), "chat:event:12");
    }
}
