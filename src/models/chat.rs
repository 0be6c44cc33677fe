//! Chat message model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    pub id: i64,
    pub channel_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub sender_avatar: Option<String>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMessageRequest {
    pub text: String,
}

/// Chat channel identity: one channel per event, plus one global channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Channel {
    Global,
    Event(i64),
}

impl Channel {
    /// Parse a channel token. Event channels use the `event:{id}` form;
    /// anything matching the configured global token is the global channel.
    pub fn parse(token: &str, global_channel: &str) -> Option<Channel> {
        if token == global_channel {
            return Some(Channel::Global);
        }
        let id = token.strip_prefix("event:")?;
        id.parse::<i64>().ok().map(Channel::Event)
    }

    /// Storage/pub-sub token for this channel
    pub fn token(&self, global_channel: &str) -> String {
        match self {
            Channel::Global => global_channel.to_string(),
            Channel::Event(id) => format!("event:{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLOBAL: &str = "general_community";

    #[test]
    fn test_parse_global_channel() {
        assert_eq!(Channel::parse(GLOBAL, GLOBAL), Some(Channel::Global));
    }

    #[test]
    fn test_parse_event_channel() {
        assert_eq!(Channel::parse("event:42", GLOBAL), Some(Channel::Event(42)));
        assert_eq!(Channel::parse("event:abc", GLOBAL), None);
        assert_eq!(Channel::parse("something-else", GLOBAL), None);
    }

    #[test]
    fn test_token_round_trip() {
        for channel in [Channel::Global, Channel::Event(7)] {
            let token = channel.token(GLOBAL);
            assert_eq!(Channel::parse(&token, GLOBAL), Some(channel));
        }
    }
}
