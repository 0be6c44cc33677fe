//! Chat message repository implementation

use sqlx::PgPool;

use crate::models::chat::ChatMessage;
use crate::utils::errors::CornerClubError;

const MESSAGE_COLUMNS: &str =
    "id, channel_id, sender_id, sender_name, sender_avatar, text, created_at";

#[derive(Clone)]
#[derive(Debug)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a message. The creation timestamp is assigned by the database
    /// so the channel ordering is decided by the storage layer, not clients.
    pub async fn append(
        &self,
        channel_id: &str,
        sender_id: &str,
        sender_name: &str,
        sender_avatar: Option<&str>,
        text: &str,
    ) -> Result<ChatMessage, CornerClubError> {
        let message = sqlx::query_as::<_, ChatMessage>(&format!(
            r#"
            INSERT INTO chat_messages (channel_id, sender_id, sender_name, sender_avatar, text)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(channel_id)
        .bind(sender_id)
        .bind(sender_name)
        .bind(sender_avatar)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    /// Get the most recent `limit` messages of a channel in delivery order
    /// (ascending). Older history is not served through this contract.
    pub async fn latest_window(
        &self,
        channel_id: &str,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, CornerClubError> {
        let mut messages = sqlx::query_as::<_, ChatMessage>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS} FROM chat_messages
            WHERE channel_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#
        ))
        .bind(channel_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        messages.reverse();
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chat_repository_creation() {
        // This would require a test database setup
        // For now, just test that the repository can be created
        let pool = PgPool::connect("postgresql://test").await;
        if let Ok(pool) = pool {
            let repo = ChatRepository::new(pool);
            assert!(!repo.pool.is_closed());
        }
    }
}
