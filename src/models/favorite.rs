//! Favorite model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Membership record: existence means the user favorited the event
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Favorite {
    pub user_id: String,
    pub event_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Result of a favorite toggle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ToggleResult {
    pub added: bool,
}
