//! Event model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub venue: String,
    pub address: Option<String>,
    pub city: String,
    pub category: String,
    pub price: i64,
    pub currency: String,
    pub capacity: i32,
    pub attendees: i32,
    pub image: Option<String>,
    pub creator_id: String,
    pub creator_name: String,
    pub creator_avatar: Option<String>,
    pub status: String,
    pub social_instagram: Option<String>,
    pub social_facebook: Option<String>,
    pub social_youtube: Option<String>,
    pub gallery: serde_json::Value,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Remaining seats for this event
    pub fn seats_left(&self) -> i32 {
        self.capacity - self.attendees
    }

    /// Whether the event is free of charge
    pub fn is_free(&self) -> bool {
        self.price == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub venue: String,
    pub address: Option<String>,
    pub city: String,
    pub category: String,
    pub price: i64,
    pub capacity: i32,
    pub image: Option<String>,
    pub social_instagram: Option<String>,
    pub social_facebook: Option<String>,
    pub social_youtube: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
}

/// Closed set of event categories, matching the catalog filter surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Music,
    Food,
    Comedy,
    Fitness,
    Art,
    Tech,
    Social,
}

impl EventCategory {
    pub const ALL: [EventCategory; 7] = [
        EventCategory::Music,
        EventCategory::Food,
        EventCategory::Comedy,
        EventCategory::Fitness,
        EventCategory::Art,
        EventCategory::Tech,
        EventCategory::Social,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Music => "Music",
            EventCategory::Food => "Food",
            EventCategory::Comedy => "Comedy",
            EventCategory::Fitness => "Fitness",
            EventCategory::Art => "Art",
            EventCategory::Tech => "Tech",
            EventCategory::Social => "Social",
        }
    }

    pub fn parse(value: &str) -> Option<EventCategory> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }
}

/// Event moderation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Pending,
    Approved,
    Rejected,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Approved => "approved",
            EventStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<EventStatus> {
        match value {
            "pending" => Some(EventStatus::Pending),
            "approved" => Some(EventStatus::Approved),
            "rejected" => Some(EventStatus::Rejected),
            _ => None,
        }
    }
}

/// Filter predicates for catalog listings. `None` disables a predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub city: Option<String>,
    pub category: Option<String>,
}

/// Keyset cursor for catalog pagination, ordered by `(event_date, id)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCursor {
    pub last_date: DateTime<Utc>,
    pub last_id: i64,
}

/// One page of catalog results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPage {
    pub events: Vec<Event>,
    pub has_more: bool,
}

impl EventPage {
    /// Cursor pointing past the last event of this page, if any
    pub fn next_cursor(&self) -> Option<EventCursor> {
        self.events.last().map(|event| EventCursor {
            last_date: event.event_date,
            last_id: event.id,
        })
    }
}
