//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{
    BookingRepository, ChatRepository, DatabasePool, EventRepository, FavoriteRepository,
    UserRepository,
};
use crate::models::*;
use crate::utils::errors::CornerClubError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub events: EventRepository,
    pub bookings: BookingRepository,
    pub users: UserRepository,
    pub favorites: FavoriteRepository,
    pub chat: ChatRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            favorites: FavoriteRepository::new(pool.clone()),
            chat: ChatRepository::new(pool),
        }
    }

    /// Fetch an event or fail with a typed not-found error
    pub async fn require_event(&self, event_id: i64) -> Result<Event, CornerClubError> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or(CornerClubError::EventNotFound { event_id })
    }

    /// Get system statistics
    pub async fn get_system_stats(&self) -> Result<serde_json::Value, CornerClubError> {
        let events = self.events.count().await?;
        let bookings = self.bookings.count().await?;
        let profiles = self.users.count().await?;

        Ok(serde_json::json!({
            "events": events,
            "bookings": bookings,
            "profiles": profiles,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_service_creation() {
        // This would require a test database setup
        // For now, just test that the service can be created
        let pool = sqlx::PgPool::connect("postgresql://test").await;
        if let Ok(pool) = pool {
            let service = DatabaseService::new(pool);
            assert!(std::ptr::addr_of!(service.events) as *const _ != std::ptr::null());
            assert!(std::ptr::addr_of!(service.bookings) as *const _ != std::ptr::null());
        }
    }
}
