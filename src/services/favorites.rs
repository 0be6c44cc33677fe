//! Favorites service implementation

use tracing::debug;

use crate::database::{EventRepository, FavoriteRepository};
use crate::middleware::auth::AuthContext;
use crate::models::event::Event;
use crate::models::favorite::ToggleResult;
use crate::utils::errors::{CornerClubError, Result};

#[derive(Clone)]
pub struct FavoritesService {
    favorites: FavoriteRepository,
    events: EventRepository,
}

impl FavoritesService {
    pub fn new(favorites: FavoriteRepository, events: EventRepository) -> Self {
        Self { favorites, events }
    }

    /// Flip favorite membership for the calling user and an event
    pub async fn toggle(&self, ctx: &AuthContext, event_id: i64) -> Result<ToggleResult> {
        if self.events.find_by_id(event_id).await?.is_none() {
            return Err(CornerClubError::EventNotFound { event_id });
        }

        let result = self.favorites.toggle(&ctx.user_id, event_id).await?;

        debug!(
            user_id = %ctx.user_id,
            event_id = event_id,
            added = result.added,
            "Favorite toggled"
        );

        Ok(result)
    }

    /// Check whether a (user, event) pair is favorited
    pub async fn is_favorited(&self, user_id: &str, event_id: i64) -> Result<bool> {
        self.favorites.is_favorited(user_id, event_id).await
    }

    /// Events the user has favorited
    pub async fn list(&self, user_id: &str) -> Result<Vec<Event>> {
        self.favorites.list_events_for_user(user_id).await
    }
}
