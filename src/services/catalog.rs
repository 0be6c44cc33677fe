//! Event catalog service implementation
//!
//! Read side of the catalog (filtered, cursor-paginated listings) plus
//! event creation, which always lands in `pending` status for moderation.

use tracing::{debug, info};

use crate::config::settings::Settings;
use crate::database::{EventRepository, UserRepository};
use crate::middleware::auth::AuthContext;
use crate::models::event::{
    CreateEventRequest, Event, EventCategory, EventCursor, EventFilter, EventPage,
};
use crate::services::redis::RedisService;
use crate::utils::errors::{CornerClubError, Result};

/// Upper bound for a single opaque image reference (covers data-URL payloads
/// produced by the client-side compressor)
const MAX_IMAGE_REF_BYTES: usize = 256 * 1024;

/// Maximum number of gallery images per event
const MAX_GALLERY_IMAGES: usize = 10;

#[derive(Clone)]
pub struct CatalogService {
    events: EventRepository,
    users: UserRepository,
    redis: RedisService,
    settings: Settings,
}

impl CatalogService {
    pub fn new(
        events: EventRepository,
        users: UserRepository,
        redis: RedisService,
        settings: Settings,
    ) -> Self {
        Self {
            events,
            users,
            redis,
            settings,
        }
    }

    /// List one page of approved events.
    ///
    /// The unfiltered-or-filtered first page is served from a short-lived
    /// Redis cache; cursor pages always hit the database since their keys are
    /// unbounded.
    pub async fn list(
        &self,
        filter: &EventFilter,
        cursor: Option<EventCursor>,
    ) -> Result<EventPage> {
        let page_size = self.settings.catalog.page_size;

        if cursor.is_none() {
            let cache_key = Self::first_page_cache_key(filter);
            if let Ok(Some(page)) = self.redis.get::<EventPage>(&cache_key).await {
                debug!(cache_key = %cache_key, "Catalog first page served from cache");
                return Ok(page);
            }

            let page = self.events.list_page(filter, None, page_size).await?;

            // Cache failures only cost the next request a database read
            let _ = self
                .redis
                .set(
                    &cache_key,
                    &page,
                    Some(self.settings.catalog.cache_ttl_seconds),
                )
                .await;

            return Ok(page);
        }

        self.events.list_page(filter, cursor, page_size).await
    }

    /// Get a single event. Not-found is a value, not an error.
    pub async fn get(&self, event_id: i64) -> Result<Option<Event>> {
        self.events.find_by_id(event_id).await
    }

    /// Events created by a user, regardless of status
    pub async fn hosted_by(&self, creator_id: &str) -> Result<Vec<Event>> {
        self.events.list_by_creator(creator_id).await
    }

    /// Create an event. Requires a complete host profile; the event starts
    /// in `pending` status and stays out of public listings until approved.
    pub async fn create(&self, ctx: &AuthContext, request: CreateEventRequest) -> Result<Event> {
        let profile = self
            .users
            .find_by_id(&ctx.user_id)
            .await?
            .ok_or_else(|| CornerClubError::UserNotFound {
                user_id: ctx.user_id.clone(),
            })?;

        if let Some(field) = profile.missing_field() {
            return Err(CornerClubError::ProfileIncomplete(format!(
                "{} is required before hosting an event",
                field
            )));
        }

        validate_event_request(&request)?;

        let event = self
            .events
            .create(
                request,
                &self.settings.payment.currency,
                &ctx.user_id,
                &profile.name,
                profile.avatar.as_deref(),
            )
            .await?;

        info!(
            event_id = event.id,
            creator_id = %ctx.user_id,
            "Event created and queued for moderation"
        );

        Ok(event)
    }

    /// Events awaiting moderation
    pub async fn pending(&self) -> Result<Vec<Event>> {
        self.events.list_pending().await
    }

    /// Past moderation decisions: approved and rejected events
    pub async fn history(&self) -> Result<Vec<Event>> {
        self.events.list_history().await
    }

    /// Approve a pending event, making it publicly listable
    pub async fn approve(&self, event_id: i64) -> Result<Event> {
        let event = self.events.approve(event_id).await?;
        self.invalidate_listing_cache().await;
        Ok(event)
    }

    /// Reject an event. Status transition only; the record is retained.
    pub async fn reject(&self, event_id: i64) -> Result<Event> {
        let event = self.events.reject(event_id).await?;
        self.invalidate_listing_cache().await;
        Ok(event)
    }

    /// Invalidate cached first pages after a moderation decision.
    /// Failure only means stale pages until the TTL runs out.
    async fn invalidate_listing_cache(&self) {
        if let Err(e) = self.redis.delete_pattern("catalog:page:*").await {
            debug!(error = %e, "Catalog cache invalidation failed");
        }
    }

    fn first_page_cache_key(filter: &EventFilter) -> String {
        format!(
            "catalog:page:{}:{}",
            filter.city.as_deref().unwrap_or("*"),
            filter.category.as_deref().unwrap_or("*")
        )
    }
}

/// Validate an event creation request
fn validate_event_request(request: &CreateEventRequest) -> Result<()> {
    if request.title.trim().is_empty() {
        return Err(CornerClubError::InvalidInput(
            "Event title is required".to_string(),
        ));
    }

    if request.venue.trim().is_empty() || request.city.trim().is_empty() {
        return Err(CornerClubError::InvalidInput(
            "Event venue and city are required".to_string(),
        ));
    }

    if EventCategory::parse(&request.category).is_none() {
        return Err(CornerClubError::InvalidInput(format!(
            "Unknown event category: {}",
            request.category
        )));
    }

    if request.price < 0 {
        return Err(CornerClubError::InvalidInput(
            "Event price must not be negative".to_string(),
        ));
    }

    if request.capacity < 0 {
        return Err(CornerClubError::InvalidInput(
            "Event capacity must not be negative".to_string(),
        ));
    }

    let social_links: Vec<&str> = [
        &request.social_instagram,
        &request.social_facebook,
        &request.social_youtube,
    ]
    .iter()
    .filter_map(|link| link.as_deref())
    .filter(|l| !l.trim().is_empty())
    .collect();

    if social_links.is_empty() {
        return Err(CornerClubError::InvalidInput(
            "At least one social media link is required".to_string(),
        ));
    }

    for link in social_links {
        if url::Url::parse(link.trim()).is_err() {
            return Err(CornerClubError::InvalidInput(format!(
                "Social link is not a valid URL: {}",
                link
            )));
        }
    }

    if request.gallery.len() > MAX_GALLERY_IMAGES {
        return Err(CornerClubError::InvalidInput(format!(
            "Gallery is limited to {} images",
            MAX_GALLERY_IMAGES
        )));
    }

    for image in request
        .gallery
        .iter()
        .chain(request.image.iter())
    {
        if image.len() > MAX_IMAGE_REF_BYTES {
            return Err(CornerClubError::InvalidInput(
                "Image reference exceeds the maximum allowed size".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn valid_request() -> CreateEventRequest {
        CreateEventRequest {
            title: "Indie Night".to_string(),
            description: Some("Live sets from local bands".to_string()),
            event_date: Utc::now(),
            venue: "The Basement".to_string(),
            address: Some("12 MG Road".to_string()),
            city: "Lucknow".to_string(),
            category: "Music".to_string(),
            price: 49900,
            capacity: 120,
            image: Some("img://cover".to_string()),
            social_instagram: Some("https://instagram.com/indienight".to_string()),
            social_facebook: None,
            social_youtube: None,
            gallery: vec!["img://one".to_string()],
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate_event_request(&valid_request()).is_ok());
    }

    #[test]
    fn test_missing_social_link_rejected() {
        let mut request = valid_request();
        request.social_instagram = None;
        assert!(validate_event_request(&request).is_err());

        // Whitespace-only links do not count
        request.social_instagram = Some("   ".to_string());
        assert!(validate_event_request(&request).is_err());
    }

    #[test]
    fn test_malformed_social_link_rejected() {
        let mut request = valid_request();
        request.social_instagram = Some("not a url".to_string());
        assert!(validate_event_request(&request).is_err());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let mut request = valid_request();
        request.category = "Karaoke".to_string();
        assert!(validate_event_request(&request).is_err());
    }

    #[test]
    fn test_negative_price_and_capacity_rejected() {
        let mut request = valid_request();
        request.price = -1;
        assert!(validate_event_request(&request).is_err());

        let mut request = valid_request();
        request.capacity = -1;
        assert!(validate_event_request(&request).is_err());
    }

    #[test]
    fn test_oversized_image_rejected() {
        let mut request = valid_request();
        request.gallery = vec!["x".repeat(MAX_IMAGE_REF_BYTES + 1)];
        assert!(validate_event_request(&request).is_err());
    }

    #[test]
    fn test_gallery_count_capped() {
        let mut request = valid_request();
        request.gallery = (0..=MAX_GALLERY_IMAGES).map(|i| format!("img://{}", i)).collect();
        assert!(validate_event_request(&request).is_err());
    }
}
