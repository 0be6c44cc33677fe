//! Test data helpers for creating test objects

use chrono::{Duration, Utc};
use uuid::Uuid;

use CornerClub::config::Settings;
use CornerClub::middleware::auth::AuthContext;
use CornerClub::models::event::CreateEventRequest;
use CornerClub::models::user::UpsertProfileRequest;

/// Settings suitable for tests: real validation passes, no external
/// credentials required beyond placeholders.
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.auth.jwt_secret = "test-jwt-secret".to_string();
    settings.payment.key_id = "rzp_test_key".to_string();
    settings.payment.key_secret = "rzp_test_secret".to_string();
    settings
}

/// An authenticated non-admin caller
pub fn auth_context(user_id: &str) -> AuthContext {
    AuthContext {
        user_id: user_id.to_string(),
        name: Some(format!("User {}", user_id)),
        email: Some(format!("{}@example.com", user_id)),
        avatar: None,
        is_admin: false,
    }
}

/// A unique user id for isolating test runs against a shared database
pub fn unique_user_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// A complete profile upsert request (name, email and phone all present)
pub fn complete_profile_request() -> UpsertProfileRequest {
    UpsertProfileRequest {
        name: Some("Test User".to_string()),
        email: Some("test.user@example.com".to_string()),
        phone: Some("+911234567890".to_string()),
        bio: None,
        city: Some("Lucknow".to_string()),
        avatar: None,
        portfolio: None,
    }
}

/// A valid event creation request
pub fn create_event_request(city: &str, price: i64, capacity: i32) -> CreateEventRequest {
    CreateEventRequest {
        title: "Test Event".to_string(),
        description: Some("An event created by the test suite".to_string()),
        event_date: Utc::now() + Duration::days(7),
        venue: "Test Venue".to_string(),
        address: Some("1 Test Street".to_string()),
        city: city.to_string(),
        category: "Music".to_string(),
        price,
        capacity,
        image: None,
        social_instagram: Some("https://instagram.com/test".to_string()),
        social_facebook: None,
        social_youtube: None,
        gallery: vec![],
    }
}
