//! Database helpers for integration tests
//!
//! Database-backed tests run only when a reachable `TEST_DATABASE_URL` (or
//! `DATABASE_URL`) is configured; otherwise they skip silently so the suite
//! stays green in environments without PostgreSQL.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use CornerClub::models::event::Event;

/// Connect to the test database and apply migrations, or `None` when no
/// database is reachable.
pub async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()?;

    let pool = PgPool::connect(&url).await.ok()?;

    if sqlx::migrate!("./migrations").run(&pool).await.is_err() {
        return None;
    }

    Some(pool)
}

/// Insert an approved event directly, bypassing moderation
pub async fn seed_approved_event(
    pool: &PgPool,
    city: &str,
    price: i64,
    capacity: i32,
) -> Event {
    sqlx::query_as::<_, Event>(
        r#"
        INSERT INTO events (title, description, event_date, venue, address, city, category,
            price, currency, capacity, attendees, image, creator_id, creator_name,
            creator_avatar, status, gallery, approved_at, created_at, updated_at)
        VALUES ('Seeded Event', NULL, $1, 'Seed Venue', NULL, $2, 'Music', $3, 'INR', $4, 0,
            NULL, 'seed-host', 'Seed Host', NULL, 'approved', '[]'::jsonb, $5, $5, $5)
        RETURNING id, title, description, event_date, venue, address, city, category, price,
            currency, capacity, attendees, image, creator_id, creator_name, creator_avatar,
            status, social_instagram, social_facebook, social_youtube, gallery, approved_at,
            rejected_at, created_at, updated_at
        "#,
    )
    .bind(Utc::now() + Duration::days(7))
    .bind(city)
    .bind(price)
    .bind(capacity)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .expect("failed to seed event")
}

/// Insert a complete profile for a user id
pub async fn seed_complete_profile(pool: &PgPool, user_id: &str) {
    sqlx::query(
        r#"
        INSERT INTO user_profiles (id, name, email, phone, created_at, updated_at)
        VALUES ($1, 'Seeded User', 'seeded@example.com', '+911234567890', now(), now())
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await
    .expect("failed to seed profile");
}
