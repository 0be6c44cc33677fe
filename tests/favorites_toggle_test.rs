//! Favorites toggle tests

mod helpers;

use helpers::database_helper::{seed_approved_event, test_pool};
use helpers::test_data::unique_user_id;

use CornerClub::database::repositories::FavoriteRepository;

#[tokio::test]
async fn toggle_parity_matches_call_count() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: no test database configured");
        return;
    };

    let repo = FavoriteRepository::new(pool.clone());
    let event = seed_approved_event(&pool, "FavCity", 0, 10).await;
    let user_id = unique_user_id("toggler");

    // No prior record: first toggle adds
    let first = repo.toggle(&user_id, event.id).await.unwrap();
    assert!(first.added);
    assert!(repo.is_favorited(&user_id, event.id).await.unwrap());

    // Immediate second toggle removes
    let second = repo.toggle(&user_id, event.id).await.unwrap();
    assert!(!second.added);
    assert!(!repo.is_favorited(&user_id, event.id).await.unwrap());

    // Parity over a longer sequence: odd number of toggles ends favorited
    for _ in 0..5 {
        repo.toggle(&user_id, event.id).await.unwrap();
    }
    assert!(repo.is_favorited(&user_id, event.id).await.unwrap());
}

#[tokio::test]
async fn favorites_listing_follows_membership() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: no test database configured");
        return;
    };

    let repo = FavoriteRepository::new(pool.clone());
    let event_a = seed_approved_event(&pool, "FavCity", 0, 10).await;
    let event_b = seed_approved_event(&pool, "FavCity", 0, 10).await;
    let user_id = unique_user_id("collector");

    repo.toggle(&user_id, event_a.id).await.unwrap();
    repo.toggle(&user_id, event_b.id).await.unwrap();

    let favorites = repo.list_events_for_user(&user_id).await.unwrap();
    let ids: Vec<i64> = favorites.iter().map(|e| e.id).collect();
    assert!(ids.contains(&event_a.id));
    assert!(ids.contains(&event_b.id));

    repo.toggle(&user_id, event_a.id).await.unwrap();

    let favorites = repo.list_events_for_user(&user_id).await.unwrap();
    let ids: Vec<i64> = favorites.iter().map(|e| e.id).collect();
    assert!(!ids.contains(&event_a.id));
    assert!(ids.contains(&event_b.id));
}
