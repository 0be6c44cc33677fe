//! Catalog cursor pagination tests

mod helpers;

use std::collections::HashSet;

use helpers::database_helper::{seed_approved_event, test_pool};

use CornerClub::database::repositories::EventRepository;
use CornerClub::models::event::EventFilter;
use uuid::Uuid;

#[tokio::test]
async fn paging_yields_the_full_ordered_duplicate_free_set() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: no test database configured");
        return;
    };

    let repo = EventRepository::new(pool.clone());

    // A unique city isolates this run from other data in the database
    let city = format!("PageCity-{}", Uuid::new_v4());
    let total = 120;
    for _ in 0..total {
        seed_approved_event(&pool, &city, 0, 10).await;
    }

    let filter = EventFilter {
        city: Some(city.clone()),
        category: None,
    };

    let page_size = 50;
    let mut seen_ids = HashSet::new();
    let mut previous_key: Option<(chrono::DateTime<chrono::Utc>, i64)> = None;
    let mut cursor = None;
    let mut pages = 0;

    loop {
        let page = repo.list_page(&filter, cursor, page_size).await.unwrap();
        pages += 1;

        for event in &page.events {
            // Duplicate-free across pages
            assert!(seen_ids.insert(event.id), "event {} returned twice", event.id);

            // Strictly ascending by (event_date, id)
            let key = (event.event_date, event.id);
            if let Some(previous) = previous_key {
                assert!(key > previous, "ordering key went backwards");
            }
            previous_key = Some(key);
        }

        if !page.has_more {
            assert!(page.events.len() as i64 <= page_size);
            break;
        }

        assert_eq!(page.events.len() as i64, page_size);
        cursor = page.next_cursor();
    }

    assert_eq!(seen_ids.len(), total);
    assert_eq!(pages, 3); // 50 + 50 + 20
}

#[tokio::test]
async fn filters_are_conjunctive_equality_predicates() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: no test database configured");
        return;
    };

    let repo = EventRepository::new(pool.clone());

    let city = format!("FilterCity-{}", Uuid::new_v4());
    seed_approved_event(&pool, &city, 0, 10).await;

    // Matching city and matching category
    let page = repo
        .list_page(
            &EventFilter {
                city: Some(city.clone()),
                category: Some("Music".to_string()),
            },
            None,
            50,
        )
        .await
        .unwrap();
    assert_eq!(page.events.len(), 1);

    // Matching city, non-matching category
    let page = repo
        .list_page(
            &EventFilter {
                city: Some(city.clone()),
                category: Some("Tech".to_string()),
            },
            None,
            50,
        )
        .await
        .unwrap();
    assert!(page.events.is_empty());
}

#[tokio::test]
async fn pending_events_stay_out_of_public_listings() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: no test database configured");
        return;
    };

    let repo = EventRepository::new(pool.clone());
    let city = format!("PendingCity-{}", Uuid::new_v4());

    seed_approved_event(&pool, &city, 0, 10).await;
    sqlx::query(
        r#"
        INSERT INTO events (title, event_date, venue, city, category, price, capacity,
            creator_id, creator_name, status)
        VALUES ('Hidden', now() + interval '1 day', 'V', $1, 'Music', 0, 10, 'h', 'H', 'pending')
        "#,
    )
    .bind(&city)
    .execute(&pool)
    .await
    .unwrap();

    let page = repo
        .list_page(
            &EventFilter {
                city: Some(city),
                category: None,
            },
            None,
            50,
        )
        .await
        .unwrap();

    assert_eq!(page.events.len(), 1);
    assert_eq!(page.events[0].status, "approved");
}
