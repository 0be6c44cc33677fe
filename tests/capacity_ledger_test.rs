//! Capacity ledger concurrency tests
//!
//! The no-oversell invariant: for any set of concurrent reservations on one
//! event, the sum of admitted quantities never exceeds capacity.

mod helpers;

use assert_matches::assert_matches;
use helpers::database_helper::{seed_approved_event, test_pool};
use helpers::test_data::unique_user_id;

use CornerClub::database::repositories::BookingRepository;
use CornerClub::utils::errors::CornerClubError;

#[tokio::test]
async fn two_simultaneous_reservations_for_the_last_seat() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: no test database configured");
        return;
    };

    let repo = BookingRepository::new(pool.clone());
    let event = seed_approved_event(&pool, "RaceCity", 0, 1).await;

    let first = {
        let repo = repo.clone();
        let user = unique_user_id("racer-a");
        tokio::spawn(async move { repo.create_admitted(event.id, &user, 1, 0, None).await })
    };
    let second = {
        let repo = repo.clone();
        let user = unique_user_id("racer-b");
        tokio::spawn(async move { repo.create_admitted(event.id, &user, 1, 0, None).await })
    };

    let results = [first.await.unwrap(), second.await.unwrap()];

    let admitted = results.iter().filter(|r| r.is_ok()).count();
    let sold_out = results
        .iter()
        .filter(|r| matches!(r, Err(CornerClubError::SoldOut { .. })))
        .count();

    assert_eq!(admitted, 1, "exactly one reservation must be admitted");
    assert_eq!(sold_out, 1, "the loser must see SoldOut, not an error");

    let attendees: (i32,) = sqlx::query_as("SELECT attendees FROM events WHERE id = $1")
        .bind(event.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(attendees.0, 1);
}

#[tokio::test]
async fn concurrent_reservations_never_oversell() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: no test database configured");
        return;
    };

    let repo = BookingRepository::new(pool.clone());
    let event = seed_approved_event(&pool, "RaceCity", 0, 7).await;

    // 12 concurrent attempts of 2 seats each against capacity 7: at most
    // three can be admitted
    let mut handles = Vec::new();
    for i in 0..12 {
        let repo = repo.clone();
        let user = unique_user_id(&format!("swarm-{}", i));
        handles.push(tokio::spawn(async move {
            repo.create_admitted(event.id, &user, 2, 0, None).await
        }));
    }

    let mut admitted_quantity = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(booking) => admitted_quantity += booking.quantity,
            Err(CornerClubError::SoldOut { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert!(admitted_quantity <= 7, "admitted {} of capacity 7", admitted_quantity);
    // 2-seat reservations cannot fill an odd capacity completely
    assert_eq!(admitted_quantity, 6);

    let attendees: (i32,) = sqlx::query_as("SELECT attendees FROM events WHERE id = $1")
        .bind(event.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(attendees.0, admitted_quantity);
}

#[tokio::test]
async fn partial_admission_never_happens() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: no test database configured");
        return;
    };

    let repo = BookingRepository::new(pool.clone());
    let event = seed_approved_event(&pool, "RaceCity", 0, 3).await;

    // Quantity larger than what is left: rejected whole, not clamped
    let err = repo
        .create_admitted(event.id, &unique_user_id("greedy"), 4, 0, None)
        .await
        .unwrap_err();
    assert_matches!(err, CornerClubError::SoldOut { .. });

    let attendees: (i32,) = sqlx::query_as("SELECT attendees FROM events WHERE id = $1")
        .bind(event.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(attendees.0, 0);
}

#[tokio::test]
async fn unknown_event_is_not_found_rather_than_sold_out() {
    let Some(pool) = test_pool().await else {
        eprintln!("skipping: no test database configured");
        return;
    };

    let repo = BookingRepository::new(pool);
    let err = repo
        .create_admitted(i64::MAX, &unique_user_id("lost"), 1, 0, None)
        .await
        .unwrap_err();

    assert_matches!(err, CornerClubError::EventNotFound { .. });
}
