//! Registration Engine Integration Tests
//!
//! Verifies the capacity and uniqueness invariants hold under sequential and
//! concurrent execution against a real Postgres database.

use chrono::Duration;

use event_mgmt::registration::RegistrationEngine;
use event_mgmt::store::AttendeeStore;
use event_mgmt::{AppError, DomainError};

mod common;

#[tokio::test]
async fn test_sequential_duplicate_rejected() {
    let pool = common::setup_test_db().await;
    let event = common::create_future_event(&pool, "Duplicates", Duration::days(1), 10).await;
    let engine = RegistrationEngine::new(pool.clone());

    let attendee = engine
        .register(event.id, "Asha", "asha@example.com")
        .await
        .expect("first registration succeeds");
    assert_eq!(attendee.event_id, event.id);

    let err = engine
        .register(event.id, "Asha", "asha@example.com")
        .await
        .expect_err("second registration must fail");
    assert!(matches!(
        err,
        AppError::Domain(DomainError::DuplicateRegistration { .. })
    ));

    // Exactly one row stored
    let count = AttendeeStore::new(pool)
        .count_by_event(event.id)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_capacity_never_oversubscribed_under_concurrency() {
    let pool = common::setup_test_db().await;
    let capacity = 5;
    let attempts = 9;
    let event =
        common::create_future_event(&pool, "Last Seats", Duration::days(1), capacity).await;

    let mut handles = Vec::new();
    for i in 0..attempts {
        let engine = RegistrationEngine::new(pool.clone());
        let event_id = event.id;
        handles.push(tokio::spawn(async move {
            engine
                .register(event_id, &format!("Guest {i}"), &format!("guest{i}@example.com"))
                .await
        }));
    }

    let mut committed = 0;
    let mut rejected_full = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => committed += 1,
            Err(AppError::Domain(DomainError::CapacityExceeded { .. })) => rejected_full += 1,
            Err(other) => panic!("unexpected failure: {other}"),
        }
    }

    assert_eq!(committed, capacity as i64);
    assert_eq!(rejected_full, attempts as i64 - capacity as i64);

    let count = AttendeeStore::new(pool)
        .count_by_event(event.id)
        .await
        .unwrap();
    assert_eq!(count, capacity as i64, "stored rows must never exceed capacity");
}

#[tokio::test]
async fn test_duplicate_email_races_commit_exactly_once() {
    let pool = common::setup_test_db().await;
    let event = common::create_future_event(&pool, "Same Email", Duration::days(1), 10).await;

    let mut handles = Vec::new();
    for _ in 0..6 {
        let engine = RegistrationEngine::new(pool.clone());
        let event_id = event.id;
        handles.push(tokio::spawn(async move {
            engine.register(event_id, "Racer", "racer@example.com").await
        }));
    }

    let mut committed = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => committed += 1,
            Err(AppError::Domain(DomainError::DuplicateRegistration { .. })) => duplicates += 1,
            Err(other) => panic!("unexpected failure: {other}"),
        }
    }

    assert_eq!(committed, 1, "exactly one racing attempt may win");
    assert_eq!(duplicates, 5);

    let count = AttendeeStore::new(pool)
        .count_by_event(event.id)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_rejected_attempt_leaves_store_unchanged() {
    let pool = common::setup_test_db().await;
    let event = common::create_future_event(&pool, "Tiny", Duration::days(1), 1).await;
    let engine = RegistrationEngine::new(pool.clone());

    engine
        .register(event.id, "Only One", "only@example.com")
        .await
        .unwrap();

    let err = engine
        .register(event.id, "Too Late", "late@example.com")
        .await
        .expect_err("capacity must reject");
    assert!(matches!(
        err,
        AppError::Domain(DomainError::CapacityExceeded { .. })
    ));

    let store = AttendeeStore::new(pool);
    let page = store.list_by_event(event.id, 1, 10).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].email, "only@example.com");
}

#[tokio::test]
async fn test_held_row_lock_surfaces_contention() {
    let pool = common::setup_test_db().await;
    let event = common::create_future_event(&pool, "Contended", Duration::days(1), 5).await;

    // Hold the event row lock in a separate transaction so every attempt
    // inside the engine hits its lock_timeout.
    let mut holder = pool.begin().await.unwrap();
    let _: i32 = sqlx::query_scalar("SELECT max_capacity FROM events WHERE id = $1 FOR UPDATE")
        .bind(event.id)
        .fetch_one(&mut *holder)
        .await
        .unwrap();

    let engine = RegistrationEngine::with_lock_timeout(pool.clone(), 100);
    let err = engine
        .register(event.id, "Blocked", "blocked@example.com")
        .await
        .expect_err("registration must not wait out a held lock");
    assert!(matches!(
        err,
        AppError::Domain(DomainError::Contention { .. })
    ));

    // Nothing was written while the lock was held
    let count = AttendeeStore::new(pool.clone())
        .count_by_event(event.id)
        .await
        .unwrap();
    assert_eq!(count, 0);

    // Releasing the lock lets the same registration go through
    holder.rollback().await.unwrap();
    let attendee = engine
        .register(event.id, "Blocked", "blocked@example.com")
        .await
        .expect("registration succeeds once the lock is released");
    assert_eq!(attendee.event_id, event.id);
}

#[tokio::test]
async fn test_register_unknown_event() {
    let pool = common::setup_test_db().await;
    let engine = RegistrationEngine::with_lock_timeout(pool, 500);

    let err = engine
        .register(999_999_999, "Nobody", "nobody@example.com")
        .await
        .expect_err("must fail");
    assert!(matches!(
        err,
        AppError::Domain(DomainError::EventNotFound(_))
    ));
}
