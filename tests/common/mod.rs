//! Common test utilities

use chrono::{DateTime, Duration, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use event_mgmt::store::EventStore;
use event_mgmt::{Event, NewEvent};

/// Connect to the test database and make sure the schema exists.
///
/// Tests scope their assertions to events they create themselves, so no
/// global truncation is needed and suites can run in parallel.
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id              BIGSERIAL PRIMARY KEY,
            name            TEXT NOT NULL,
            location        TEXT NOT NULL,
            start_time      TIMESTAMPTZ NOT NULL,
            end_time        TIMESTAMPTZ NOT NULL,
            max_capacity    INTEGER NOT NULL CHECK (max_capacity > 0),
            CHECK (end_time > start_time)
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS attendees (
            id              BIGSERIAL PRIMARY KEY,
            name            TEXT NOT NULL,
            email           TEXT NOT NULL,
            event_id        BIGINT NOT NULL REFERENCES events (id),
            CONSTRAINT uq_attendees_email_event UNIQUE (email, event_id)
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_attendees_event_id ON attendees (event_id)",
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("Failed to ensure schema");
    }

    pool
}

/// Create an event starting `start_in` from now with the given capacity
#[allow(dead_code)]
pub async fn create_future_event(
    pool: &PgPool,
    name: &str,
    start_in: Duration,
    max_capacity: i32,
) -> Event {
    let start_time = Utc::now() + start_in;
    create_event_at(pool, name, start_time, start_time + Duration::hours(2), max_capacity).await
}

/// Create an event with explicit UTC bounds
#[allow(dead_code)]
pub async fn create_event_at(
    pool: &PgPool,
    name: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    max_capacity: i32,
) -> Event {
    EventStore::new(pool.clone())
        .create(NewEvent {
            name: name.to_string(),
            location: "Test Hall".to_string(),
            start_time,
            end_time,
            max_capacity,
        })
        .await
        .expect("Failed to create test event")
}
