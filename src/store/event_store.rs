//! Event Store
//!
//! Persistence over the `events` relation. Instants are stored and queried
//! in UTC; conversion to and from display zones happens at the API boundary.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{DomainError, Event, NewEvent};
use crate::error::AppError;

/// Store for event rows
#[derive(Debug, Clone)]
pub struct EventStore {
    pool: PgPool,
}

impl EventStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event after validating its invariants
    pub async fn create(&self, new_event: NewEvent) -> Result<Event, AppError> {
        if new_event.name.trim().is_empty() {
            return Err(DomainError::invalid_event("name must not be empty").into());
        }
        if new_event.location.trim().is_empty() {
            return Err(DomainError::invalid_event("location must not be empty").into());
        }
        if new_event.max_capacity <= 0 {
            return Err(DomainError::invalid_event("max_capacity must be positive").into());
        }
        if new_event.end_time <= new_event.start_time {
            return Err(DomainError::invalid_event("end_time must be after start_time").into());
        }

        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, location, start_time, end_time, max_capacity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, location, start_time, end_time, max_capacity
            "#,
        )
        .bind(&new_event.name)
        .bind(&new_event.location)
        .bind(new_event.start_time)
        .bind(new_event.end_time)
        .bind(new_event.max_capacity)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(event_id = event.id, name = %event.name, "Event created");

        Ok(event)
    }

    /// Get an event by id
    pub async fn get(&self, event_id: i64) -> Result<Event, AppError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, location, start_time, end_time, max_capacity
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        event.ok_or_else(|| DomainError::EventNotFound(event_id).into())
    }

    /// List upcoming events: `end_time` strictly after `now_utc`, ordered by
    /// `start_time` ascending with id as tie-break.
    ///
    /// `now_utc` is an explicit parameter so callers (and tests) control the
    /// reference instant.
    pub async fn list_upcoming(
        &self,
        now_utc: DateTime<Utc>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Event>, AppError> {
        if skip < 0 {
            return Err(DomainError::invalid_pagination("skip must be non-negative").into());
        }
        if limit <= 0 {
            return Err(DomainError::invalid_pagination("limit must be positive").into());
        }

        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, location, start_time, end_time, max_capacity
            FROM events
            WHERE end_time > $1
            ORDER BY start_time ASC, id ASC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(now_utc)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
