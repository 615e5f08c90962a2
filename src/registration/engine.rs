//! Registration engine implementation

use std::time::Duration;

use sqlx::PgPool;

use crate::domain::{Attendee, DomainError};
use crate::error::AppError;

/// Default bound on lock waits inside a registration transaction
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 2000;

const MAX_RETRIES: u32 = 3;

/// Engine for attendee registration
#[derive(Debug, Clone)]
pub struct RegistrationEngine {
    pool: PgPool,
    lock_timeout_ms: u64,
}

impl RegistrationEngine {
    pub fn new(pool: PgPool) -> Self {
        Self::with_lock_timeout(pool, DEFAULT_LOCK_TIMEOUT_MS)
    }

    pub fn with_lock_timeout(pool: PgPool, lock_timeout_ms: u64) -> Self {
        Self {
            pool,
            lock_timeout_ms,
        }
    }

    /// Register an attendee for an event, with retry on transient conflicts
    pub async fn register(
        &self,
        event_id: i64,
        name: &str,
        email: &str,
    ) -> Result<Attendee, AppError> {
        for attempt in 0..MAX_RETRIES {
            match self.try_register(event_id, name, email).await {
                Err(AppError::Database(e)) if is_transient(&e) => {
                    if attempt < MAX_RETRIES - 1 {
                        // Linear backoff before retry
                        let delay = Duration::from_millis(50 * (attempt as u64 + 1));
                        tokio::time::sleep(delay).await;
                        tracing::warn!(
                            event_id,
                            "Registration conflict, retrying (attempt {}/{})",
                            attempt + 1,
                            MAX_RETRIES
                        );
                        continue;
                    }
                    return Err(DomainError::Contention { event_id }.into());
                }
                other => return other,
            }
        }

        Err(DomainError::Contention { event_id }.into())
    }

    /// Single registration attempt: duplicate check, capacity check and
    /// insert inside one transaction holding the event row lock.
    async fn try_register(
        &self,
        event_id: i64,
        name: &str,
        email: &str,
    ) -> Result<Attendee, AppError> {
        let mut tx = self.pool.begin().await?;

        // SET LOCAL cannot take bind parameters.
        sqlx::query(&format!(
            "SET LOCAL lock_timeout = '{}ms'",
            self.lock_timeout_ms
        ))
        .execute(&mut *tx)
        .await?;

        // The row lock is the single-writer-per-event coordination point:
        // every check below runs while no other registration for this event
        // can proceed.
        let max_capacity: Option<i32> =
            sqlx::query_scalar("SELECT max_capacity FROM events WHERE id = $1 FOR UPDATE")
                .bind(event_id)
                .fetch_optional(&mut *tx)
                .await?;

        let max_capacity = max_capacity.ok_or(DomainError::EventNotFound(event_id))?;

        // Duplicate check runs before the capacity check, so a repeated email
        // on a full event is reported as a duplicate, not as full.
        let duplicate: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM attendees WHERE event_id = $1 AND email = $2)",
        )
        .bind(event_id)
        .bind(email)
        .fetch_one(&mut *tx)
        .await?;

        if duplicate {
            return Err(DomainError::DuplicateRegistration {
                event_id,
                email: email.to_string(),
            }
            .into());
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendees WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&mut *tx)
            .await?;

        if count >= i64::from(max_capacity) {
            return Err(DomainError::CapacityExceeded {
                event_id,
                max_capacity,
            }
            .into());
        }

        let attendee = sqlx::query_as::<_, Attendee>(
            r#"
            INSERT INTO attendees (name, email, event_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, event_id
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::from(DomainError::DuplicateRegistration {
                    event_id,
                    email: email.to_string(),
                })
            } else {
                AppError::Database(e)
            }
        })?;

        tx.commit().await?;

        tracing::info!(
            event_id,
            attendee_id = attendee.id,
            "Attendee registered"
        );

        Ok(attendee)
    }
}

/// Unique constraint violation (SQLSTATE 23505)
fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// Transient conflicts worth an internal retry: serialization failure,
/// deadlock, lock timeout.
fn is_transient(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db)
            if matches!(db.code().as_deref(), Some("40001") | Some("40P01") | Some("55P03"))
    )
}
