//! Attendee Store
//!
//! Read-side persistence over the `attendees` relation. Writes go through
//! the registration engine only.

use sqlx::PgPool;

use crate::domain::{Attendee, AttendeePage, DomainError};
use crate::error::AppError;

/// Maximum page size for attendee listings
pub const MAX_PAGE_SIZE: i64 = 100;

/// Store for attendee rows
#[derive(Debug, Clone)]
pub struct AttendeeStore {
    pool: PgPool,
}

impl AttendeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Count registrations for an event
    pub async fn count_by_event(&self, event_id: i64) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM attendees WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// List registrations for an event, paginated and ordered by id
    pub async fn list_by_event(
        &self,
        event_id: i64,
        page: i64,
        size: i64,
    ) -> Result<AttendeePage, AppError> {
        if page < 1 {
            return Err(DomainError::invalid_pagination("page must be >= 1").into());
        }
        if size < 1 || size > MAX_PAGE_SIZE {
            return Err(DomainError::invalid_pagination(format!(
                "size must be between 1 and {}",
                MAX_PAGE_SIZE
            ))
            .into());
        }

        // Event must exist; an empty page for a missing event would be
        // indistinguishable from a real empty page.
        let event_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM events WHERE id = $1)")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;

        if !event_exists {
            return Err(DomainError::EventNotFound(event_id).into());
        }

        let total = self.count_by_event(event_id).await?;

        let offset = (page - 1) * size;
        let items = sqlx::query_as::<_, Attendee>(
            r#"
            SELECT id, name, email, event_id
            FROM attendees
            WHERE event_id = $1
            ORDER BY id ASC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(event_id)
        .bind(offset)
        .bind(size)
        .fetch_all(&self.pool)
        .await?;

        let pages = (total + size - 1) / size;

        Ok(AttendeePage {
            total,
            page,
            size,
            pages,
            items,
        })
    }
}
