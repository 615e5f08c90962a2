//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Domain-specific errors
///
/// These errors represent business rule violations and domain invariant
/// failures. They are independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Timestamp text could not be parsed as a date/time
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Timezone name is not a recognized IANA zone identifier
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Event creation payload violates an invariant
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// Event not found
    #[error("Event not found: {0}")]
    EventNotFound(i64),

    /// Event is at full capacity
    #[error("Event {event_id} is at full capacity ({max_capacity})")]
    CapacityExceeded { event_id: i64, max_capacity: i32 },

    /// An attendee with this email is already registered for the event
    #[error("Attendee with email {email} already registered for event {event_id}")]
    DuplicateRegistration { event_id: i64, email: String },

    /// Pagination parameters out of bounds
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    /// Transient lock/serialization conflict; the operation may be retried
    #[error("Registration contention on event {event_id}, retry later")]
    Contention { event_id: i64 },
}

impl DomainError {
    /// Create an invalid event error
    pub fn invalid_event(reason: impl Into<String>) -> Self {
        Self::InvalidEvent(reason.into())
    }

    /// Create an invalid pagination error
    pub fn invalid_pagination(reason: impl Into<String>) -> Self {
        Self::InvalidPagination(reason.into())
    }

    /// Check if this is a client error (user's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTimestamp(_)
                | Self::InvalidTimezone(_)
                | Self::InvalidEvent(_)
                | Self::InvalidPagination(_)
        )
    }

    /// Check if this is a transient error (retry may help)
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Contention { .. })
    }
}
