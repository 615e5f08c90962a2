//! Domain models
//!
//! Persisted row types for the two relations the service owns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled event. Instants are always stored in UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_capacity: i32,
}

/// A registration of one email for one event.
///
/// Rows are created only through the registration engine; the pair
/// (`email`, `event_id`) is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Attendee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub event_id: i64,
}

/// Validated input for event creation, with times already normalized to UTC.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_capacity: i32,
}

/// One page of attendees for an event.
#[derive(Debug, Clone, Serialize)]
pub struct AttendeePage {
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub pages: i64,
    pub items: Vec<Attendee>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendee_serializes_flat() {
        let attendee = Attendee {
            id: 1,
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            event_id: 42,
        };

        let json = serde_json::to_value(&attendee).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["event_id"], 42);
        assert_eq!(json["email"], "asha@example.com");
    }
}
