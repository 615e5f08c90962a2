//! Domain module
//!
//! Core domain types and business rules.

pub mod error;
pub mod models;
pub mod time;

pub use error::DomainError;
pub use models::{Attendee, AttendeePage, Event, NewEvent};
pub use time::{normalize_to_utc, to_display_zone, DEFAULT_NAIVE_ZONE};
