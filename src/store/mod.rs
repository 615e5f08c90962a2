//! Persistence stores
//!
//! Store abstractions over the `events` and `attendees` relations.

mod attendee_store;
mod event_store;

pub use attendee_store::{AttendeeStore, MAX_PAGE_SIZE};
pub use event_store::EventStore;
