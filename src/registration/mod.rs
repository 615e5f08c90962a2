//! Registration Engine
//!
//! Sole writer of the `attendees` relation. Enforces the capacity and
//! email-uniqueness invariants inside a single transaction per attempt.
//!
//! Concurrency control: the event row is locked with `SELECT ... FOR UPDATE`,
//! serializing registration attempts per event, with the composite unique
//! constraint on (email, event_id) as the last line of defense. Lock waits
//! are bounded by `lock_timeout`; transient conflicts are retried with
//! backoff before surfacing as `Contention`.

mod engine;

pub use engine::RegistrationEngine;
