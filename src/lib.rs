//! event_mgmt Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod domain;
pub mod registration;
pub mod store;

pub mod config;
pub mod db;
mod error;

pub use config::Config;
pub use domain::{Attendee, AttendeePage, DomainError, Event, NewEvent};
pub use error::{AppError, AppResult};
