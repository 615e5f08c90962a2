//! API module
//!
//! HTTP routing and request/response schemas.

pub mod routes;

pub use routes::create_router;
