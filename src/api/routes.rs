//! API Routes
//!
//! HTTP endpoint definitions.

use std::sync::OnceLock;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::domain::{time, Attendee, AttendeePage, DomainError, Event, NewEvent};
use crate::error::AppError;
use crate::registration::RegistrationEngine;
use crate::store::{AttendeeStore, EventStore};

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub location: String,
    /// ISO-8601, offset optional (naive input is read as IST wall-clock)
    pub start_time: String,
    pub end_time: String,
    pub max_capacity: i32,
}

/// Event with instants rendered in a display zone
#[derive(Debug, Serialize, Deserialize)]
pub struct EventResponse {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub start_time: String,
    pub end_time: String,
    pub max_capacity: i32,
}

impl EventResponse {
    fn render(event: Event, zone_name: &str) -> Result<Self, AppError> {
        Ok(Self {
            id: event.id,
            name: event.name,
            location: event.location,
            start_time: time::to_display_zone(event.start_time, zone_name)?,
            end_time: time::to_display_zone(event.end_time, zone_name)?,
            max_capacity: event.max_capacity,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterAttendeeRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ListAttendeesQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<PgPool> {
    Router::new()
        .route("/events", post(create_event))
        .route("/events", get(list_events))
        .route("/events/:event_id/register", post(register_attendee))
        .route("/events/:event_id/attendees", get(list_attendees))
}

// =========================================================================
// POST /events
// =========================================================================

/// Create a new event. Times are normalized to UTC before storage and the
/// response renders them in UTC.
async fn create_event(
    State(pool): State<PgPool>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), AppError> {
    let start_time = time::normalize_to_utc(&request.start_time)?;
    let end_time = time::normalize_to_utc(&request.end_time)?;

    let store = EventStore::new(pool);
    let event = store
        .create(NewEvent {
            name: request.name,
            location: request.location,
            start_time,
            end_time,
            max_capacity: request.max_capacity,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(EventResponse::render(event, "UTC")?)))
}

// =========================================================================
// GET /events
// =========================================================================

/// List upcoming events, with times rendered in the zone named by the
/// `X-Timezone` header (default UTC).
async fn list_events(
    State(pool): State<PgPool>,
    Query(query): Query<ListEventsQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<EventResponse>>, AppError> {
    let zone_name = match headers.get("X-Timezone") {
        Some(value) => value.to_str().map_err(|_| {
            DomainError::InvalidTimezone(
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })?,
        None => "UTC",
    };

    // Reject an unknown zone before querying, so an empty result set still
    // surfaces the error.
    time::validate_zone(zone_name)?;

    let store = EventStore::new(pool);
    let events = store
        .list_upcoming(Utc::now(), query.skip, query.limit)
        .await?;

    let rendered = events
        .into_iter()
        .map(|event| EventResponse::render(event, zone_name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(rendered))
}

// =========================================================================
// POST /events/:event_id/register
// =========================================================================

/// Register an attendee for an event
async fn register_attendee(
    State(pool): State<PgPool>,
    Path(event_id): Path<i64>,
    Json(request): Json<RegisterAttendeeRequest>,
) -> Result<(StatusCode, Json<Attendee>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::InvalidRequest("name must not be empty".to_string()));
    }
    if !is_valid_email(&request.email) {
        return Err(AppError::InvalidRequest(format!(
            "invalid email address: {}",
            request.email
        )));
    }

    let engine = RegistrationEngine::new(pool);
    let attendee = engine
        .register(event_id, &request.name, &request.email)
        .await?;

    Ok((StatusCode::CREATED, Json(attendee)))
}

// =========================================================================
// GET /events/:event_id/attendees
// =========================================================================

/// List registered attendees for an event, paginated
async fn list_attendees(
    State(pool): State<PgPool>,
    Path(event_id): Path<i64>,
    Query(query): Query<ListAttendeesQuery>,
) -> Result<Json<AttendeePage>, AppError> {
    let store = AttendeeStore::new(pool);
    let page = store.list_by_event(event_id, query.page, query.size).await?;

    Ok(Json(page))
}

/// Syntactic email check at the boundary
fn is_valid_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    });
    re.is_match(email)
}
