//! Time Normalizer
//!
//! Converts incoming ISO-8601 timestamps to absolute UTC instants for
//! storage, and stored UTC instants to named display zones for output.
//! Pure and deterministic: no ambient clock or locale access.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::error::DomainError;

/// Zone used to interpret naive timestamps (no UTC offset in the text).
///
/// Clients are expected to send offset-qualified timestamps; this fallback
/// exists for wall-clock input from the primary deployment region.
pub const DEFAULT_NAIVE_ZONE: Tz = chrono_tz::Asia::Kolkata;

/// Parse an ISO-8601 timestamp into an absolute UTC instant.
///
/// Text carrying a UTC offset is converted directly. Text without an offset
/// is interpreted as wall-clock time in [`DEFAULT_NAIVE_ZONE`] and then
/// converted to UTC.
pub fn normalize_to_utc(text: &str) -> Result<DateTime<Utc>, DomainError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive: NaiveDateTime = text
        .parse()
        .map_err(|_| DomainError::InvalidTimestamp(text.to_string()))?;

    match DEFAULT_NAIVE_ZONE.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        // Wall-clock times repeated by an offset transition map to the
        // earliest instant.
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(DomainError::InvalidTimestamp(text.to_string())),
    }
}

/// Render a UTC instant in the named zone as an ISO-8601 string with offset.
pub fn to_display_zone(instant: DateTime<Utc>, zone_name: &str) -> Result<String, DomainError> {
    let tz: Tz = zone_name
        .parse()
        .map_err(|_| DomainError::InvalidTimezone(zone_name.to_string()))?;

    Ok(instant.with_timezone(&tz).to_rfc3339())
}

/// Validate that a zone name is a recognized IANA identifier.
pub fn validate_zone(zone_name: &str) -> Result<(), DomainError> {
    zone_name
        .parse::<Tz>()
        .map(|_| ())
        .map_err(|_| DomainError::InvalidTimezone(zone_name.to_string()))
}
