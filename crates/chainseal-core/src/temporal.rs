//! # Temporal Types — UTC-Only Timestamps
//!
//! Defines `Timestamp`, a UTC-only timestamp truncated to whole seconds.
//!
//! ## Security Invariant
//!
//! Timestamps appear inside signed attribute blocks, so they must
//! canonicalize deterministically. A local timezone offset or sub-second
//! component would produce different canonical bytes for the same instant
//! and break signature verification across implementations. Non-UTC inputs
//! are rejected at construction; there is no silent conversion.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TemporalError;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`] — from an ISO 8601 string, rejecting non-UTC offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 / ISO 8601 string.
    ///
    /// **Rejects non-UTC inputs.** Only the `Z` suffix is accepted — even
    /// `+00:00`, which is semantically equivalent, is rejected so that the
    /// canonical text of a timestamp is unique.
    pub fn parse(s: &str) -> Result<Self, TemporalError> {
        if !s.ends_with('Z') {
            return Err(TemporalError::NonUtc(s.to_string()));
        }
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| TemporalError::InvalidFormat {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Create a timestamp from a Unix epoch value (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, TemporalError> {
        let dt = DateTime::from_timestamp(secs, 0).ok_or(TemporalError::OutOfRange(secs))?;
        Ok(Self(dt))
    }

    /// Add a number of seconds, returning `None` if the result is outside
    /// the representable range.
    pub fn checked_add_secs(&self, secs: u64) -> Option<Self> {
        let delta = i64::try_from(secs).ok()?;
        let dt = self.0.checked_add_signed(chrono::Duration::seconds(delta))?;
        Some(Self(dt))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch value in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Render as ISO 8601 with Z suffix (e.g. `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
