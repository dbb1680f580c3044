//! Timestamp parsing and interval arithmetic.
//!
//! Every instant in meetkit is offset-aware. Input offsets are kept so that
//! hour-of-day and calendar-date questions are answered in the meeting's own
//! offset, while comparisons stay offset-independent.
//!
//! [`parse_instant`] is total: text it cannot understand
//! resolves to the current instant instead of an error. Callers that need to
//! know whether parsing succeeded use [`try_parse_instant`].

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// An offset-aware point in time.
pub type Instant = DateTime<FixedOffset>;

/// ISO shapes carrying an explicit numeric offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// ISO shapes without an offset. Interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Last-resort shapes for hand-typed input.
const PERMISSIVE_OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y/%m/%d %H:%M:%S%.f%z",
    "%Y%m%dT%H%M%S%z",
];

const PERMISSIVE_NAIVE_FORMATS: &[&str] = &[
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
    "%b %d, %Y %H:%M",
    "%d %B %Y %H:%M",
    "%Y%m%dT%H%M%S",
];

const PERMISSIVE_DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%Y%m%d",
];

/// The current instant, expressed at offset zero.
pub fn now() -> Instant {
    Utc::now().fixed_offset()
}

/// Parse a timestamp, falling back to the current instant.
///
/// Empty input and input that no strategy understands both yield "now".
pub fn parse_instant(text: &str) -> Instant {
    parse_instant_or(text, now())
}

/// Parse a timestamp, falling back to `fallback` when nothing matches.
pub fn parse_instant_or(text: &str, fallback: Instant) -> Instant {
    match try_parse_instant(text) {
        Some(instant) => instant,
        None => {
            if !text.trim().is_empty() {
                tracing::debug!(input = text, "unparseable timestamp, falling back to now");
            }
            fallback
        }
    }
}

/// Parse a timestamp without the fallback.
///
/// Attempts, in order: ISO with an explicit offset, ISO with a trailing `Z`
/// rewritten to `+00:00`, naive ISO assumed UTC, then a set of permissive
/// human formats. Naive results are always pinned to UTC.
pub fn try_parse_instant(text: &str) -> Option<Instant> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    parse_with_offset(text)
        .or_else(|| rewrite_zulu(text).and_then(|rewritten| parse_with_offset(&rewritten)))
        .or_else(|| parse_naive(text))
        .or_else(|| parse_permissive(text))
}

fn parse_with_offset(text: &str) -> Option<Instant> {
    DateTime::parse_from_rfc3339(text).ok().or_else(|| {
        OFFSET_FORMATS
            .iter()
            .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
    })
}

fn rewrite_zulu(text: &str) -> Option<String> {
    text.strip_suffix('Z')
        .or_else(|| text.strip_suffix('z'))
        .map(|head| format!("{head}+00:00"))
}

fn parse_naive(text: &str) -> Option<Instant> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(pin_utc)
}

fn parse_permissive(text: &str) -> Option<Instant> {
    if let Ok(instant) = DateTime::parse_from_rfc2822(text) {
        return Some(instant);
    }
    if let Some(instant) = PERMISSIVE_OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
    {
        return Some(instant);
    }
    PERMISSIVE_NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            PERMISSIVE_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(pin_utc)
}

fn pin_utc(naive: NaiveDateTime) -> Instant {
    naive.and_utc().fixed_offset()
}

/// Half-open overlap test: `[start_a, end_a)` against `[start_b, end_b)`.
///
/// Intervals that only touch at an endpoint do not overlap.
pub fn intervals_overlap(start_a: Instant, end_a: Instant, start_b: Instant, end_b: Instant) -> bool {
    start_a < end_b && start_b < end_a
}

/// Signed length of `[start, end)` in fractional minutes.
pub fn minutes_between(start: Instant, end: Instant) -> f64 {
    (end - start).num_milliseconds() as f64 / 60_000.0
}

/// `minutes` as a duration, rejecting counts chrono cannot represent.
pub fn try_minutes(minutes: i64) -> Result<Duration> {
    Duration::try_minutes(minutes)
        .ok_or_else(|| CoreError::TimeOutOfRange(format!("{minutes} minutes is not a valid duration")))
}

/// `start + minutes`, or an error when the result is not representable.
pub fn add_minutes(start: Instant, minutes: i64) -> Result<Instant> {
    start
        .checked_add_signed(try_minutes(minutes)?)
        .ok_or_else(|| CoreError::TimeOutOfRange(format!("{start} plus {minutes} minutes")))
}

/// A transient `[start, end)` pair used for overlap checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: Instant,
    pub end: Instant,
}

impl TimeInterval {
    pub fn new(start: Instant, end: Instant) -> Self {
        Self { start, end }
    }

    /// Interval of `minutes` length starting at `start`. Negative lengths are kept.
    ///
    /// Fails instead of panicking when the end falls outside chrono's range.
    pub fn from_minutes(start: Instant, minutes: i64) -> Result<Self> {
        Ok(Self {
            start,
            end: add_minutes(start, minutes)?,
        })
    }

    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        intervals_overlap(self.start, self.end, other.start, other.end)
    }

    pub fn duration_minutes(&self) -> f64 {
        minutes_between(self.start, self.end)
    }
}

/// Serde adapter reading timestamps through [`parse_instant`] and writing RFC 3339.
pub mod lenient {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{parse_instant, Instant};

    pub fn serialize<S: Serializer>(instant: &Instant, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&instant.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Instant, D::Error> {
        let text = Option::<String>::deserialize(deserializer)?;
        Ok(parse_instant(text.as_deref().unwrap_or_default()))
    }
}
