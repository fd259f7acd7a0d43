//! Local date/time utilities.
//!
//! The store hands back a mix of temporal shapes: full timestamps for
//! meetings and actions, bare `YYYY-MM-DD` keys for the per-day ledgers.
//! Everything here reduces those shapes to the user's local calendar day
//! before comparing.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use super::constants::{GRID_START_HOUR, UNITS_PER_HOUR};

/// Format an instant as its local `YYYY-MM-DD` calendar key.
pub fn local_date_key(instant: DateTime<Utc>, tz: &Tz) -> String {
    let local = instant.with_timezone(tz);
    format!(
        "{:04}-{:02}-{:02}",
        local.year(),
        local.month(),
        local.day()
    )
}

/// Format a plain date as its `YYYY-MM-DD` key.
pub fn date_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// A value that can denote a calendar day: a date, an instant, or raw
/// text from the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum DayRef {
    Date(NaiveDate),
    Instant(DateTime<Utc>),
    Text(String),
}

impl From<NaiveDate> for DayRef {
    fn from(date: NaiveDate) -> Self {
        DayRef::Date(date)
    }
}

impl From<DateTime<Utc>> for DayRef {
    fn from(instant: DateTime<Utc>) -> Self {
        DayRef::Instant(instant)
    }
}

impl From<&str> for DayRef {
    fn from(text: &str) -> Self {
        DayRef::Text(text.to_string())
    }
}

impl DayRef {
    /// Reduce to a local date key.
    ///
    /// A 10-character string without a time component is treated as
    /// already being a local key; other text is parsed as a timestamp
    /// (with or without offset) and localized. Returns `None` for
    /// unparseable text.
    pub fn local_key(&self, tz: &Tz) -> Option<String> {
        match self {
            DayRef::Date(date) => Some(date_key(*date)),
            DayRef::Instant(instant) => Some(local_date_key(*instant, tz)),
            DayRef::Text(text) => {
                if text.len() == 10 && !text.contains('T') {
                    return NaiveDate::parse_from_str(text, "%Y-%m-%d")
                        .ok()
                        .map(date_key);
                }
                if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                    return Some(local_date_key(parsed.with_timezone(&Utc), tz));
                }
                // Bare datetime without offset: already local
                NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
                    .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M"))
                    .ok()
                    .map(|dt| date_key(dt.date()))
            }
        }
    }
}

/// True iff both values are present and reduce to the same local key.
pub fn same_day<A, B>(a: Option<A>, b: Option<B>, tz: &Tz) -> bool
where
    A: Into<DayRef>,
    B: Into<DayRef>,
{
    match (a, b) {
        (Some(a), Some(b)) => match (a.into().local_key(tz), b.into().local_key(tz)) {
            (Some(key_a), Some(key_b)) => key_a == key_b,
            _ => false,
        },
        _ => false,
    }
}

/// Format an instant as local 24-hour `HH:MM`.
pub fn format_time(instant: DateTime<Utc>, tz: &Tz) -> String {
    let local = instant.with_timezone(tz);
    format!("{:02}:{:02}", local.hour(), local.minute())
}

/// Parse an `HH:MM` time-of-day string (as stored on work entries).
pub fn parse_hhmm(text: &str) -> Option<NaiveTime> {
    let (hours, minutes) = text.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

/// Combine a date with an `HH:MM` time of day, seconds zeroed.
pub fn combine_date_and_time(date: NaiveDate, time: &str) -> Option<NaiveDateTime> {
    Some(date.and_time(parse_hhmm(time)?))
}

/// A vertical slot on the fixed-height hourly grid, in pixel-equivalent
/// units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPosition {
    pub top: f64,
    pub height: f64,
}

impl GridPosition {
    pub fn top_px(&self) -> String {
        format!("{}px", self.top)
    }

    pub fn height_px(&self) -> String {
        format!("{}px", self.height)
    }
}

/// Map an instant onto the visual scale: origin 06:00, 64 units/hour.
///
/// Returns `None` when the local hour is before 06:00 — the caller must
/// route such items to an off-grid list rather than drop them.
pub fn grid_position(
    instant: DateTime<Utc>,
    duration_minutes: i64,
    tz: &Tz,
) -> Option<GridPosition> {
    let local = instant.with_timezone(tz);
    grid_position_local(local.time(), duration_minutes)
}

/// Same mapping for a local time of day (work-entry overlays).
pub fn grid_position_local(time: NaiveTime, duration_minutes: i64) -> Option<GridPosition> {
    if time.hour() < GRID_START_HOUR {
        return None;
    }
    let top = (time.hour() - GRID_START_HOUR) as f64 * UNITS_PER_HOUR
        + time.minute() as f64 / 60.0 * UNITS_PER_HOUR;
    let height = duration_minutes as f64 / 60.0 * UNITS_PER_HOUR;
    Some(GridPosition { top, height })
}

// ============================================================================
// Tests
// ============================================================================
