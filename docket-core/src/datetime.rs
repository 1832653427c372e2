//! Turning a picked date plus a typed "10:30 AM" into an event start time.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::ValidationError;

/// How long an event lasts when no end time is given.
///
/// The calendar and the case page's quick hearing form use different
/// defaults, and both are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLength {
    /// Events created from the calendar: 2 hours
    Calendar,
    /// Hearings scheduled from a case's detail page: 1 hour
    QuickHearing,
}

impl EventLength {
    pub fn duration(self) -> Duration {
        match self {
            EventLength::Calendar => Duration::hours(2),
            EventLength::QuickHearing => Duration::hours(1),
        }
    }

    /// Fails only past the last instant chrono can represent.
    pub fn end_for<Tz: TimeZone>(self, start: &DateTime<Tz>) -> Result<DateTime<Tz>, ValidationError> {
        start.clone().checked_add_signed(self.duration()).ok_or_else(|| {
            ValidationError::InvalidDate(start.date_naive().format("%Y-%m-%d").to_string())
        })
    }
}

/// Parse a 12-hour clock time: `H:MM AM` or `HH:MM PM`.
///
/// Hour 1-12 (leading zero optional), minute 00-59, suffix in any case.
/// Whitespace around the input and before the suffix is ignored.
pub fn parse_time(input: &str) -> Result<NaiveTime, ValidationError> {
    let s = input.trim();
    let split = s.len().checked_sub(2).ok_or(ValidationError::InvalidTime)?;
    let (clock, suffix) = match (s.get(..split), s.get(split..)) {
        (Some(clock), Some(suffix)) => (clock.trim_end(), suffix),
        _ => return Err(ValidationError::InvalidTime),
    };

    let pm = if suffix.eq_ignore_ascii_case("pm") {
        true
    } else if suffix.eq_ignore_ascii_case("am") {
        false
    } else {
        return Err(ValidationError::InvalidTime);
    };

    let (hour, minute) = clock.split_once(':').ok_or(ValidationError::InvalidTime)?;
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 || !all_digits(hour) || !all_digits(minute) {
        return Err(ValidationError::InvalidTime);
    }

    let hour: u32 = hour.parse().map_err(|_| ValidationError::InvalidTime)?;
    let minute: u32 = minute.parse().map_err(|_| ValidationError::InvalidTime)?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return Err(ValidationError::InvalidTime);
    }

    NaiveTime::from_hms_opt(to_24_hour(hour, pm), minute, 0).ok_or(ValidationError::InvalidTime)
}

/// 12 AM is midnight, 12 PM is noon.
fn to_24_hour(hour: u32, pm: bool) -> u32 {
    match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    }
}

/// Combine a calendar date with a 12-hour time string in `tz`.
///
/// A wall-clock time that falls in a DST gap is rejected; an ambiguous one
/// (clocks falling back) resolves to the earlier instant.
pub fn combine<Tz: TimeZone>(
    date: NaiveDate,
    time: &str,
    tz: &Tz,
) -> Result<DateTime<Tz>, ValidationError> {
    let time_of_day = parse_time(time)?;

    tz.from_local_datetime(&date.and_time(time_of_day))
        .earliest()
        .ok_or_else(|| ValidationError::NonexistentLocalTime(format!("{} {}", date, time.trim())))
}

/// Reject start times that are not strictly after `now`.
pub fn ensure_future<Tz: TimeZone>(
    start: &DateTime<Tz>,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    if start.with_timezone(&Utc) > now {
        Ok(())
    } else {
        Err(ValidationError::PastTime)
    }
}

/// Format a time the way it is typed in: "10:30 AM".
pub fn time_label<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%-I:%M %p").to_string()
}

/// Parse YYYY-MM-DD.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}
