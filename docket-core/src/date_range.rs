//! Date range for filtering events.

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::datetime::parse_date;
use crate::error::ValidationError;

/// How far ahead the agenda looks when no end date is given.
pub const DEFAULT_AGENDA_DAYS: i64 = 14;

/// Date range for filtering events.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Start of `first` through the end of `last`, as local days in `tz`.
    /// Open-ended when `last` is the last day chrono can represent.
    pub fn for_days<Tz: TimeZone>(first: NaiveDate, last: NaiveDate, tz: &Tz) -> Self {
        DateRange {
            from: Some(start_of_day(first, tz)),
            to: last.succ_opt().map(|next| start_of_day(next, tz)),
        }
    }

    /// Parse agenda bounds.
    /// - `from`: YYYY-MM-DD, defaults to now
    /// - `to`: YYYY-MM-DD (inclusive), defaults to DEFAULT_AGENDA_DAYS after `from`
    pub fn from_args<Tz: TimeZone>(
        from: Option<&str>,
        to: Option<&str>,
        tz: &Tz,
    ) -> Result<Self, ValidationError> {
        let from_dt = match from {
            Some(s) => start_of_day(parse_date(s)?, tz),
            None => Utc::now(),
        };

        let to_dt = match to {
            Some(s) => {
                let next = parse_date(s)?
                    .checked_add_days(Days::new(1))
                    .ok_or_else(|| ValidationError::InvalidDate(s.to_string()))?;
                start_of_day(next, tz)
            }
            None => from_dt
                .checked_add_signed(Duration::days(DEFAULT_AGENDA_DAYS))
                .ok_or_else(|| ValidationError::InvalidDate(from.unwrap_or_default().to_string()))?,
        };

        Ok(DateRange {
            from: Some(from_dt),
            to: Some(to_dt),
        })
    }

    /// Half-open containment: `from <= t < to`.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| t >= from) && self.to.is_none_or(|to| t < to)
    }
}

/// Local midnight, or the first instant of the day when midnight is skipped.
fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        // Zones that skip midnight (e.g. America/Santiago) jump forward an hour
        None => naive
            .checked_add_signed(Duration::hours(1))
            .and_then(|later| tz.from_local_datetime(&later).earliest())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| naive.and_utc()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn for_days_covers_whole_local_days() {
        let range = DateRange::for_days(date(2026, 10, 1), date(2026, 10, 31), &chrono_tz::America::Chicago);
        assert_eq!(range.from.unwrap().to_rfc3339(), "2026-10-01T05:00:00+00:00");
        // Nov 1 is the DST change; midnight is still CDT
        assert_eq!(range.to.unwrap().to_rfc3339(), "2026-11-01T05:00:00+00:00");
        assert!(range.contains("2026-10-31T23:00:00Z".parse().unwrap()));
        assert!(!range.contains("2026-11-01T05:00:00Z".parse().unwrap()));
    }

    #[test]
    fn from_args_end_is_inclusive() {
        let range = DateRange::from_args(Some("2026-03-01"), Some("2026-03-02"), &Utc).unwrap();
        assert!(range.contains("2026-03-02T23:59:59Z".parse().unwrap()));
        assert!(!range.contains("2026-03-03T00:00:00Z".parse().unwrap()));
    }

    #[test]
    fn from_args_defaults_to_agenda_window() {
        let range = DateRange::from_args(None, None, &Utc).unwrap();
        let span = range.to.unwrap() - range.from.unwrap();
        assert_eq!(span, Duration::days(DEFAULT_AGENDA_DAYS));
    }

    #[test]
    fn end_of_representable_time_is_invalid_not_a_panic() {
        let last = NaiveDate::MAX.format("%Y-%m-%d").to_string();
        assert_eq!(
            DateRange::from_args(Some("2026-03-01"), Some(&last), &Utc),
            Err(ValidationError::InvalidDate(last.clone()))
        );
        assert_eq!(
            DateRange::from_args(Some(&last), None, &Utc),
            Err(ValidationError::InvalidDate(last.clone()))
        );

        let open = DateRange::for_days(NaiveDate::MAX, NaiveDate::MAX, &Utc);
        assert!(open.to.is_none());
        assert!(open.contains(NaiveDate::MAX.and_time(NaiveTime::MIN).and_utc()));
    }

    #[test]
    fn from_args_rejects_bad_dates() {
        assert_eq!(
            DateRange::from_args(Some("next week"), None, &Utc),
            Err(ValidationError::InvalidDate("next week".into()))
        );
    }
}
