//! Month and week grids for the calendar view.
//!
//! Cells are matched to events purely by their `YYYY-MM-DD` key. An event's
//! key is fixed when it is converted into a [`CalendarEntry`], in whatever
//! time zone the calendar is displayed in.

use std::fmt;

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, TimeZone, Utc};

use crate::date_range::DateRange;
use crate::datetime::time_label;
use crate::event::{CalendarEvent, EventType};

/// Anything that can be placed on a grid by its day key.
pub trait DayKeyed {
    fn day_key(&self) -> &str;
}

/// One slot of a month or week grid.
///
/// Padding cells (before the first of the month) have no date and no events.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<E> {
    pub date: Option<NaiveDate>,
    pub events: Vec<E>,
}

impl<E> DayCell<E> {
    fn padding() -> Self {
        DayCell {
            date: None,
            events: Vec::new(),
        }
    }

    /// Day of month, or None for padding.
    pub fn day(&self) -> Option<u32> {
        self.date.map(|d| d.day())
    }

    pub fn key(&self) -> Option<String> {
        self.date.map(day_key)
    }

    pub fn is_padding(&self) -> bool {
        self.date.is_none()
    }
}

pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn cell_for<E: DayKeyed + Clone>(date: NaiveDate, events: &[E]) -> DayCell<E> {
    let key = day_key(date);
    DayCell {
        date: Some(date),
        events: events.iter().filter(|e| e.day_key() == key).cloned().collect(),
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Clamped to `date` itself in the first week chrono can represent.
fn sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    let back = Days::new(u64::from(date.weekday().num_days_from_sunday()));
    date.checked_sub_days(back).unwrap_or(date)
}

/// Cells for the month containing `reference`: one padding cell per weekday
/// before the 1st (weeks start on Sunday), then one cell per day. The last
/// row is not padded out.
pub fn month_grid<E: DayKeyed + Clone>(reference: NaiveDate, events: &[E]) -> Vec<DayCell<E>> {
    let first = first_of_month(reference);
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut cells: Vec<DayCell<E>> = (0..leading).map(|_| DayCell::padding()).collect();
    cells.extend(
        first
            .iter_days()
            .take_while(|d| d.month() == first.month())
            .map(|d| cell_for(d, events)),
    );
    cells
}

/// The seven cells (Sunday to Saturday) of the week containing `current`.
pub fn week_grid<E: DayKeyed + Clone>(current: NaiveDate, events: &[E]) -> Vec<DayCell<E>> {
    sunday_on_or_before(current)
        .iter_days()
        .take(7)
        .map(|d| cell_for(d, events))
        .collect()
}

/// Split grid cells into display rows of seven.
pub fn weeks<E>(cells: &[DayCell<E>]) -> std::slice::Chunks<'_, DayCell<E>> {
    cells.chunks(7)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Month,
    Week,
}

impl ViewMode {
    pub fn grid<E: DayKeyed + Clone>(self, cursor: NaiveDate, events: &[E]) -> Vec<DayCell<E>> {
        match self {
            ViewMode::Month => month_grid(cursor, events),
            ViewMode::Week => week_grid(cursor, events),
        }
    }

    /// Move the cursor by `steps` months or weeks. Month steps land on the 1st.
    pub fn shift(self, cursor: NaiveDate, steps: i32) -> NaiveDate {
        match self {
            ViewMode::Month => {
                let first = first_of_month(cursor);
                let months = Months::new(steps.unsigned_abs());
                let shifted = if steps >= 0 {
                    first.checked_add_months(months)
                } else {
                    first.checked_sub_months(months)
                };
                shifted.unwrap_or(first)
            }
            ViewMode::Week => cursor
                .checked_add_signed(Duration::weeks(i64::from(steps)))
                .unwrap_or(cursor),
        }
    }

    /// First and last visible day.
    pub fn bounds(self, cursor: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            ViewMode::Month => {
                let first = first_of_month(cursor);
                let last = first
                    .iter_days()
                    .take_while(|d| d.month() == first.month())
                    .last()
                    .unwrap_or(first);
                (first, last)
            }
            ViewMode::Week => {
                let sunday = sunday_on_or_before(cursor);
                let saturday = sunday.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
                (sunday, saturday)
            }
        }
    }

    /// The span of time to fetch events for.
    pub fn range<Tz: TimeZone>(self, cursor: NaiveDate, tz: &Tz) -> DateRange {
        let (first, last) = self.bounds(cursor);
        DateRange::for_days(first, last, tz)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ViewMode::Month => write!(f, "month"),
            ViewMode::Week => write!(f, "week"),
        }
    }
}

/// An event as placed on the calendar grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub id: String,
    pub title: String,
    pub event_type: EventType,
    pub start: DateTime<Utc>,
    /// `YYYY-MM-DD` of the start in the display time zone
    pub date: String,
    /// "10:30 AM"
    pub time_label: String,
    pub case_title: Option<String>,
}

impl CalendarEntry {
    pub fn from_event<Tz: TimeZone>(event: &CalendarEvent, tz: &Tz) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        let local = event.start.with_timezone(tz);
        CalendarEntry {
            id: event.id.clone(),
            title: event.title.clone(),
            event_type: event.event_type,
            start: event.start,
            date: day_key(local.date_naive()),
            time_label: time_label(&local),
            case_title: event.case.as_ref().and_then(|c| c.title.clone()),
        }
    }

    /// "10:30 AM - Hearing A"
    pub fn display_text(&self) -> String {
        format!("{} - {}", self.time_label, self.title)
    }
}

impl DayKeyed for CalendarEntry {
    fn day_key(&self) -> &str {
        &self.date
    }
}

/// Convert fetched events into grid entries, earliest first.
pub fn entries<Tz: TimeZone>(events: &[CalendarEvent], tz: &Tz) -> Vec<CalendarEntry>
where
    Tz::Offset: fmt::Display,
{
    let mut entries: Vec<CalendarEntry> =
        events.iter().map(|e| CalendarEntry::from_event(e, tz)).collect();
    entries.sort_by(|a, b| a.start.cmp(&b.start));
    entries
}
