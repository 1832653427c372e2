//! Event form input and its validation.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::api::{CreateEventRequest, UpdateEventRequest};
use crate::case::Case;
use crate::datetime::{EventLength, combine, ensure_future};
use crate::error::ValidationError;
use crate::event::EventType;

/// What the user has entered for a new event so far.
///
/// Reset with `std::mem::take` once the event has been created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub date: Option<NaiveDate>,
    /// "10:30 AM"
    pub time: String,
    pub event_type: EventType,
    pub location: Option<String>,
    pub description: Option<String>,
    pub case_id: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl EventDraft {
    /// A hearing for `case` as scheduled from the case page.
    pub fn quick_hearing(case: &Case, date: Option<NaiveDate>, time: impl Into<String>) -> Self {
        EventDraft {
            title: format!("Hearing: {}", case.title),
            date,
            time: time.into(),
            event_type: EventType::Hearing,
            location: case.court.clone(),
            description: None,
            case_id: Some(case.id.clone()),
        }
    }

    /// Validate the draft and resolve its start time in `tz`.
    ///
    /// Checks run in form order: title, date, time, then that the start is
    /// after `now`. Quick hearings also need a case.
    pub fn start<Tz: TimeZone>(
        &self,
        length: EventLength,
        tz: &Tz,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Tz>, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if length == EventLength::QuickHearing && non_blank(&self.case_id).is_none() {
            return Err(ValidationError::MissingCase);
        }
        let date = self.date.ok_or(ValidationError::MissingDate)?;
        let start = combine(date, &self.time, tz)?;
        ensure_future(&start, now)?;
        Ok(start)
    }

    /// Build the `POST /events` body. The end is `length` after the start.
    pub fn to_request<Tz: TimeZone>(
        &self,
        length: EventLength,
        tz: &Tz,
        now: DateTime<Utc>,
    ) -> Result<CreateEventRequest, ValidationError> {
        let start = self.start(length, tz, now)?;
        let end = length.end_for(&start)?;

        Ok(CreateEventRequest {
            title: self.title.trim().to_string(),
            case: non_blank(&self.case_id),
            start: start.with_timezone(&Utc),
            end: end.with_timezone(&Utc),
            event_type: self.event_type,
            location: non_blank(&self.location),
            description: non_blank(&self.description),
        })
    }
}

/// Changes to an existing event. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventEdit {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub event_type: Option<EventType>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub case_id: Option<String>,
}

impl EventEdit {
    /// Build the `PUT /events/:id` body.
    ///
    /// Moving an event needs both a date and a time; the new start must be
    /// in the future and the end follows the calendar's default length.
    pub fn to_request<Tz: TimeZone>(
        &self,
        tz: &Tz,
        now: DateTime<Utc>,
    ) -> Result<UpdateEventRequest, ValidationError> {
        if self.title.as_ref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ValidationError::EmptyTitle);
        }

        let (start, end) = match (self.date, &self.time) {
            (None, None) => (None, None),
            (None, Some(_)) => return Err(ValidationError::MissingDate),
            (Some(_), None) => return Err(ValidationError::InvalidTime),
            (Some(date), Some(time)) => {
                let start = combine(date, time, tz)?;
                ensure_future(&start, now)?;
                let end = EventLength::Calendar.end_for(&start)?;
                (Some(start.with_timezone(&Utc)), Some(end.with_timezone(&Utc)))
            }
        };

        Ok(UpdateEventRequest {
            title: self.title.as_deref().map(|t| t.trim().to_string()),
            case: non_blank(&self.case_id),
            start,
            end,
            event_type: self.event_type,
            location: self.location.clone(),
            description: self.description.clone(),
            outcome: None,
        })
    }
}

impl fmt::Display for EventDraft {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.date {
            Some(date) => write!(f, "{} on {} at {}", self.title, date, self.time),
            None => write!(f, "{}", self.title),
        }
    }
}
