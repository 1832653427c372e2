//! State behind the calendar screen.
//!
//! [`CalendarView`] owns the last fetched cases and events for the visible
//! month or week. Fetches run in parallel and are applied only if nothing
//! newer was started in the meantime. Creates, edits and deletes apply the
//! backend's answer directly instead of fetching everything again.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tracing::{debug, warn};

use crate::api::{ApiClient, CaseFilter, EventFilter};
use crate::case::Case;
use crate::datetime::EventLength;
use crate::draft::{EventDraft, EventEdit};
use crate::error::{DocketError, DocketResult};
use crate::event::{CalendarEvent, EventType};
use crate::grid::{CalendarEntry, DayCell, ViewMode, entries};
use crate::refresh::{Generation, Ticket};

/// Results of one parallel fetch. Each half may fail independently.
#[derive(Debug)]
pub struct Snapshot {
    pub cases: DocketResult<Vec<Case>>,
    pub events: DocketResult<Vec<CalendarEvent>>,
}

impl Snapshot {
    pub fn ok(cases: Vec<Case>, events: Vec<CalendarEvent>) -> Self {
        Snapshot {
            cases: Ok(cases),
            events: Ok(events),
        }
    }
}

/// Fetch cases and the events matching `query` concurrently.
pub async fn fetch_snapshot(client: &ApiClient, query: &EventFilter) -> Snapshot {
    let case_filter = CaseFilter::default();
    let (cases, events) = tokio::join!(
        client.list_cases(&case_filter),
        client.list_events(query)
    );
    Snapshot { cases, events }
}

#[derive(Debug)]
pub enum Applied {
    /// A newer fetch was started; nothing changed.
    Stale,
    /// Successful halves replaced the held data. Failed halves kept the
    /// previous data and are listed here.
    Fresh { errors: Vec<DocketError> },
}

impl Applied {
    pub fn is_stale(&self) -> bool {
        matches!(self, Applied::Stale)
    }
}

pub struct CalendarView<Tz: TimeZone> {
    tz: Tz,
    mode: ViewMode,
    cursor: NaiveDate,
    type_filter: Option<EventType>,
    case_filter: Option<String>,
    cases: Vec<Case>,
    events: Vec<CalendarEvent>,
    generation: Generation,
}

impl<Tz: TimeZone> CalendarView<Tz>
where
    Tz::Offset: fmt::Display,
{
    pub fn new(tz: Tz, mode: ViewMode, cursor: NaiveDate) -> Self {
        CalendarView {
            tz,
            mode,
            cursor,
            type_filter: None,
            case_filter: None,
            cases: Vec::new(),
            events: Vec::new(),
            generation: Generation::new(),
        }
    }

    pub fn tz(&self) -> &Tz {
        &self.tz
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn case_title(&self, case_id: &str) -> Option<&str> {
        self.cases
            .iter()
            .find(|c| c.id == case_id)
            .map(|c| c.title.as_str())
    }

    // =========================================================================
    // What is being looked at
    // =========================================================================

    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode != mode {
            self.mode = mode;
            self.generation.invalidate();
        }
    }

    /// Move forward (positive) or back by months or weeks.
    pub fn navigate(&mut self, steps: i32) {
        self.go_to(self.mode.shift(self.cursor, steps));
    }

    pub fn go_to(&mut self, date: NaiveDate) {
        if self.cursor != date {
            self.cursor = date;
            self.generation.invalidate();
        }
    }

    pub fn set_filters(&mut self, event_type: Option<EventType>, case_id: Option<String>) {
        self.type_filter = event_type;
        self.case_filter = case_id;
        self.generation.invalidate();
    }

    /// Query for the events currently on screen.
    pub fn query(&self) -> EventFilter {
        EventFilter::in_range(&self.mode.range(self.cursor, &self.tz))
            .with_type(self.type_filter)
            .with_case(self.case_filter.clone())
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    pub fn begin_refresh(&self) -> (Ticket, EventFilter) {
        (self.generation.begin(), self.query())
    }

    pub fn apply(&mut self, ticket: &Ticket, snapshot: Snapshot) -> Applied {
        if !ticket.is_current() {
            debug!(ticket = ticket.issued(), "dropping stale calendar fetch");
            return Applied::Stale;
        }

        let mut errors = Vec::new();

        match snapshot.cases {
            Ok(cases) => self.cases = cases,
            Err(e) => {
                warn!(error = %e, "could not load cases, keeping last result");
                errors.push(e);
            }
        }

        match snapshot.events {
            Ok(events) => self.events = events,
            Err(e) => {
                warn!(error = %e, "could not load events, keeping last result");
                errors.push(e);
            }
        }

        Applied::Fresh { errors }
    }

    pub async fn refresh(&mut self, client: &ApiClient) -> Applied {
        let (ticket, query) = self.begin_refresh();
        let snapshot = fetch_snapshot(client, &query).await;
        self.apply(&ticket, snapshot)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    pub fn entries(&self) -> Vec<CalendarEntry> {
        entries(&self.events, &self.tz)
    }

    pub fn grid(&self) -> Vec<DayCell<CalendarEntry>> {
        self.mode.grid(self.cursor, &self.entries())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn apply_created(&mut self, event: CalendarEvent) {
        self.apply_updated(event);
    }

    /// Replace the held copy of `event`, or add it if it is new. An event
    /// that no longer matches the filters or the visible range is dropped.
    pub fn apply_updated(&mut self, event: CalendarEvent) {
        if !self.shows(&event) {
            debug!(id = %event.id, "event is outside the current view");
            self.apply_deleted(&event.id);
            return;
        }

        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
    }

    pub fn apply_deleted(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        self.events.len() != before
    }

    /// Whether `event` would be returned by [`Self::query`].
    fn shows(&self, event: &CalendarEvent) -> bool {
        self.type_filter.is_none_or(|t| t == event.event_type)
            && self
                .case_filter
                .as_deref()
                .is_none_or(|id| event.belongs_to_case(id))
            && self.mode.range(self.cursor, &self.tz).contains(event.start)
    }

    pub fn find_event(&self, id: &str) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Validate `draft`, create it, and add the created event to the view.
    /// Nothing is sent if validation fails.
    pub async fn create(
        &mut self,
        client: &ApiClient,
        draft: &EventDraft,
        now: DateTime<Utc>,
    ) -> DocketResult<CalendarEvent> {
        let request = draft.to_request(EventLength::Calendar, &self.tz, now)?;
        let created = client.create_event(&request).await?;
        self.apply_created(created.clone());
        Ok(created)
    }

    pub async fn update(
        &mut self,
        client: &ApiClient,
        id: &str,
        edit: &EventEdit,
        now: DateTime<Utc>,
    ) -> DocketResult<CalendarEvent> {
        let request = edit.to_request(&self.tz, now)?;
        let updated = client.update_event(id, &request).await?;
        self.apply_updated(updated.clone());
        Ok(updated)
    }

    pub async fn delete(&mut self, client: &ApiClient, id: &str) -> DocketResult<()> {
        client.delete_event(id).await?;
        self.apply_deleted(id);
        Ok(())
    }
}
