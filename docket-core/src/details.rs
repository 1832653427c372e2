//! State behind a case's detail screen: the case, its events and
//! documents, and the hearing timeline built from them.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tracing::warn;

use crate::api::ApiClient;
use crate::case::{Case, Document};
use crate::datetime::EventLength;
use crate::draft::EventDraft;
use crate::error::DocketResult;
use crate::event::CalendarEvent;
use crate::hearing::{HearingEntry, HearingTimeline};

pub struct CaseDetails<Tz: TimeZone> {
    tz: Tz,
    pub case: Case,
    pub events: Vec<CalendarEvent>,
    pub documents: Vec<Document>,
    timeline: HearingTimeline,
}

impl<Tz: TimeZone> CaseDetails<Tz> {
    pub fn from_parts(
        case: Case,
        events: Vec<CalendarEvent>,
        documents: Vec<Document>,
        tz: Tz,
    ) -> Self {
        let timeline = HearingTimeline::for_case(&case, &events, &tz);
        CaseDetails {
            tz,
            case,
            events,
            documents,
            timeline,
        }
    }

    /// Fetch the case, its events and its documents concurrently.
    ///
    /// The case itself must load. Events or documents that fail to load are
    /// logged and shown as empty.
    pub async fn load(client: &ApiClient, case_id: &str, tz: Tz) -> DocketResult<Self> {
        let (case, events, documents) = tokio::join!(
            client.get_case(case_id),
            client.events_for_case(case_id),
            client.documents_for_case(case_id)
        );

        let case = case?;
        let events = events.unwrap_or_else(|e| {
            warn!(case = case_id, error = %e, "could not load case events");
            Vec::new()
        });
        let documents = documents.unwrap_or_else(|e| {
            warn!(case = case_id, error = %e, "could not load case documents");
            Vec::new()
        });

        Ok(Self::from_parts(case, events, documents, tz))
    }

    pub fn timeline(&self) -> &HearingTimeline {
        &self.timeline
    }

    fn rebuild_timeline(&mut self) {
        self.timeline = HearingTimeline::for_case(&self.case, &self.events, &self.tz);
    }

    /// Record the outcome of the hearing at zero-based `index`.
    ///
    /// The timeline only changes once the backend has accepted the update.
    pub async fn record_outcome(
        &mut self,
        client: &ApiClient,
        index: usize,
        outcome: &str,
    ) -> DocketResult<&HearingEntry> {
        let id = self.timeline.outcome_target(index)?.to_string();
        let updated = client.update_outcome(&id, outcome).await?;

        if let Some(existing) = self.events.iter_mut().find(|e| e.id == updated.id) {
            *existing = updated.clone();
        }
        self.timeline.apply_update(&updated);

        self.timeline.get(index)
    }

    /// Schedule a one-hour hearing for this case.
    pub async fn schedule_hearing(
        &mut self,
        client: &ApiClient,
        date: Option<NaiveDate>,
        time: &str,
        description: Option<String>,
        now: DateTime<Utc>,
    ) -> DocketResult<CalendarEvent> {
        let mut draft = EventDraft::quick_hearing(&self.case, date, time);
        draft.description = description;

        let request = draft.to_request(EventLength::QuickHearing, &self.tz, now)?;
        let created = client.create_event(&request).await?;

        self.events.push(created.clone());
        self.rebuild_timeline();
        Ok(created)
    }
}
