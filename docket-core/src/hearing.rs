//! A case's hearing history.
//!
//! A case records its first hearing date when it is opened, but a calendar
//! event for that hearing may never have been created. The timeline merges
//! that date with the case's hearing events so every hearing shows up once,
//! in order, with a "First", "Second", ... label.

use chrono::{DateTime, TimeZone, Utc};

use crate::case::Case;
use crate::error::{DocketError, DocketResult};
use crate::event::CalendarEvent;

/// Id given to the entry built from a case's first hearing date.
pub const SYNTHESIZED_HEARING_ID: &str = "first-hearing";

const SYNTHESIZED_DESCRIPTION: &str = "First hearing (scheduled at case creation)";

const ORDINALS: [&str; 10] = [
    "First", "Second", "Third", "Fourth", "Fifth", "Sixth", "Seventh", "Eighth", "Ninth", "Tenth",
];

#[derive(Debug, Clone, PartialEq)]
pub struct HearingEntry {
    pub id: String,
    pub start: DateTime<Utc>,
    pub description: String,
    /// Empty until an outcome is recorded
    pub outcome: String,
    /// Built from the case's first hearing date, not backed by an event
    pub synthesized: bool,
}

impl HearingEntry {
    fn from_event(event: &CalendarEvent) -> Self {
        HearingEntry {
            id: event.id.clone(),
            start: event.start,
            description: event
                .description
                .clone()
                .unwrap_or_else(|| event.title.clone()),
            outcome: event.outcome.clone().unwrap_or_default(),
            synthesized: false,
        }
    }

    fn first_hearing(start: DateTime<Utc>) -> Self {
        HearingEntry {
            id: SYNTHESIZED_HEARING_ID.to_string(),
            start,
            description: SYNTHESIZED_DESCRIPTION.to_string(),
            outcome: String::new(),
            synthesized: true,
        }
    }

    pub fn has_outcome(&self) -> bool {
        !self.outcome.trim().is_empty()
    }
}

/// "First" through "Tenth", then "11th", "12th", ...
pub fn ordinal_label(index: usize) -> String {
    match ORDINALS.get(index) {
        Some(word) => (*word).to_string(),
        None => format!("{}th", index + 1),
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HearingTimeline {
    entries: Vec<HearingEntry>,
}

impl HearingTimeline {
    /// Build the timeline from the case's first hearing date and its events.
    ///
    /// Non-hearing events are ignored. Hearings are sorted by start. If no
    /// hearing falls on the same day (in `tz`) as `first_hearing`, an entry
    /// for it is put at the front. The list is not re-sorted afterwards, so
    /// a hearing event dated before the first hearing will still follow it.
    pub fn reconcile<Tz: TimeZone>(
        first_hearing: Option<DateTime<Utc>>,
        events: &[CalendarEvent],
        tz: &Tz,
    ) -> Self {
        let mut hearings: Vec<&CalendarEvent> = events.iter().filter(|e| e.is_hearing()).collect();
        hearings.sort_by_key(|e| e.start);

        let mut entries: Vec<HearingEntry> =
            hearings.iter().map(|e| HearingEntry::from_event(e)).collect();

        if let Some(first) = first_hearing {
            let first_day = first.with_timezone(tz).date_naive();
            let recorded = hearings.iter().any(|e| e.local_date(tz) == first_day);
            if !recorded {
                entries.insert(0, HearingEntry::first_hearing(first));
            }
        }

        HearingTimeline { entries }
    }

    pub fn for_case<Tz: TimeZone>(case: &Case, events: &[CalendarEvent], tz: &Tz) -> Self {
        Self::reconcile(case.first_hearing_date, events, tz)
    }

    pub fn entries(&self) -> &[HearingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries paired with their ordinal label.
    pub fn labeled(&self) -> impl Iterator<Item = (String, &HearingEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (ordinal_label(i), entry))
    }

    /// Entry at a zero-based position, for viewing its outcome.
    pub fn get(&self, index: usize) -> DocketResult<&HearingEntry> {
        self.entries
            .get(index)
            .ok_or_else(|| DocketError::NotFound(format!("hearing #{}", index + 1)))
    }

    /// Event id to send an outcome update to. Synthesized entries have no
    /// event and cannot be edited.
    pub fn outcome_target(&self, index: usize) -> DocketResult<&str> {
        let entry = self.get(index)?;
        if entry.synthesized {
            return Err(DocketError::NotEditable(index + 1));
        }
        Ok(&entry.id)
    }

    /// Apply an event returned by a successful update. Returns false if the
    /// event is not on this timeline.
    pub fn apply_update(&mut self, event: &CalendarEvent) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|entry| !entry.synthesized && entry.id == event.id)
        {
            Some(entry) => {
                *entry = HearingEntry::from_event(event);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;

    fn event(id: &str, start: &str, event_type: EventType) -> CalendarEvent {
        CalendarEvent {
            id: id.into(),
            title: format!("Event {id}"),
            start: start.parse().unwrap(),
            end: None,
            event_type,
            location: None,
            description: None,
            case: None,
            outcome: None,
        }
    }

    fn hearing(id: &str, start: &str) -> CalendarEvent {
        event(id, start, EventType::Hearing)
    }

    fn at(s: &str) -> Option<DateTime<Utc>> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn no_synthesized_entry_when_first_hearing_has_event() {
        let events = vec![
            hearing("h2", "2026-05-10T15:00:00Z"),
            // Same day as the first hearing date, different time
            hearing("h1", "2026-04-02T16:30:00Z"),
        ];

        let timeline = HearingTimeline::reconcile(at("2026-04-02T14:00:00Z"), &events, &Utc);

        assert_eq!(timeline.len(), 2);
        assert!(timeline.entries().iter().all(|e| !e.synthesized));
        assert_eq!(timeline.entries()[0].id, "h1");
    }

    #[test]
    fn first_hearing_synthesized_when_no_events() {
        let timeline = HearingTimeline::reconcile(at("2026-04-02T14:00:00Z"), &[], &Utc);

        assert_eq!(timeline.len(), 1);
        let entry = &timeline.entries()[0];
        assert!(entry.synthesized);
        assert_eq!(entry.id, SYNTHESIZED_HEARING_ID);
        assert_eq!(entry.start, at("2026-04-02T14:00:00Z").unwrap());
        assert_eq!(entry.outcome, "");
    }

    #[test]
    fn only_hearings_are_included_and_sorted() {
        let events = vec![
            hearing("late", "2026-06-01T15:00:00Z"),
            event("meeting", "2026-04-01T15:00:00Z", EventType::ClientMeeting),
            hearing("early", "2026-05-01T15:00:00Z"),
            event("filing", "2026-04-02T15:00:00Z", EventType::CaseFiling),
        ];

        // The filing shares the first hearing's day but is not a hearing
        let timeline = HearingTimeline::reconcile(at("2026-04-02T14:00:00Z"), &events, &Utc);
        let ids: Vec<_> = timeline.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, [SYNTHESIZED_HEARING_ID, "early", "late"]);
    }

    #[test]
    fn synthesized_entry_is_prepended_without_resorting() {
        let events = vec![hearing("before", "2026-03-15T15:00:00Z")];
        let timeline = HearingTimeline::reconcile(at("2026-04-02T14:00:00Z"), &events, &Utc);

        let ids: Vec<_> = timeline.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, [SYNTHESIZED_HEARING_ID, "before"]);
    }

    #[test]
    fn day_match_uses_display_time_zone() {
        // 01:00 UTC on Apr 3 is the evening of Apr 2 in Chicago
        let events = vec![hearing("h1", "2026-04-03T01:00:00Z")];
        let first = at("2026-04-02T14:00:00Z");

        assert_eq!(HearingTimeline::reconcile(first, &events, &Utc).len(), 2);
        assert_eq!(
            HearingTimeline::reconcile(first, &events, &chrono_tz::America::Chicago).len(),
            1
        );
    }

    #[test]
    fn no_first_hearing_date_means_events_only() {
        let events = vec![hearing("h1", "2026-04-03T01:00:00Z")];
        let timeline = HearingTimeline::reconcile(None, &events, &Utc);
        assert_eq!(timeline.len(), 1);
        assert!(HearingTimeline::reconcile(None, &[], &Utc).is_empty());
    }

    #[test]
    fn ordinal_labels() {
        assert_eq!(ordinal_label(0), "First");
        assert_eq!(ordinal_label(1), "Second");
        assert_eq!(ordinal_label(9), "Tenth");
        assert_eq!(ordinal_label(10), "11th");
        assert_eq!(ordinal_label(11), "12th");
        assert_eq!(ordinal_label(20), "21th");
    }

    #[test]
    fn labeled_follows_position() {
        let events: Vec<_> = (1..=12)
            .map(|d| hearing(&format!("h{d}"), &format!("2026-05-{d:02}T15:00:00Z")))
            .collect();
        let timeline = HearingTimeline::reconcile(None, &events, &Utc);
        let labels: Vec<_> = timeline.labeled().map(|(label, _)| label).collect();
        assert_eq!(labels[0], "First");
        assert_eq!(labels[9], "Tenth");
        assert_eq!(labels[11], "12th");
    }

    #[test]
    fn synthesized_entry_is_not_editable_but_viewable() {
        let events = vec![hearing("h1", "2026-05-10T15:00:00Z")];
        let timeline = HearingTimeline::reconcile(at("2026-04-02T14:00:00Z"), &events, &Utc);

        assert!(matches!(timeline.outcome_target(0), Err(DocketError::NotEditable(1))));
        assert_eq!(timeline.get(0).unwrap().description, SYNTHESIZED_DESCRIPTION);
        assert_eq!(timeline.outcome_target(1).unwrap(), "h1");
        assert!(matches!(timeline.outcome_target(2), Err(DocketError::NotFound(_))));
    }

    #[test]
    fn apply_update_replaces_outcome() {
        let events = vec![hearing("h1", "2026-05-10T15:00:00Z")];
        let mut timeline = HearingTimeline::reconcile(at("2026-04-02T14:00:00Z"), &events, &Utc);

        let mut updated = events[0].clone();
        updated.outcome = Some("Adjourned to June".into());
        assert!(timeline.apply_update(&updated));
        assert_eq!(timeline.entries()[1].outcome, "Adjourned to June");
        assert!(timeline.entries()[1].has_outcome());

        let stranger = hearing("h9", "2026-05-11T15:00:00Z");
        assert!(!timeline.apply_update(&stranger));
    }
}
