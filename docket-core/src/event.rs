//! Calendar event types as the case-management backend serves them.
//!
//! The backend owns these records. docket only ever holds what it last
//! fetched, or what a create/update call handed back.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A calendar event (hearing, meeting, filing deadline, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<CaseRef>,
    /// Free-text result of a hearing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

impl CalendarEvent {
    pub fn is_hearing(&self) -> bool {
        self.event_type == EventType::Hearing
    }

    /// Calendar day of the start time as seen in `tz`.
    pub fn local_date<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.start.with_timezone(tz).date_naive()
    }

    pub fn belongs_to_case(&self, case_id: &str) -> bool {
        self.case.as_ref().is_some_and(|c| c.id == case_id)
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Reference from an event (or document) to its case.
///
/// The backend sends either the bare case id or the populated case object,
/// depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CaseRefWire")]
pub struct CaseRef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CaseRefWire {
    Id(String),
    Populated {
        #[serde(alias = "_id")]
        id: String,
        #[serde(default)]
        title: Option<String>,
    },
}

impl From<CaseRefWire> for CaseRef {
    fn from(wire: CaseRefWire) -> Self {
        match wire {
            CaseRefWire::Id(id) => CaseRef { id, title: None },
            CaseRefWire::Populated { id, title } => CaseRef { id, title },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    #[default]
    Hearing,
    ClientMeeting,
    CaseFiling,
    EvidenceSubmission,
    CourtVisit,
    Mediation,
    Arbitration,
    Judgment,
    Appeal,
}

impl EventType {
    pub const ALL: [EventType; 9] = [
        EventType::Hearing,
        EventType::ClientMeeting,
        EventType::CaseFiling,
        EventType::EvidenceSubmission,
        EventType::CourtVisit,
        EventType::Mediation,
        EventType::Arbitration,
        EventType::Judgment,
        EventType::Appeal,
    ];

    /// Wire value, e.g. "client_meeting"
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Hearing => "hearing",
            EventType::ClientMeeting => "client_meeting",
            EventType::CaseFiling => "case_filing",
            EventType::EvidenceSubmission => "evidence_submission",
            EventType::CourtVisit => "court_visit",
            EventType::Mediation => "mediation",
            EventType::Arbitration => "arbitration",
            EventType::Judgment => "judgment",
            EventType::Appeal => "appeal",
        }
    }

    /// Human-readable name, e.g. "Client Meeting"
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Hearing => "Hearing",
            EventType::ClientMeeting => "Client Meeting",
            EventType::CaseFiling => "Case Filing",
            EventType::EvidenceSubmission => "Evidence Submission",
            EventType::CourtVisit => "Court Visit",
            EventType::Mediation => "Mediation",
            EventType::Arbitration => "Arbitration",
            EventType::Judgment => "Judgment",
            EventType::Appeal => "Appeal",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                let available: Vec<_> = EventType::ALL.iter().map(|t| t.as_str()).collect();
                format!(
                    "Unknown event type '{}'. Available: {}",
                    s,
                    available.join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_populated_case_and_mongo_id() {
        let event: CalendarEvent = serde_json::from_value(json!({
            "_id": "ev1",
            "title": "Bail hearing",
            "start": "2026-03-20T15:00:00Z",
            "type": "hearing",
            "case": { "_id": "c1", "title": "State v. Doe" }
        }))
        .unwrap();

        assert_eq!(event.id, "ev1");
        assert!(event.is_hearing());
        assert_eq!(
            event.case,
            Some(CaseRef {
                id: "c1".into(),
                title: Some("State v. Doe".into())
            })
        );
        assert!(event.end.is_none());
    }

    #[test]
    fn deserializes_bare_case_id() {
        let event: CalendarEvent = serde_json::from_value(json!({
            "id": "ev2",
            "title": "Client call",
            "start": "2026-03-20T15:00:00Z",
            "type": "client_meeting",
            "case": "c9"
        }))
        .unwrap();

        assert!(event.belongs_to_case("c9"));
        assert_eq!(event.event_type, EventType::ClientMeeting);
    }

    #[test]
    fn event_type_parses_loose_input() {
        assert_eq!("hearing".parse::<EventType>(), Ok(EventType::Hearing));
        assert_eq!(
            "Evidence Submission".parse::<EventType>(),
            Ok(EventType::EvidenceSubmission)
        );
        assert_eq!("court-visit".parse::<EventType>(), Ok(EventType::CourtVisit));
        assert!("picnic".parse::<EventType>().is_err());
    }

    #[test]
    fn local_date_follows_time_zone() {
        let event: CalendarEvent = serde_json::from_value(json!({
            "id": "ev3",
            "title": "Late filing",
            "start": "2026-03-21T02:00:00Z",
            "type": "case_filing"
        }))
        .unwrap();

        assert_eq!(
            event.local_date(&Utc),
            NaiveDate::from_ymd_opt(2026, 3, 21).unwrap()
        );
        assert_eq!(
            event.local_date(&chrono_tz::America::New_York),
            NaiveDate::from_ymd_opt(2026, 3, 20).unwrap()
        );
    }
}
