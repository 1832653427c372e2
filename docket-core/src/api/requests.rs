//! Request bodies and query filters for the case-management API.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::date_range::DateRange;
use crate::event::EventType;

/// Body of `POST /events`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PUT /events/:id`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateEventRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

impl UpdateEventRequest {
    pub fn outcome(outcome: impl Into<String>) -> Self {
        UpdateEventRequest {
            outcome: Some(outcome.into()),
            ..Default::default()
        }
    }
}

/// Query for `GET /events`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(rename = "start", skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(rename = "end", skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
}

impl EventFilter {
    pub fn for_case(case_id: impl Into<String>) -> Self {
        EventFilter {
            case: Some(case_id.into()),
            ..Default::default()
        }
    }

    pub fn in_range(range: &DateRange) -> Self {
        EventFilter {
            from: range.from,
            to: range.to,
            ..Default::default()
        }
    }

    pub fn with_type(mut self, event_type: Option<EventType>) -> Self {
        self.event_type = event_type;
        self
    }

    pub fn with_case(mut self, case_id: Option<String>) -> Self {
        self.case = case_id;
        self
    }
}

/// Query for `GET /cases`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CaseFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// A file to send to `POST /documents/upload`
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub path: PathBuf,
    pub title: String,
    pub case_id: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcome_update_sends_only_outcome() {
        let body = serde_json::to_value(UpdateEventRequest::outcome("Granted")).unwrap();
        assert_eq!(body, json!({ "outcome": "Granted" }));
    }

    #[test]
    fn create_request_uses_wire_names() {
        let start: DateTime<Utc> = "2026-10-20T15:30:00Z".parse().unwrap();
        let req = CreateEventRequest {
            title: "Hearing A".into(),
            case: Some("c1".into()),
            start,
            end: start + chrono::Duration::hours(2),
            event_type: EventType::Hearing,
            location: None,
            description: None,
        };

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "title": "Hearing A",
                "case": "c1",
                "start": "2026-10-20T15:30:00Z",
                "end": "2026-10-20T17:30:00Z",
                "type": "hearing"
            })
        );
    }
}
