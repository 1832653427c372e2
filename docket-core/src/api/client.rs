//! HTTP client for the case-management backend.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::api::requests::{
    CaseFilter, CreateEventRequest, DocumentUpload, EventFilter, UpdateEventRequest,
};
use crate::case::{Case, Document};
use crate::error::{DocketError, DocketResult};
use crate::event::CalendarEvent;
use crate::session::Session;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the case-management REST API.
///
/// Every request carries the session's bearer token when it has one.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Session) -> DocketResult<Self> {
        Self::with_timeout(base_url, session, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, session: Session, timeout: Duration) -> DocketResult<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| DocketError::Config(format!("Invalid API URL '{base_url}': {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(DocketError::Config(format!(
                "Invalid API URL '{base_url}': must be an http(s) URL"
            )));
        }

        // Url::join drops the last segment unless the base ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(ApiClient {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the URL for a path below the API root. Segments are
    /// percent-encoded, so ids can't escape their position.
    fn endpoint(&self, segments: &[&str]) -> DocketResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DocketError::Config(format!("Invalid API URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> DocketResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "api request");

        let builder = self.http.request(method, url);
        Ok(match self.session.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// GET /events
    pub async fn list_events(&self, filter: &EventFilter) -> DocketResult<Vec<CalendarEvent>> {
        let req = self.request(Method::GET, &["events"])?.query(filter);
        send_list(req, "/events").await
    }

    /// GET /events?case=:id
    pub async fn events_for_case(&self, case_id: &str) -> DocketResult<Vec<CalendarEvent>> {
        self.list_events(&EventFilter::for_case(case_id)).await
    }

    /// POST /events
    pub async fn create_event(&self, body: &CreateEventRequest) -> DocketResult<CalendarEvent> {
        let req = self.request(Method::POST, &["events"])?.json(body);
        send_json(req, "/events").await
    }

    /// PUT /events/:id
    pub async fn update_event(
        &self,
        id: &str,
        body: &UpdateEventRequest,
    ) -> DocketResult<CalendarEvent> {
        let req = self.request(Method::PUT, &["events", id])?.json(body);
        send_json(req, "/events/:id").await
    }

    /// PUT /events/:id with only the outcome
    pub async fn update_outcome(&self, id: &str, outcome: &str) -> DocketResult<CalendarEvent> {
        self.update_event(id, &UpdateEventRequest::outcome(outcome)).await
    }

    /// DELETE /events/:id
    pub async fn delete_event(&self, id: &str) -> DocketResult<()> {
        send_empty(self.request(Method::DELETE, &["events", id])?).await
    }

    // =========================================================================
    // Cases
    // =========================================================================

    /// GET /cases
    pub async fn list_cases(&self, filter: &CaseFilter) -> DocketResult<Vec<Case>> {
        let req = self.request(Method::GET, &["cases"])?.query(filter);
        send_list(req, "/cases").await
    }

    /// GET /cases/:id
    pub async fn get_case(&self, id: &str) -> DocketResult<Case> {
        send_json(self.request(Method::GET, &["cases", id])?, "/cases/:id").await
    }

    /// DELETE /cases/:id
    pub async fn delete_case(&self, id: &str) -> DocketResult<()> {
        send_empty(self.request(Method::DELETE, &["cases", id])?).await
    }

    // =========================================================================
    // Documents
    // =========================================================================

    /// GET /documents?case=:id
    pub async fn documents_for_case(&self, case_id: &str) -> DocketResult<Vec<Document>> {
        let req = self
            .request(Method::GET, &["documents"])?
            .query(&[("case", case_id)]);
        send_list(req, "/documents").await
    }

    /// POST /documents/upload (multipart)
    pub async fn upload_document(&self, upload: &DocumentUpload) -> DocketResult<Document> {
        let bytes = tokio::fs::read(&upload.path).await?;
        let file_name = upload
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();

        let mut form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("title", upload.title.clone());
        if let Some(case_id) = &upload.case_id {
            form = form.text("case", case_id.clone());
        }
        if let Some(description) = &upload.description {
            form = form.text("description", description.clone());
        }

        let req = self
            .request(Method::POST, &["documents", "upload"])?
            .multipart(form);
        send_json(req, "/documents/upload").await
    }
}

/// Pick the user-facing message for a failed response: the body's
/// `message` field if there is one, else the status reason.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        })
}

async fn send_checked(req: RequestBuilder) -> DocketResult<String> {
    let resp = req.send().await?;
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        let message = error_message(status, &body);
        debug!(status = status.as_u16(), %message, "api error");
        return Err(DocketError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(body)
}

async fn send_json<T: DeserializeOwned>(req: RequestBuilder, endpoint: &str) -> DocketResult<T> {
    let body = send_checked(req).await?;
    serde_json::from_str(&body)
        .map_err(|e| DocketError::Serialization(format!("{endpoint}: {e}")))
}

/// Decode a list response. Anything other than a JSON array is an error
/// rather than an empty list.
async fn send_list<T: DeserializeOwned>(
    req: RequestBuilder,
    endpoint: &str,
) -> DocketResult<Vec<T>> {
    let body = send_checked(req).await?;
    parse_list(&body, endpoint)
}

pub(crate) fn parse_list<T: DeserializeOwned>(body: &str, endpoint: &str) -> DocketResult<Vec<T>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| DocketError::Serialization(format!("{endpoint}: {e}")))?;

    match value {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()
            .map_err(|e| DocketError::Serialization(format!("{endpoint}: {e}"))),
        other => {
            warn!(endpoint, kind = json_kind(&other), "expected a JSON array");
            Err(DocketError::UnexpectedShape(endpoint.to_string()))
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

async fn send_empty(req: RequestBuilder) -> DocketResult<()> {
    send_checked(req).await.map(|_| ())
}
