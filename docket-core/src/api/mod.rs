//! Typed access to the case-management REST API.

mod client;
pub mod requests;

pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use requests::{CaseFilter, CreateEventRequest, DocumentUpload, EventFilter, UpdateEventRequest};
