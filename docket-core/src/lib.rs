//! Core of the docket court calendar.
//!
//! This crate holds everything the front-ends share:
//! - `api` for talking to the case-management backend
//! - `grid` and `view` for laying out the month and week calendars
//! - `hearing` and `details` for a case's hearing history
//! - `draft` and `datetime` for turning form input into validated events

pub mod api;
pub mod case;
pub mod config;
pub mod date_range;
pub mod datetime;
pub mod details;
pub mod draft;
pub mod error;
pub mod event;
pub mod grid;
pub mod hearing;
pub mod refresh;
pub mod session;
pub mod view;

// Re-export the domain types at crate root for convenience
pub use case::{Case, Document, Party};
pub use error::{DocketError, DocketResult, ValidationError};
pub use event::{CalendarEvent, CaseRef, EventType};
