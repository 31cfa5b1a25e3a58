//! Core types: calendar events, ICS payloads, calendar deep links

pub mod error;
pub mod event;
pub mod export;
pub mod ics;
pub mod links;
pub mod time;
pub mod tracing;

pub use error::{ExportError, ExportResult, PartyRole};
pub use event::{CalendarEvent, Party};
pub use export::{CalendarTarget, Export, ExportFormatter};
pub use ics::{
    ICS_MIME_TYPE, IcsOptions, IcsWriter, ReminderMessages, TextEscaping, escape_text,
    generate_uid,
};
pub use links::{google_calendar_url, outlook_calendar_url};
pub use time::{iso8601_utc, utc_basic, utc_basic_range};
pub use crate::tracing::{LogFormat, TracingConfig, TracingError, init_tracing};
