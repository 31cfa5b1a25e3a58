//! Validation errors for calendar exports.
//!
//! Every variant describes bad input. Formatting itself never fails once a
//! [`CalendarEvent`](crate::event::CalendarEvent) has been constructed, so none
//! of these errors is transient.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Which party of an event an identity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyRole {
    /// The hosting party.
    Organizer,
    /// The single invited party.
    Attendee,
}

impl PartyRole {
    /// Returns the lowercase name used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organizer => "organizer",
            Self::Attendee => "attendee",
        }
    }
}

impl std::fmt::Display for PartyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while building a calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The event does not end strictly after it starts.
    #[error("invalid time range: end {end} is not after start {start}")]
    InvalidTimeRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The event title is empty or only whitespace.
    #[error("event title must not be empty")]
    EmptyTitle,

    /// An identity has no email address to build a `mailto:` target from.
    #[error("{role} email must not be empty")]
    MissingEmail { role: PartyRole },
}

/// A specialized Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
