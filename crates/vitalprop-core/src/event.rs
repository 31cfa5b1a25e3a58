//! Event types for calendar exports.
//!
//! - [`Party`]: a named email identity (organizer or attendee)
//! - [`CalendarEvent`]: the validated, immutable event handed to the exporters

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult, PartyRole};

/// A named email identity taking part in an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Display name, used as the iCalendar `CN` parameter.
    pub name: String,
    /// Email address, used as the `mailto:` target.
    pub email: String,
}

impl Party {
    /// Creates a new party.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    fn has_email(&self) -> bool {
        !self.email.trim().is_empty()
    }
}

/// A single appointment ready to be exported.
///
/// Construction validates the event; once built it cannot be mutated into an
/// invalid state. Start and end are stored in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCalendarEvent")]
pub struct CalendarEvent {
    title: String,
    description: String,
    location: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    organizer: Party,
    attendee: Party,
}

impl CalendarEvent {
    /// Creates a new event with an empty description and no location.
    ///
    /// # Errors
    ///
    /// - [`ExportError::InvalidTimeRange`] if `end <= start`
    /// - [`ExportError::EmptyTitle`] if the title is blank
    /// - [`ExportError::MissingEmail`] if either party has no email
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        organizer: Party,
        attendee: Party,
    ) -> ExportResult<Self> {
        let title = title.into();

        if end <= start {
            return Err(ExportError::InvalidTimeRange { start, end });
        }
        if title.trim().is_empty() {
            return Err(ExportError::EmptyTitle);
        }
        if !organizer.has_email() {
            return Err(ExportError::MissingEmail {
                role: PartyRole::Organizer,
            });
        }
        if !attendee.has_email() {
            return Err(ExportError::MissingEmail {
                role: PartyRole::Attendee,
            });
        }

        Ok(Self {
            title,
            description: String::new(),
            location: String::new(),
            start,
            end,
            organizer,
            attendee,
        })
    }

    /// Creates a new event from instants in any timezone.
    ///
    /// See [`CalendarEvent::new`] for the validation rules.
    pub fn from_local<Tz: TimeZone>(
        title: impl Into<String>,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
        organizer: Party,
        attendee: Party,
    ) -> ExportResult<Self> {
        Self::new(
            title,
            start.with_timezone(&Utc),
            end.with_timezone(&Utc),
            organizer,
            attendee,
        )
    }

    /// Builder method to set the free-text description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method to set the location. An empty string means no location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns true if a location was given.
    pub fn has_location(&self) -> bool {
        !self.location.is_empty()
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns the length of the event. Always positive.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn organizer(&self) -> &Party {
        &self.organizer
    }

    pub fn attendee(&self) -> &Party {
        &self.attendee
    }
}

/// Unvalidated wire shape of [`CalendarEvent`].
#[derive(Debug, Deserialize)]
struct RawCalendarEvent {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    location: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    organizer: Party,
    attendee: Party,
}

impl TryFrom<RawCalendarEvent> for CalendarEvent {
    type Error = ExportError;

    fn try_from(raw: RawCalendarEvent) -> Result<Self, Self::Error> {
        Ok(
            CalendarEvent::new(raw.title, raw.start, raw.end, raw.organizer, raw.attendee)?
                .with_description(raw.description)
                .with_location(raw.location),
        )
    }
}
