//! A single entry point over the three calendar export formats.
//!
//! [`ExportFormatter`] holds no mutable state and is `Send + Sync`, so one
//! instance can be shared across any number of callers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::event::CalendarEvent;
use crate::ics::{ICS_MIME_TYPE, IcsOptions, IcsWriter};
use crate::links::{google_calendar_url, outlook_calendar_url};

/// Where an exported event is headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarTarget {
    /// A downloadable `.ics` file.
    Ics,
    /// A Google Calendar deep link.
    Google,
    /// An Outlook on the web deep link.
    Outlook,
}

impl CalendarTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ics => "ics",
            Self::Google => "google",
            Self::Outlook => "outlook",
        }
    }
}

impl fmt::Display for CalendarTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ics" | "ical" | "icalendar" => Ok(Self::Ics),
            "google" | "gcal" => Ok(Self::Google),
            "outlook" => Ok(Self::Outlook),
            other => Err(format!(
                "unknown calendar target `{other}` (expected ics, google or outlook)"
            )),
        }
    }
}

/// The result of exporting an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Export {
    /// An iCalendar document.
    Ics(String),
    /// A deep link to open in a browser.
    Link(String),
}

impl Export {
    /// Returns the payload or URL text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ics(payload) => payload,
            Self::Link(url) => url,
        }
    }

    /// Returns the MIME type of an ICS export, `None` for links.
    pub fn mime_type(&self) -> Option<&'static str> {
        match self {
            Self::Ics(_) => Some(ICS_MIME_TYPE),
            Self::Link(_) => None,
        }
    }
}

/// Produces ICS payloads and provider deep links from a [`CalendarEvent`].
#[derive(Debug, Clone, Default)]
pub struct ExportFormatter {
    ics: IcsWriter,
}

impl ExportFormatter {
    /// Creates a formatter using the given ICS options.
    pub fn new(options: IcsOptions) -> Self {
        Self {
            ics: IcsWriter::new(options),
        }
    }

    /// Returns the underlying ICS writer.
    pub fn ics_writer(&self) -> &IcsWriter {
        &self.ics
    }

    /// Renders the event as an iCalendar document.
    pub fn ics_payload(&self, event: &CalendarEvent) -> String {
        self.ics.render(event)
    }

    /// Builds a Google Calendar deep link.
    pub fn google_link(&self, event: &CalendarEvent) -> String {
        google_calendar_url(event)
    }

    /// Builds an Outlook on the web deep link.
    pub fn outlook_link(&self, event: &CalendarEvent) -> String {
        outlook_calendar_url(event)
    }

    /// Exports the event for the given target.
    pub fn export(&self, event: &CalendarEvent, target: CalendarTarget) -> Export {
        debug!(%target, title = event.title(), "exporting event");
        match target {
            CalendarTarget::Ics => Export::Ics(self.ics_payload(event)),
            CalendarTarget::Google => Export::Link(self.google_link(event)),
            CalendarTarget::Outlook => Export::Link(self.outlook_link(event)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Party;
    use chrono::{TimeZone, Utc};

    fn consult() -> CalendarEvent {
        CalendarEvent::new(
            "Consult",
            Utc.with_ymd_and_hms(2025, 3, 10, 17, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 10, 17, 30, 0).unwrap(),
            Party::new("Vital Prop", "hello@vitalprop.com"),
            Party::new("A", "a@x.com"),
        )
        .unwrap()
    }

    #[test]
    fn target_parsing() {
        assert_eq!("ics".parse::<CalendarTarget>().unwrap(), CalendarTarget::Ics);
        assert_eq!("Google".parse::<CalendarTarget>().unwrap(), CalendarTarget::Google);
        assert_eq!("outlook".parse::<CalendarTarget>().unwrap(), CalendarTarget::Outlook);
        assert!("yahoo".parse::<CalendarTarget>().is_err());
    }

    #[test]
    fn target_display_round_trips() {
        for target in [CalendarTarget::Ics, CalendarTarget::Google, CalendarTarget::Outlook] {
            assert_eq!(target.to_string().parse::<CalendarTarget>().unwrap(), target);
        }
    }

    #[test]
    fn export_dispatches_by_target() {
        let formatter = ExportFormatter::default();
        let event = consult();

        let ics = formatter.export(&event, CalendarTarget::Ics);
        assert!(matches!(ics, Export::Ics(_)));
        assert_eq!(ics.mime_type(), Some("text/calendar;charset=utf-8"));
        assert!(ics.as_str().starts_with("BEGIN:VCALENDAR"));

        let google = formatter.export(&event, CalendarTarget::Google);
        assert_eq!(google, Export::Link(google_calendar_url(&event)));
        assert_eq!(google.mime_type(), None);

        let outlook = formatter.export(&event, CalendarTarget::Outlook);
        assert_eq!(outlook.as_str(), outlook_calendar_url(&event));
    }

    #[test]
    fn formatter_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExportFormatter>();

        let formatter = std::sync::Arc::new(ExportFormatter::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let formatter = std::sync::Arc::clone(&formatter);
                std::thread::spawn(move || formatter.google_link(&consult()))
            })
            .collect();
        let links: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(links.windows(2).all(|w| w[0] == w[1]));
    }
}
