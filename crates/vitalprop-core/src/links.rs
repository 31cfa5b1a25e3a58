//! "Add to calendar" deep links for web calendar providers.
//!
//! This module builds pre-filled event creation URLs for:
//! - Google Calendar (`calendar.google.com/calendar/render`)
//! - Outlook on the web (`outlook.live.com/calendar/0/deeplink/compose`)
//!
//! Query values are `application/x-www-form-urlencoded`, so any text in the
//! event decodes back to exactly what was put in.
//!
//! Google takes the iCalendar basic UTC form joined by `/`, while Outlook wants
//! full ISO-8601 timestamps. Each provider only accepts its own format.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use vitalprop_core::event::{CalendarEvent, Party};
//! use vitalprop_core::links::google_calendar_url;
//!
//! let event = CalendarEvent::new(
//!     "Consult",
//!     Utc.with_ymd_and_hms(2025, 3, 10, 17, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2025, 3, 10, 17, 30, 0).unwrap(),
//!     Party::new("Vital Prop", "hello@vitalprop.com"),
//!     Party::new("A", "a@x.com"),
//! )
//! .unwrap();
//!
//! let url = google_calendar_url(&event);
//! assert!(url.contains("dates=20250310T170000Z%2F20250310T173000Z"));
//! ```

use url::form_urlencoded;

use crate::event::CalendarEvent;
use crate::time::{iso8601_utc, utc_basic_range};

/// Google Calendar event template endpoint.
pub const GOOGLE_CALENDAR_BASE: &str = "https://calendar.google.com/calendar/render";

/// Outlook on the web compose deep link endpoint.
pub const OUTLOOK_CALENDAR_BASE: &str = "https://outlook.live.com/calendar/0/deeplink/compose";

/// Builds a Google Calendar "create event" URL.
pub fn google_calendar_url(event: &CalendarEvent) -> String {
    let dates = utc_basic_range(&event.start(), &event.end());
    with_query(
        GOOGLE_CALENDAR_BASE,
        &[
            ("action", "TEMPLATE"),
            ("text", event.title()),
            ("details", event.description()),
            ("location", event.location()),
            ("dates", dates.as_str()),
            ("add", event.attendee().email.as_str()),
        ],
    )
}

/// Builds an Outlook on the web "create event" URL.
pub fn outlook_calendar_url(event: &CalendarEvent) -> String {
    let start = iso8601_utc(&event.start());
    let end = iso8601_utc(&event.end());
    with_query(
        OUTLOOK_CALENDAR_BASE,
        &[
            ("path", "/calendar/action/compose"),
            ("rru", "addevent"),
            ("subject", event.title()),
            ("body", event.description()),
            ("location", event.location()),
            ("startdt", start.as_str()),
            ("enddt", end.as_str()),
        ],
    )
}

fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{base}?{query}")
}
