//! iCalendar (RFC 5545) payload generation.
//!
//! [`IcsWriter`] turns a [`CalendarEvent`] into a self-contained `VCALENDAR`
//! document holding exactly one `VEVENT` and its two reminder `VALARM`s.
//!
//! The document is built with the `icalendar` crate. A final pass over its
//! output sets `PRODID` and `METHOD`, drops the `DTSTAMP`/`UID` the crate
//! stamps on every alarm, and folds lines at 75 octets with CRLF endings.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use vitalprop_core::event::{CalendarEvent, Party};
//! use vitalprop_core::ics::IcsWriter;
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
//! let payload = IcsWriter::default().render(&event);
//! assert!(payload.contains("DTSTART:20250310T170000Z\r\n"));
//! ```

use chrono::{DateTime, Duration, Utc};
use icalendar::parser::unfold;
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger};
use rand::Rng;
use rand::distr::Alphanumeric;
use tracing::debug;

use crate::event::{CalendarEvent, Party};
use crate::time::utc_basic;

/// MIME type to serve or save an ICS payload with.
pub const ICS_MIME_TYPE: &str = "text/calendar;charset=utf-8";

/// Product identifier written to `PRODID`.
pub const DEFAULT_PRODUCT_ID: &str = "-//Vital Prop//Booking System//EN";

/// Domain suffix of generated `UID`s.
pub const DEFAULT_UID_DOMAIN: &str = "vitalprop.com";

const CRLF: &str = "\r\n";

/// Maximum content line length in octets, excluding the line break.
const MAX_LINE_OCTETS: usize = 75;

/// Length of the random part of a generated `UID`.
const UID_TOKEN_LEN: usize = 8;

/// How text values (`SUMMARY`, `DESCRIPTION`, `LOCATION`) are escaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextEscaping {
    /// Full RFC 5545 TEXT escaping: backslash, semicolon, comma and newlines.
    #[default]
    Strict,
    /// Only line breaks are escaped, as `\n`. Matches payloads produced by the
    /// earlier booking site.
    NewlinesOnly,
}

/// Text of the two display reminders every invite carries.
///
/// The offsets are fixed at 24 hours and 1 hour before the start; only the
/// wording can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMessages {
    /// Shown 24 hours before the start.
    pub day_before: String,
    /// Shown 1 hour before the start.
    pub hour_before: String,
}

impl Default for ReminderMessages {
    fn default() -> Self {
        Self {
            day_before: "Reminder: Consultation with Vital Prop tomorrow".to_string(),
            hour_before: "Reminder: Consultation with Vital Prop in 1 hour".to_string(),
        }
    }
}

impl ReminderMessages {
    /// Pairs each message with how long before the start it fires.
    pub fn schedule(&self) -> [(Duration, &str); 2] {
        [
            (Duration::hours(24), &self.day_before),
            (Duration::hours(1), &self.hour_before),
        ]
    }
}

/// Options controlling ICS generation.
#[derive(Debug, Clone)]
pub struct IcsOptions {
    /// Value of `PRODID`.
    pub product_id: String,
    /// Domain appended to generated `UID`s.
    pub uid_domain: String,
    /// Value of `METHOD`.
    pub method: String,
    /// Escaping applied to text values.
    pub escaping: TextEscaping,
    /// Whether to fold lines longer than 75 octets.
    pub fold_lines: bool,
    /// Wording of the reminders.
    pub reminders: ReminderMessages,
}

impl Default for IcsOptions {
    fn default() -> Self {
        Self {
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            method: "REQUEST".to_string(),
            escaping: TextEscaping::Strict,
            fold_lines: true,
            reminders: ReminderMessages::default(),
        }
    }
}

impl IcsOptions {
    /// Set the product identifier
    #[must_use]
    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = product_id.into();
        self
    }

    /// Set the UID domain
    #[must_use]
    pub fn with_uid_domain(mut self, domain: impl Into<String>) -> Self {
        self.uid_domain = domain.into();
        self
    }

    /// Set the text escaping mode
    #[must_use]
    pub fn with_escaping(mut self, escaping: TextEscaping) -> Self {
        self.escaping = escaping;
        self
    }

    /// Enable or disable line folding
    #[must_use]
    pub fn with_fold_lines(mut self, fold: bool) -> Self {
        self.fold_lines = fold;
        self
    }

    /// Set the reminder wording
    #[must_use]
    pub fn with_reminders(mut self, reminders: ReminderMessages) -> Self {
        self.reminders = reminders;
        self
    }
}

/// Renders calendar events as iCalendar documents.
#[derive(Debug, Clone, Default)]
pub struct IcsWriter {
    options: IcsOptions,
}

impl IcsWriter {
    /// Creates a writer with the given options.
    pub fn new(options: IcsOptions) -> Self {
        Self { options }
    }

    /// Returns the writer options.
    pub fn options(&self) -> &IcsOptions {
        &self.options
    }

    /// Renders an event, stamped with the current time and a fresh `UID`.
    pub fn render(&self, event: &CalendarEvent) -> String {
        let now = Utc::now();
        let uid = generate_uid(now, &self.options.uid_domain);
        self.render_at(event, now, &uid)
    }

    /// Renders an event with an explicit generation time and `UID`.
    pub fn render_at(&self, event: &CalendarEvent, now: DateTime<Utc>, uid: &str) -> String {
        let escaping = self.options.escaping;
        let text = |value: &str| escape_text(value, escaping);

        let mut cal = Calendar::new();

        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&strip_line_breaks(uid));
        ics_event.add_property("DTSTAMP", utc_basic(&now));
        ics_event.add_property("DTSTART", utc_basic(&event.start()));
        ics_event.add_property("DTEND", utc_basic(&event.end()));
        ics_event.summary(&text(event.title()));
        ics_event.description(&text(event.description()));
        ics_event.location(&text(event.location()));
        ics_event.append_property(party_property("ORGANIZER", event.organizer()));

        let mut attendee = party_property("ATTENDEE", event.attendee());
        attendee.add_parameter("RSVP", "TRUE");
        ics_event.append_multi_property(attendee);

        ics_event.add_property("STATUS", "CONFIRMED");
        ics_event.add_property("SEQUENCE", "0");

        for (before, message) in self.options.reminders.schedule() {
            let alarm = Alarm::display(&text(message), Trigger::before_start(before));
            ics_event.alarm(alarm);
        }

        let ics_event = ics_event.done();
        cal.push(ics_event);
        let cal = cal.done();

        let payload = self.finish(&cal.to_string());
        debug!(uid = %uid, octets = payload.len(), "rendered ICS payload");
        payload
    }

    /// Rewrites the serializer output into the final payload.
    ///
    /// `icalendar` writes its own `PRODID`, has no `METHOD`, stamps each
    /// `VALARM` with `DTSTAMP` and `UID`, and always folds. Its output is
    /// unfolded here and every line goes back out through [`ContentLines`].
    fn finish(&self, raw: &str) -> String {
        let mut out = ContentLines::new(self.options.fold_lines);
        let mut header_written = false;
        let mut in_alarm = false;

        for line in unfold(raw).lines() {
            if line.is_empty() || line.starts_with("METHOD:") {
                continue;
            }

            let crate_product_id = line.starts_with("PRODID:");
            if (crate_product_id || line == "BEGIN:VEVENT") && !header_written {
                out.line("PRODID", &self.options.product_id);
                out.line("METHOD", &self.options.method);
                header_written = true;
            }
            if crate_product_id {
                continue;
            }

            if line == "BEGIN:VALARM" {
                in_alarm = true;
            } else if line == "END:VALARM" {
                in_alarm = false;
            }

            if in_alarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
                continue;
            }

            out.raw(line);
        }

        out.finish()
    }
}

/// Generates a unique event identifier: `<utc-basic now>-<token>@<domain>`.
pub fn generate_uid(now: DateTime<Utc>, domain: &str) -> String {
    let token: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(UID_TOKEN_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{}-{}@{}", utc_basic(&now), token, domain)
}

/// Escapes a TEXT property value.
///
/// `\r\n`, `\r` and `\n` all become the two characters `\n` in both modes.
pub fn escape_text(value: &str, escaping: TextEscaping) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            '\\' if escaping == TextEscaping::Strict => out.push_str("\\\\"),
            ';' if escaping == TextEscaping::Strict => out.push_str("\\;"),
            ',' if escaping == TextEscaping::Strict => out.push_str("\\,"),
            _ => out.push(ch),
        }
    }

    out
}

/// Builds an `ORGANIZER`/`ATTENDEE` property with a `CN` parameter.
fn party_property(name: &str, party: &Party) -> Property {
    let email = strip_line_breaks(party.email.trim());
    let mut prop = Property::new(name, format!("mailto:{}", email));
    prop.add_parameter("CN", &common_name(&party.name));
    prop
}

/// Double quotes and control characters cannot appear in a parameter value.
fn common_name(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '"' && !c.is_control())
        .collect()
}

fn strip_line_breaks(value: &str) -> String {
    value.chars().filter(|c| *c != '\r' && *c != '\n').collect()
}

/// Accumulates CRLF-terminated content lines.
struct ContentLines {
    buf: String,
    fold: bool,
}

impl ContentLines {
    fn new(fold: bool) -> Self {
        Self {
            buf: String::with_capacity(1024),
            fold,
        }
    }

    fn line(&mut self, name: &str, value: &str) {
        self.raw(&format!("{name}:{value}"));
    }

    fn raw(&mut self, line: &str) {
        if self.fold {
            fold_into(&mut self.buf, line);
        } else {
            self.buf.push_str(line);
        }
        self.buf.push_str(CRLF);
    }

    fn finish(self) -> String {
        self.buf
    }
}

/// Appends `line` to `out`, inserting CRLF + space so that no physical line
/// exceeds [`MAX_LINE_OCTETS`], the leading space included. Never splits a
/// UTF-8 sequence.
fn fold_into(out: &mut String, line: &str) {
    let mut octets = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if octets + len > MAX_LINE_OCTETS {
            out.push_str(CRLF);
            out.push(' ');
            octets = 1;
        }
        out.push(ch);
        octets += len;
    }
}
