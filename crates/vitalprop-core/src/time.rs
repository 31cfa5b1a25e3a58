//! Timestamp formats used by calendar exports.
//!
//! Two representations are needed:
//! - the iCalendar "basic" UTC form `YYYYMMDDTHHMMSSZ`, used in ICS payloads and
//!   in the Google Calendar `dates` parameter
//! - full ISO-8601 with punctuation and millisecond precision, used by the
//!   Outlook compose deep link
//!
//! Both always render the instant in UTC, whatever zone the caller built it in.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

/// chrono format string for the iCalendar basic UTC form.
const UTC_BASIC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Formats an instant as `YYYYMMDDTHHMMSSZ`.
///
/// Sub-second precision is dropped.
pub fn utc_basic<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    dt.with_timezone(&Utc).format(UTC_BASIC_FORMAT).to_string()
}

/// Formats an instant as ISO-8601 UTC with milliseconds, e.g.
/// `2025-03-10T17:00:00.000Z`.
pub fn iso8601_utc<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    dt.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Formats a start/end pair as `<start>/<end>` in the basic UTC form.
pub fn utc_basic_range<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> String {
    format!("{}/{}", utc_basic(start), utc_basic(end))
}
