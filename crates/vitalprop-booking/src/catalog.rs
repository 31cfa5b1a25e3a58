//! Bookable services and consultation time slots.

use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;

use crate::error::{BookingError, BookingResult};

/// Services a consultation can be booked for.
pub const SERVICES: &[&str] = &[
    "CRM Integration",
    "Lead Capture",
    "AI Voice Caller",
    "Appointment Setter",
    "Full Automation Suite",
    "Consultation Only",
];

/// Start times offered by the booking form.
pub const TIME_SLOTS: &[&str] = &[
    "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM", "2:00 PM", "3:00 PM", "4:00 PM",
    "5:00 PM",
];

/// 12-hour clock time, e.g. `9:00 AM`, `12:30pm`, `5 PM`.
static SLOT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2})(?::(\d{2}))?\s*([AaPp][Mm])\s*$").expect("Invalid time slot regex")
});

/// Returns true if `service` is one of [`SERVICES`] (case-insensitive).
pub fn is_known_service(service: &str) -> bool {
    SERVICES
        .iter()
        .any(|s| s.eq_ignore_ascii_case(service.trim()))
}

/// Returns true if `time` is the start of one of [`TIME_SLOTS`].
pub fn is_offered_slot(time: NaiveTime) -> bool {
    TIME_SLOTS
        .iter()
        .filter_map(|slot| parse_time_slot(slot).ok())
        .any(|offered| offered == time)
}

/// Parses a 12-hour time slot into a wall-clock time.
///
/// `12 AM` is midnight and `12 PM` is noon. Minutes are optional.
pub fn parse_time_slot(slot: &str) -> BookingResult<NaiveTime> {
    let caps = SLOT_REGEX
        .captures(slot)
        .ok_or_else(|| BookingError::invalid_request(format!("invalid time slot `{slot}`")))?;

    let hours: u32 = caps[1]
        .parse()
        .map_err(|_| BookingError::invalid_request(format!("invalid hour in `{slot}`")))?;
    let minutes: u32 = match caps.get(2) {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|_| BookingError::invalid_request(format!("invalid minutes in `{slot}`")))?,
        None => 0,
    };

    if !(1..=12).contains(&hours) {
        return Err(BookingError::invalid_request(format!(
            "hour out of range in `{slot}`"
        )));
    }

    let is_pm = caps[3].eq_ignore_ascii_case("pm");
    let hour24 = match (hours, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };

    NaiveTime::from_hms_opt(hour24, minutes, 0).ok_or_else(|| {
        BookingError::invalid_request(format!("minutes out of range in `{slot}`"))
    })
}
