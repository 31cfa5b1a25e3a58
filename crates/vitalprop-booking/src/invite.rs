//! Turning a booked appointment into a calendar invite.
//!
//! The booking form collects a date and a 12-hour slot in the business's local
//! time. [`consultation_event`] resolves them in the configured timezone and
//! builds the [`CalendarEvent`] handed to the exporters.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use tracing::{debug, warn};

use vitalprop_core::{CalendarEvent, Party};

use crate::appointment::AppointmentRequest;
use crate::error::{BookingError, BookingResult};

/// Default meeting length in minutes.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// Default location shown in invites.
pub const DEFAULT_LOCATION: &str = "Virtual Meeting (Link will be sent via email)";

/// Default organizer display name.
pub const DEFAULT_ORGANIZER_NAME: &str = "Vital Prop";

/// Default organizer address, also the `mailto:` target of `ORGANIZER`.
pub const DEFAULT_ORGANIZER_EMAIL: &str = "hello@vitalprop.com";

/// How consultation invites are built.
#[derive(Debug, Clone)]
pub struct InviteSettings {
    /// The hosting party.
    pub organizer: Party,
    /// Location written into every invite.
    pub location: String,
    /// Meeting length in minutes.
    pub duration_minutes: u32,
    /// Zone the booking form's date and slot are expressed in.
    pub timezone: Tz,
}

impl Default for InviteSettings {
    fn default() -> Self {
        Self {
            organizer: Party::new(DEFAULT_ORGANIZER_NAME, DEFAULT_ORGANIZER_EMAIL),
            location: DEFAULT_LOCATION.to_string(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            timezone: Tz::UTC,
        }
    }
}

impl InviteSettings {
    /// Builder method to set the organizer.
    pub fn with_organizer(mut self, organizer: Party) -> Self {
        self.organizer = organizer;
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Builder method to set the meeting length.
    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Builder method to set the timezone.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }
}

/// Builds the calendar invite for a consultation request.
///
/// The slot is resolved with [`resolve_local`].
pub fn consultation_event(
    request: &AppointmentRequest,
    settings: &InviteSettings,
) -> BookingResult<CalendarEvent> {
    request.validate()?;

    let naive = request.date()?.and_time(request.time()?);
    let start = resolve_local(naive, settings.timezone)?;
    let end = start.clone() + Duration::minutes(i64::from(settings.duration_minutes));

    let service = request.service.trim();
    let event = CalendarEvent::from_local(
        format!("Vital Prop Consultation - {service}"),
        start,
        end,
        settings.organizer.clone(),
        Party::new(request.name.trim(), request.email.trim()),
    )?
    .with_description(consultation_description(request))
    .with_location(settings.location.clone());

    debug!(
        title = event.title(),
        start = %event.start(),
        "built consultation invite"
    );
    Ok(event)
}

/// Places a wall-clock time in `timezone`.
///
/// Local times skipped by a DST transition are rejected. Repeated local times
/// resolve to the earlier instant.
pub fn resolve_local(naive: NaiveDateTime, timezone: Tz) -> BookingResult<DateTime<Tz>> {
    match timezone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => {
            warn!(
                local = %naive,
                timezone = %timezone,
                "ambiguous local time, using the earlier instant"
            );
            Ok(earliest)
        }
        LocalResult::None => Err(BookingError::invalid_request(format!(
            "{} does not exist in {} (daylight saving transition)",
            naive, timezone
        ))),
    }
}

/// The invite body: service, contact details and optional notes.
pub fn consultation_description(request: &AppointmentRequest) -> String {
    let mut description = format!(
        "Consultation with Vital Prop for {}.\n\nContact: {}\nEmail: {}\nPhone: {}",
        request.service.trim(),
        request.name.trim(),
        request.email.trim(),
        request.phone.trim()
    );
    if let Some(notes) = request.notes() {
        description.push_str("\n\nNotes: ");
        description.push_str(notes);
    }
    description
}

/// File name offered for the downloaded `.ics` file.
pub fn ics_filename(date: NaiveDate) -> String {
    format!("vital-prop-consultation-{}.ics", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use chrono_tz::America::New_York;
    use vitalprop_core::utc_basic;

    fn request() -> AppointmentRequest {
        AppointmentRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            company: None,
            service: "Lead Capture".to_string(),
            preferred_date: "2025-03-10".to_string(),
            preferred_time: "1:00 PM".to_string(),
            message: None,
        }
    }

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn builds_thirty_minute_invite_in_utc() {
        let event = consultation_event(&request(), &InviteSettings::default()).unwrap();
        assert_eq!(event.title(), "Vital Prop Consultation - Lead Capture");
        assert_eq!(event.start(), utc("2025-03-10T13:00:00Z"));
        assert_eq!(event.end(), utc("2025-03-10T13:30:00Z"));
        assert_eq!(event.location(), DEFAULT_LOCATION);
        assert_eq!(event.organizer().email, "hello@vitalprop.com");
        assert_eq!(event.attendee().name, "Jane Doe");
        assert_eq!(event.attendee().email, "jane@example.com");
    }

    #[test]
    fn description_lists_contact_details() {
        let event = consultation_event(&request(), &InviteSettings::default()).unwrap();
        assert_eq!(
            event.description(),
            "Consultation with Vital Prop for Lead Capture.\n\nContact: Jane Doe\nEmail: jane@example.com\nPhone: +1 555 0100"
        );
    }

    #[test]
    fn description_appends_notes() {
        let req = AppointmentRequest {
            message: Some("Interested in the voice caller".to_string()),
            ..request()
        };
        assert!(
            consultation_description(&req).ends_with("\n\nNotes: Interested in the voice caller")
        );
    }

    #[test]
    fn resolves_slot_in_configured_zone() {
        let settings = InviteSettings::default().with_timezone(New_York);
        // 2025-03-10 is EDT (UTC-4), the day after the spring-forward switch
        let event = consultation_event(&request(), &settings).unwrap();
        assert_eq!(utc_basic(&event.start()), "20250310T170000Z");
        assert_eq!(utc_basic(&event.end()), "20250310T173000Z");

        let winter = AppointmentRequest {
            preferred_date: "2025-03-07".to_string(),
            ..request()
        };
        let event = consultation_event(&winter, &settings).unwrap();
        assert_eq!(utc_basic(&event.start()), "20250307T180000Z");
    }

    #[test]
    fn custom_duration_and_organizer() {
        let settings = InviteSettings::default()
            .with_duration_minutes(60)
            .with_organizer(Party::new("Ops", "ops@vitalprop.com"))
            .with_location("");
        let event = consultation_event(&request(), &settings).unwrap();
        assert_eq!(event.duration(), Duration::minutes(60));
        assert_eq!(event.organizer().name, "Ops");
        assert!(!event.has_location());
    }

    #[test]
    fn zero_duration_is_rejected() {
        let settings = InviteSettings::default().with_duration_minutes(0);
        let err = consultation_event(&request(), &settings).unwrap_err();
        assert!(err.message().contains("invalid time range"));
    }

    fn local(date: &str, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn nonexistent_local_time_is_rejected() {
        // Clocks spring forward at 02:00 EST on 2025-03-09
        let err = resolve_local(local("2025-03-09", 2, 30), New_York).unwrap_err();
        assert!(err.message().contains("does not exist"));
    }

    #[test]
    fn ambiguous_local_time_uses_earlier_instant() {
        // Clocks fall back at 02:00 EDT on 2025-11-02, so 1:30 AM happens twice
        let start = resolve_local(local("2025-11-02", 1, 30), New_York).unwrap();
        assert_eq!(start.with_timezone(&Utc), utc("2025-11-02T05:30:00Z"));
    }

    #[test]
    fn slot_on_a_transition_day_resolves_after_the_switch() {
        let req = AppointmentRequest {
            preferred_date: "2025-11-02".to_string(),
            preferred_time: "9:00 AM".to_string(),
            ..request()
        };
        let settings = InviteSettings::default().with_timezone(New_York);
        let event = consultation_event(&req, &settings).unwrap();
        assert_eq!(event.start(), utc("2025-11-02T14:00:00Z"));
    }

    #[test]
    fn off_list_slot_is_rejected_before_building() {
        let req = AppointmentRequest {
            preferred_time: "2:30 AM".to_string(),
            ..request()
        };
        let err = consultation_event(&req, &InviteSettings::default()).unwrap_err();
        assert!(err.message().contains("not an available time slot"));
    }

    #[test]
    fn filename_uses_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(ics_filename(date), "vital-prop-consultation-2025-03-10.ics");
    }
}
