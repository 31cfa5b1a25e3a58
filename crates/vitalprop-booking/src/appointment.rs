//! Appointment request and record types.
//!
//! - [`AppointmentRequest`]: what the booking form submits
//! - [`NewAppointment`]: the row inserted into the `appointments` table
//! - [`Appointment`]: the row as stored, with id and timestamps

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{is_known_service, is_offered_slot, parse_time_slot};
use crate::error::{BookingError, BookingResult};

/// Date format of `preferred_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lifecycle state of a stored appointment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Submitted, not yet confirmed by the team.
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

/// A consultation request as submitted by the booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub company: Option<String>,
    pub service: String,
    /// `YYYY-MM-DD`.
    pub preferred_date: String,
    /// 12-hour slot, e.g. `2:00 PM`.
    pub preferred_time: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl AppointmentRequest {
    /// Checks that all required fields are present and well formed, and that
    /// the service and time slot are ones the booking form offers.
    pub fn validate(&self) -> BookingResult<()> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("service", &self.service),
            ("preferred_date", &self.preferred_date),
            ("preferred_time", &self.preferred_time),
        ] {
            if value.trim().is_empty() {
                return Err(BookingError::invalid_request(format!("{field} is required")));
            }
        }

        if !self.email.contains('@') {
            return Err(BookingError::invalid_request(format!(
                "invalid email address `{}`",
                self.email
            )));
        }

        if !is_known_service(&self.service) {
            return Err(BookingError::invalid_request(format!(
                "unknown service `{}`",
                self.service.trim()
            )));
        }

        self.date()?;
        if !is_offered_slot(self.time()?) {
            return Err(BookingError::invalid_request(format!(
                "`{}` is not an available time slot",
                self.preferred_time.trim()
            )));
        }
        Ok(())
    }

    /// Parses `preferred_date`.
    pub fn date(&self) -> BookingResult<NaiveDate> {
        NaiveDate::parse_from_str(self.preferred_date.trim(), DATE_FORMAT).map_err(|e| {
            BookingError::invalid_request(format!(
                "invalid date `{}` (expected YYYY-MM-DD)",
                self.preferred_date
            ))
            .with_source(e)
        })
    }

    /// Parses `preferred_time`.
    pub fn time(&self) -> BookingResult<NaiveTime> {
        parse_time_slot(&self.preferred_time)
    }

    /// Returns the trimmed message, if one was given.
    pub fn notes(&self) -> Option<&str> {
        non_blank(self.message.as_deref())
    }
}

/// The row written to the `appointments` table.
///
/// Blank optional fields are stored as `null`; new rows are always pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAppointment {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub service: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub message: Option<String>,
    pub status: AppointmentStatus,
}

impl From<&AppointmentRequest> for NewAppointment {
    fn from(request: &AppointmentRequest) -> Self {
        Self {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request.phone.trim().to_string(),
            company: non_blank(request.company.as_deref()).map(str::to_string),
            service: request.service.trim().to_string(),
            preferred_date: request.preferred_date.trim().to_string(),
            preferred_time: request.preferred_time.trim().to_string(),
            message: non_blank(request.message.as_deref()).map(str::to_string),
            status: AppointmentStatus::Pending,
        }
    }
}

/// A stored appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub service: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub message: Option<String>,
    #[serde(default)]
    pub status: AppointmentStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Appointment {
    /// Builds the stored form of a new appointment.
    pub fn from_new(id: impl Into<String>, new: NewAppointment, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            company: new.company,
            service: new.service,
            preferred_date: new.preferred_date,
            preferred_time: new.preferred_time,
            message: new.message,
            status: new.status,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
