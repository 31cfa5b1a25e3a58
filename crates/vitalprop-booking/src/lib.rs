//! Appointment booking for Vital Prop consultations.
//!
//! This crate connects the booking form to the calendar exporters:
//!
//! - [`AppointmentRequest`] - What the booking form submits
//! - [`consultation_event`] - Builds the calendar invite for a request
//! - [`AppointmentStore`] - Where appointments are persisted
//! - [`BookingService`] - Validates, stores and reports the outcome
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │  AppointmentRequest  │
//! └──────────┬───────────┘
//!            │
//!     ┌──────┴──────────────────┐
//!     ▼                         ▼
//! ┌─────────────────┐   ┌──────────────────────┐
//! │ BookingService  │   │ consultation_event() │
//! └────────┬────────┘   └──────────┬───────────┘
//!          │                       │
//!          ▼ AppointmentStore      ▼
//! ┌─────────────────┐   ┌──────────────────────┐
//! │ Supabase/Memory │   │    CalendarEvent     │──▶ ICS / Google / Outlook
//! └─────────────────┘   └──────────────────────┘
//! ```

pub mod appointment;
pub mod catalog;
pub mod error;
pub mod invite;
pub mod service;
pub mod store;
#[cfg(feature = "supabase")]
pub mod supabase;

// Re-export main types at crate root
pub use appointment::{Appointment, AppointmentRequest, AppointmentStatus, NewAppointment};
pub use catalog::{SERVICES, TIME_SLOTS, is_known_service, is_offered_slot, parse_time_slot};
pub use error::{BookingError, BookingErrorCode, BookingResult};
pub use invite::{
    InviteSettings, consultation_description, consultation_event, ics_filename, resolve_local,
};
pub use service::{BookingResponse, BookingService};
pub use store::{AppointmentStore, BoxFuture, MemoryStore};
