//! AppointmentStore trait definition.
//!
//! This module defines the [`AppointmentStore`] trait, the seam between the
//! booking flow and wherever appointments are persisted (Supabase in
//! production, [`MemoryStore`] in tests and dry runs).
//!
//! A store instance is built once at startup and shared; callers receive it
//! through [`crate::service::BookingService`] rather than looking it up from a
//! global.

use std::future::Future;
use std::pin::Pin;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::appointment::{Appointment, NewAppointment};
use crate::error::BookingResult;

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so a store can be shared as
/// `Arc<dyn AppointmentStore>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Persists appointment requests.
///
/// Stores do not detect double bookings and do not retry failed writes.
pub trait AppointmentStore: Send + Sync {
    /// Returns the name of this store (e.g., "supabase", "memory").
    fn name(&self) -> &str;

    /// Inserts a new appointment and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns `BookingError` on network errors, rejected credentials or an
    /// unexpected response.
    fn create(&self, appointment: NewAppointment) -> BoxFuture<'_, BookingResult<Appointment>>;
}

/// An in-process store keeping appointments in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Appointment>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the stored appointments.
    pub async fn appointments(&self) -> Vec<Appointment> {
        self.rows.lock().await.clone()
    }
}

impl AppointmentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn create(&self, appointment: NewAppointment) -> BoxFuture<'_, BookingResult<Appointment>> {
        Box::pin(async move {
            let id = uuid::Uuid::new_v4().to_string();
            let row = Appointment::from_new(id, appointment, Utc::now());
            debug!(id = %row.id, "stored appointment in memory");
            self.rows.lock().await.push(row.clone());
            Ok(row)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointment::{AppointmentRequest, AppointmentStatus};

    fn new_appointment(name: &str) -> NewAppointment {
        NewAppointment::from(&AppointmentRequest {
            name: name.to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            service: "Lead Capture".to_string(),
            preferred_date: "2025-03-10".to_string(),
            preferred_time: "1:00 PM".to_string(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn memory_store_assigns_ids_and_timestamps() {
        let store = MemoryStore::new();
        assert_eq!(store.name(), "memory");

        let row = store.create(new_appointment("Jane")).await.unwrap();
        assert!(!row.id.is_empty());
        assert_eq!(row.status, AppointmentStatus::Pending);
        assert!(row.created_at.is_some());
        assert_eq!(row.created_at, row.updated_at);
    }

    #[tokio::test]
    async fn memory_store_keeps_duplicates() {
        let store = MemoryStore::new();
        let first = store.create(new_appointment("Jane")).await.unwrap();
        let second = store.create(new_appointment("Jane")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.appointments().await.len(), 2);
    }

    #[tokio::test]
    async fn usable_as_trait_object() {
        let store: std::sync::Arc<dyn AppointmentStore> = std::sync::Arc::new(MemoryStore::new());
        let row = store.create(new_appointment("Sam")).await.unwrap();
        assert_eq!(row.name, "Sam");
    }
}
