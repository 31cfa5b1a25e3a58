//! Appointment submission.
//!
//! [`BookingService::submit`] validates a request, writes it to the injected
//! store and reports the outcome with the messages shown on the booking page.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use crate::appointment::{Appointment, AppointmentRequest, NewAppointment};
use crate::error::BookingErrorCode;
use crate::store::AppointmentStore;

/// Shown after a successful booking.
pub const BOOKED_MESSAGE: &str = "Appointment booked successfully!";

/// Shown when the store rejects or fails the insert.
pub const STORE_FAILED_MESSAGE: &str = "Failed to create appointment. Please try again.";

/// Shown for failures that are neither validation nor store errors.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Outcome of an appointment submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BookingResponse {
    /// The appointment was stored.
    Booked {
        appointment: Appointment,
        message: String,
    },
    /// The appointment was not stored; `error` is safe to show to the user.
    Failed { error: String },
}

impl BookingResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Booked { .. })
    }

    /// Returns the stored appointment on success.
    pub fn appointment(&self) -> Option<&Appointment> {
        match self {
            Self::Booked { appointment, .. } => Some(appointment),
            Self::Failed { .. } => None,
        }
    }

    /// Returns the user-facing message.
    pub fn message(&self) -> &str {
        match self {
            Self::Booked { message, .. } => message,
            Self::Failed { error } => error,
        }
    }
}

/// Books appointments against a shared store.
#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn AppointmentStore>,
}

impl BookingService {
    /// Creates a service around an already constructed store.
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    /// Returns the store name.
    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// Validates and stores an appointment request.
    pub async fn submit(&self, request: &AppointmentRequest) -> BookingResponse {
        if let Err(e) = request.validate() {
            info!(error = %e, "appointment request rejected");
            return BookingResponse::Failed {
                error: e.message().to_string(),
            };
        }

        match self.store.create(NewAppointment::from(request)).await {
            Ok(appointment) => {
                info!(
                    id = %appointment.id,
                    store = self.store.name(),
                    service = %appointment.service,
                    "appointment booked"
                );
                BookingResponse::Booked {
                    appointment,
                    message: BOOKED_MESSAGE.to_string(),
                }
            }
            Err(e) => {
                error!(error = %e, store = self.store.name(), "failed to store appointment");
                let message = match e.code() {
                    BookingErrorCode::InternalError => UNEXPECTED_MESSAGE,
                    _ => STORE_FAILED_MESSAGE,
                };
                BookingResponse::Failed {
                    error: message.to_string(),
                }
            }
        }
    }
}

impl std::fmt::Debug for BookingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingService")
            .field("store", &self.store.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BookingError, BookingResult};
    use crate::store::{BoxFuture, MemoryStore};

    /// A store that always fails with the given code.
    struct FailingStore(BookingErrorCode);

    impl AppointmentStore for FailingStore {
        fn name(&self) -> &str {
            "failing"
        }

        fn create(
            &self,
            _appointment: NewAppointment,
        ) -> BoxFuture<'_, BookingResult<Appointment>> {
            let err = BookingError::new(self.0, "boom").with_store("failing");
            Box::pin(async move { Err(err) })
        }
    }

    fn request() -> AppointmentRequest {
        AppointmentRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            company: Some("Acme".to_string()),
            service: "AI Voice Caller".to_string(),
            preferred_date: "2025-03-10".to_string(),
            preferred_time: "10:00 AM".to_string(),
            message: Some("".to_string()),
        }
    }

    #[tokio::test]
    async fn books_into_store() {
        let store = Arc::new(MemoryStore::new());
        let service = BookingService::new(store.clone());

        let response = service.submit(&request()).await;
        assert!(response.is_success());
        assert_eq!(response.message(), BOOKED_MESSAGE);

        let stored = store.appointments().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].company.as_deref(), Some("Acme"));
        assert_eq!(stored[0].message, None);
        assert_eq!(response.appointment().unwrap().id, stored[0].id);
    }

    #[tokio::test]
    async fn validation_failure_skips_store() {
        let store = Arc::new(MemoryStore::new());
        let service = BookingService::new(store.clone());

        let req = AppointmentRequest {
            email: String::new(),
            ..request()
        };
        let response = service.submit(&req).await;
        assert!(!response.is_success());
        assert_eq!(response.message(), "email is required");
        assert!(store.appointments().await.is_empty());
    }

    #[tokio::test]
    async fn off_catalog_booking_is_not_stored() {
        let store = Arc::new(MemoryStore::new());
        let service = BookingService::new(store.clone());

        let odd_slot = AppointmentRequest {
            preferred_time: "3:17 AM".to_string(),
            ..request()
        };
        let response = service.submit(&odd_slot).await;
        assert_eq!(response.message(), "`3:17 AM` is not an available time slot");

        let odd_service = AppointmentRequest {
            service: "Web Design".to_string(),
            ..request()
        };
        let response = service.submit(&odd_service).await;
        assert_eq!(response.message(), "unknown service `Web Design`");

        assert!(store.appointments().await.is_empty());
    }

    #[tokio::test]
    async fn store_failure_maps_to_generic_message() {
        let service = BookingService::new(Arc::new(FailingStore(BookingErrorCode::ServerError)));
        let response = service.submit(&request()).await;
        assert_eq!(
            response,
            BookingResponse::Failed {
                error: STORE_FAILED_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn internal_failure_maps_to_unexpected_message() {
        let service = BookingService::new(Arc::new(FailingStore(BookingErrorCode::InternalError)));
        let response = service.submit(&request()).await;
        assert_eq!(response.message(), UNEXPECTED_MESSAGE);
    }

    #[tokio::test]
    async fn response_serializes_with_status_tag() {
        let service = BookingService::new(Arc::new(FailingStore(BookingErrorCode::NetworkError)));
        let response = service.submit(&request()).await;
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], STORE_FAILED_MESSAGE);
    }
}
