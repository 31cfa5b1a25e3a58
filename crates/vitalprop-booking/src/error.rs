//! Error types for booking operations.
//!
//! This module defines the errors that can occur while validating an
//! appointment request, turning it into a calendar invite, or writing it to an
//! appointment store (Supabase, in-memory).

use std::fmt;
use thiserror::Error;

use vitalprop_core::ExportError;

/// The category of a booking error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingErrorCode {
    /// The appointment request is incomplete or malformed.
    InvalidRequest,
    /// Network error - connection failed, timeout, DNS resolution, etc.
    NetworkError,
    /// The store rejected our credentials (401/403).
    Unauthorized,
    /// Server returned an error (5xx status codes).
    ServerError,
    /// Invalid response from the store - parse error, unexpected format.
    InvalidResponse,
    /// Configuration error - missing or invalid store settings.
    ConfigurationError,
    /// Internal error - unexpected state, bug.
    InternalError,
}

impl BookingErrorCode {
    /// Returns true if this error is transient.
    ///
    /// Bookings are never retried automatically; this only classifies the
    /// failure for logs and callers.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError | Self::ServerError)
    }

    /// Returns a machine-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::NetworkError => "network_error",
            Self::Unauthorized => "unauthorized",
            Self::ServerError => "server_error",
            Self::InvalidResponse => "invalid_response",
            Self::ConfigurationError => "configuration_error",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for BookingErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while booking an appointment.
#[derive(Debug, Error)]
pub struct BookingError {
    code: BookingErrorCode,
    message: String,
    /// The store that generated this error (e.g., "supabase", "memory").
    store: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl BookingError {
    /// Creates a new booking error with the given code and message.
    pub fn new(code: BookingErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            store: None,
            source: None,
        }
    }

    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(BookingErrorCode::InvalidRequest, message)
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(BookingErrorCode::NetworkError, message)
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(BookingErrorCode::Unauthorized, message)
    }

    /// Creates a server error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(BookingErrorCode::ServerError, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(BookingErrorCode::InvalidResponse, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(BookingErrorCode::ConfigurationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(BookingErrorCode::InternalError, message)
    }

    /// Sets the store name for this error.
    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn code(&self) -> BookingErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn store(&self) -> Option<&str> {
        self.store.as_deref()
    }

    /// Returns true if this error is transient.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for BookingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref store) = self.store {
            write!(f, "[{}] ", store)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl From<ExportError> for BookingError {
    fn from(err: ExportError) -> Self {
        Self::invalid_request(err.to_string()).with_source(err)
    }
}

/// A specialized Result type for booking operations.
pub type BookingResult<T> = Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_retryable() {
        assert!(BookingErrorCode::NetworkError.is_retryable());
        assert!(BookingErrorCode::ServerError.is_retryable());
        assert!(!BookingErrorCode::InvalidRequest.is_retryable());
        assert!(!BookingErrorCode::Unauthorized.is_retryable());
    }

    #[test]
    fn booking_error_with_store() {
        let err = BookingError::network("connection reset").with_store("supabase");
        assert_eq!(err.code(), BookingErrorCode::NetworkError);
        assert_eq!(err.store(), Some("supabase"));
        assert_eq!(err.to_string(), "[supabase] network_error: connection reset");
    }

    #[test]
    fn export_error_converts_to_invalid_request() {
        use std::error::Error;

        let err: BookingError = ExportError::EmptyTitle.into();
        assert_eq!(err.code(), BookingErrorCode::InvalidRequest);
        assert_eq!(err.message(), "event title must not be empty");
        assert!(err.source().is_some());
    }
}
