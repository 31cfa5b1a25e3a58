//! Client error types.

use std::fmt;

use vitalprop_booking::BookingError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// Booking failed before or while reaching the store.
    Booking(BookingError),
    /// The booking was not accepted; the message is meant for the user.
    Rejected(String),
    /// The event file could not be parsed.
    Parse(String),
    /// IO error.
    Io(std::io::Error),
    /// Action failed (open, write).
    Action(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Booking(err) => write!(f, "booking failed: {}", err),
            Self::Rejected(msg) => f.write_str(msg),
            Self::Parse(msg) => write!(f, "parse error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Action(msg) => write!(f, "action failed: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Booking(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<BookingError> for ClientError {
    fn from(err: BookingError) -> Self {
        Self::Booking(err)
    }
}
