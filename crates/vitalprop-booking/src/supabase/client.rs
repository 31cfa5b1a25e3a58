//! PostgREST client writing appointments to Supabase.

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::appointment::{Appointment, NewAppointment};
use crate::error::{BookingError, BookingResult};
use crate::store::{AppointmentStore, BoxFuture};

use super::config::SupabaseConfig;

const STORE_NAME: &str = "supabase";

/// Appointment store backed by a Supabase table.
///
/// Holds one HTTP client for its whole lifetime; construct it once and share
/// it.
#[derive(Debug)]
pub struct SupabaseStore {
    http_client: reqwest::Client,
    config: SupabaseConfig,
    endpoint: String,
}

impl SupabaseStore {
    /// Creates a store from a validated configuration.
    pub fn new(config: SupabaseConfig) -> BookingResult<Self> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                BookingError::internal("failed to create HTTP client")
                    .with_store(STORE_NAME)
                    .with_source(e)
            })?;

        let endpoint = config.table_endpoint();
        debug!(endpoint = %endpoint, "created Supabase store");

        Ok(Self {
            http_client,
            config,
            endpoint,
        })
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    async fn insert(&self, appointment: NewAppointment) -> BookingResult<Appointment> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Prefer", "return=representation")
            .json(&[appointment])
            .send()
            .await
            .map_err(|e| {
                let err = if e.is_timeout() {
                    BookingError::network("request timeout")
                } else if e.is_connect() {
                    BookingError::network(format!("connection failed: {}", e))
                } else {
                    BookingError::network(format!("request failed: {}", e))
                };
                err.with_store(STORE_NAME)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "Supabase rejected appointment insert");
            return Err(classify_status(status, &body).with_store(STORE_NAME));
        }

        let body = response.text().await.map_err(|e| {
            BookingError::network(format!("failed to read response: {}", e)).with_store(STORE_NAME)
        })?;

        parse_inserted(&body).map_err(|e| e.with_store(STORE_NAME))
    }
}

impl AppointmentStore for SupabaseStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    fn create(&self, appointment: NewAppointment) -> BoxFuture<'_, BookingResult<Appointment>> {
        Box::pin(self.insert(appointment))
    }
}

/// Maps a non-success HTTP status to a booking error.
fn classify_status(status: StatusCode, body: &str) -> BookingError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            BookingError::unauthorized(format!("API key rejected ({})", status))
        }
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            BookingError::invalid_request(format!("insert rejected ({}): {}", status, body))
        }
        StatusCode::NOT_FOUND => {
            BookingError::configuration(format!("table not found ({}): {}", status, body))
        }
        s if s.is_server_error() => {
            BookingError::server(format!("API error ({}): {}", status, body))
        }
        _ => BookingError::invalid_response(format!("unexpected status ({}): {}", status, body)),
    }
}

/// Parses the representation returned by an insert: an array holding the new
/// row.
fn parse_inserted(body: &str) -> BookingResult<Appointment> {
    let mut rows: Vec<Appointment> = serde_json::from_str(body).map_err(|e| {
        BookingError::invalid_response(format!("failed to parse response: {}", e))
    })?;

    if rows.len() > 1 {
        warn!(rows = rows.len(), "insert returned more than one row");
    }

    if rows.is_empty() {
        return Err(BookingError::invalid_response("insert returned no rows"));
    }
    Ok(rows.swap_remove(0))
}
