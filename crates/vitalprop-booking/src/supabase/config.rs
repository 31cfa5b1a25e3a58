//! Supabase store configuration.

use std::time::Duration;

use crate::error::{BookingError, BookingResult};

/// Table appointments are written to.
pub const DEFAULT_TABLE: &str = "appointments";

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for a Supabase project.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// API key sent as `apikey` and bearer token. Use the service role key for
    /// server-side inserts.
    pub api_key: String,
    /// Target table.
    pub table: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("table", &self.table)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SupabaseConfig {
    /// Creates a configuration with the default table and timeout.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Builder method to set the table.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Builder method to set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks that the configuration can be used.
    pub fn validate(&self) -> BookingResult<()> {
        let parsed = reqwest::Url::parse(&self.url).map_err(|e| {
            BookingError::configuration(format!("invalid Supabase URL `{}`", self.url))
                .with_source(e)
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BookingError::configuration(format!(
                "Supabase URL must be http(s), got `{}`",
                self.url
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(BookingError::configuration("Supabase API key is empty"));
        }
        if self.table.trim().is_empty() {
            return Err(BookingError::configuration("Supabase table is empty"));
        }
        Ok(())
    }

    /// Returns the PostgREST endpoint for the table.
    pub fn table_endpoint(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.url.trim_end_matches('/'),
            urlencoding::encode(&self.table)
        )
    }
}
