//! Supabase appointment store.
//!
//! Appointments are inserted into a Supabase table through its PostgREST
//! interface (`POST /rest/v1/<table>`), authenticated with a project API key.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vitalprop_booking::supabase::{SupabaseConfig, SupabaseStore};
//! use vitalprop_booking::BookingService;
//!
//! let config = SupabaseConfig::new("https://xyz.supabase.co", service_key);
//! let store = SupabaseStore::new(config)?;
//!
//! // Build once, share everywhere
//! let service = BookingService::new(Arc::new(store));
//! let response = service.submit(&request).await;
//! ```

mod client;
mod config;

pub use client::SupabaseStore;
pub use config::SupabaseConfig;
