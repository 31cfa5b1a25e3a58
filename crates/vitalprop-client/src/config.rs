//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/vitalprop/config.toml` by default:
//!
//! ```toml
//! [organizer]
//! name = "Vital Prop"
//! email = "hello@vitalprop.com"
//!
//! [booking]
//! timezone = "America/New_York"
//! duration_minutes = 30
//!
//! [ics]
//! strict_escaping = true
//! reminder_day_before = "Reminder: Consultation with Vital Prop tomorrow"
//!
//! [supabase]
//! url = "https://xyz.supabase.co"
//! service_key = "env::SUPABASE_SERVICE_KEY"
//! ```
//!
//! `service_key` supports secret references (see [`crate::secret`]).

use std::path::{Path, PathBuf};
#[cfg(feature = "supabase")]
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use vitalprop_booking::invite::{
    DEFAULT_DURATION_MINUTES, DEFAULT_LOCATION, DEFAULT_ORGANIZER_EMAIL, DEFAULT_ORGANIZER_NAME,
};
use vitalprop_booking::InviteSettings;
use vitalprop_core::ics::{DEFAULT_PRODUCT_ID, DEFAULT_UID_DOMAIN};
use vitalprop_core::{IcsOptions, LogFormat, Party, ReminderMessages, TextEscaping};

/// Directory name under the platform config dir.
const APP_DIR: &str = "vitalprop";

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the vitalprop client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Log line format, overridden by `--log-format`.
    pub log_format: LogFormat,

    /// Who sends the invites.
    pub organizer: OrganizerSettings,

    /// How booking form values become invites.
    pub booking: BookingSettings,

    /// ICS generation settings.
    pub ics: IcsSettings,

    /// Supabase appointment store.
    #[cfg(feature = "supabase")]
    pub supabase: Option<SupabaseSettings>,
}

/// Organizer identity written into invites.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizerSettings {
    pub name: String,
    pub email: String,
}

impl Default for OrganizerSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_ORGANIZER_NAME.to_string(),
            email: DEFAULT_ORGANIZER_EMAIL.to_string(),
        }
    }
}

/// Booking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingSettings {
    /// IANA zone the booking form's dates and slots are in.
    pub timezone: String,

    /// Consultation length in minutes.
    pub duration_minutes: u32,

    /// Location written into invites.
    pub location: String,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

/// ICS generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IcsSettings {
    /// `PRODID` value.
    pub product_id: String,

    /// Domain used in generated `UID`s.
    pub uid_domain: String,

    /// Escape `\`, `;` and `,` in text values. When false only newlines are
    /// escaped.
    pub strict_escaping: bool,

    /// Fold lines longer than 75 octets.
    pub fold_lines: bool,

    /// Text of the reminder fired 24 hours before the start.
    pub reminder_day_before: String,

    /// Text of the reminder fired 1 hour before the start.
    pub reminder_hour_before: String,
}

impl Default for IcsSettings {
    fn default() -> Self {
        let reminders = ReminderMessages::default();
        Self {
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            strict_escaping: true,
            fold_lines: true,
            reminder_day_before: reminders.day_before,
            reminder_hour_before: reminders.hour_before,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse {}: {}", path.display(), e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    /// Returns the organizer as an invite party.
    pub fn organizer(&self) -> Party {
        Party::new(&self.organizer.name, &self.organizer.email)
    }

    /// Parses the booking timezone.
    pub fn timezone(&self) -> Result<Tz, String> {
        let name = self.booking.timezone.trim();
        name.parse::<Tz>()
            .map_err(|e| format!("unknown timezone `{}`: {}", name, e))
    }

    /// Builds the settings used to turn a booking into an invite.
    pub fn to_invite_settings(&self) -> Result<InviteSettings, String> {
        Ok(InviteSettings::default()
            .with_organizer(self.organizer())
            .with_location(self.booking.location.clone())
            .with_duration_minutes(self.booking.duration_minutes)
            .with_timezone(self.timezone()?))
    }

    /// Builds the ICS writer options.
    pub fn to_ics_options(&self) -> IcsOptions {
        let escaping = if self.ics.strict_escaping {
            TextEscaping::Strict
        } else {
            TextEscaping::NewlinesOnly
        };
        IcsOptions::default()
            .with_product_id(self.ics.product_id.clone())
            .with_uid_domain(self.ics.uid_domain.clone())
            .with_escaping(escaping)
            .with_fold_lines(self.ics.fold_lines)
            .with_reminders(ReminderMessages {
                day_before: self.ics.reminder_day_before.clone(),
                hour_before: self.ics.reminder_hour_before.clone(),
            })
    }

    /// Checks every section without contacting any service.
    pub fn validate(&self) -> Result<(), String> {
        if self.organizer.email.trim().is_empty() {
            return Err("[organizer] email must not be empty".to_string());
        }
        if self.booking.duration_minutes == 0 {
            return Err("[booking] duration_minutes must be greater than zero".to_string());
        }
        self.timezone()?;
        if self.ics.product_id.trim().is_empty() {
            return Err("[ics] product_id must not be empty".to_string());
        }
        if self.ics.uid_domain.trim().is_empty() {
            return Err("[ics] uid_domain must not be empty".to_string());
        }

        #[cfg(feature = "supabase")]
        if let Some(ref supabase) = self.supabase {
            supabase.to_store_config()?;
        }

        Ok(())
    }

    /// Returns a copy safe to print: inline secrets are masked.
    pub fn redacted(&self) -> Self {
        #[allow(unused_mut)]
        let mut config = self.clone();
        #[cfg(feature = "supabase")]
        if let Some(ref mut supabase) = config.supabase {
            if !crate::secret::is_reference(&supabase.service_key) {
                supabase.service_key = "<redacted>".to_string();
            }
        }
        config
    }
}

// ---------------------------------------------------------------------------
// SupabaseSettings (in config.toml, including the service key)
// ---------------------------------------------------------------------------

/// Supabase store settings.
#[cfg(feature = "supabase")]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SupabaseSettings {
    /// Project URL.
    pub url: String,

    /// Service role key (supports `pass::` and `env::` prefixes).
    pub service_key: String,

    /// Table name, `appointments` when unset.
    pub table: Option<String>,

    /// HTTP timeout in seconds.
    pub timeout_secs: Option<u64>,
}

#[cfg(feature = "supabase")]
impl SupabaseSettings {
    /// Resolves the service key and builds a validated store configuration.
    pub fn to_store_config(&self) -> Result<vitalprop_booking::supabase::SupabaseConfig, String> {
        use vitalprop_booking::supabase::SupabaseConfig;

        if self.service_key.trim().is_empty() {
            return Err(format!(
                "service_key is missing from [supabase] in {}",
                ClientConfig::default_path().display()
            ));
        }
        let key = crate::secret::resolve(&self.service_key)
            .map_err(|e| format!("failed to resolve service_key: {}", e))?;

        let mut config = SupabaseConfig::new(&self.url, key);
        if let Some(ref table) = self.table {
            config = config.with_table(table);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}
