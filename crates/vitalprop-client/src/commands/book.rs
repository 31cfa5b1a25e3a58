//! `vitalprop book`: store an appointment and hand back its invite.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use vitalprop_booking::{
    AppointmentRequest, AppointmentStore, BookingResponse, BookingService, MemoryStore,
    consultation_event, ics_filename,
};
use vitalprop_core::ExportFormatter;

use crate::actions;
use crate::cli::BookArgs;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// What a successful booking produced.
#[derive(Debug)]
pub struct BookingOutcome {
    pub response: BookingResponse,
    /// Where the invite was saved; `None` when writing it failed.
    pub ics_path: Option<PathBuf>,
    pub google_link: String,
    pub outlook_link: String,
}

impl BookArgs {
    /// Converts the flags into a booking form submission.
    pub fn to_request(&self) -> AppointmentRequest {
        AppointmentRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            company: self.company.clone(),
            service: self.service.clone(),
            preferred_date: self.date.clone(),
            preferred_time: self.time.clone(),
            message: self.message.clone(),
        }
    }
}

/// Runs the book command.
pub async fn run(args: BookArgs, config: &ClientConfig) -> ClientResult<()> {
    let store = open_store(args.dry_run, config)?;
    let ics_dir = args.ics_dir.clone().unwrap_or_else(|| PathBuf::from("."));

    let outcome = book(store, &args.to_request(), config, &ics_dir).await?;

    println!("{}", outcome.response.message());
    match outcome.ics_path {
        Some(ref path) => println!("Invite:  {}", path.display()),
        None => println!("Invite:  not saved, use one of the links below"),
    }
    println!("Google:  {}", outcome.google_link);
    println!("Outlook: {}", outcome.outlook_link);
    Ok(())
}

/// Books `request` into `store`, then writes the `.ics` invite into `ics_dir`.
///
/// The invite and links are rendered before anything is stored, so a slot
/// that cannot be placed on the calendar is never booked. Once the row is
/// stored the booking stands: a failed file write is logged and reported as
/// a missing `ics_path`.
pub async fn book(
    store: Arc<dyn AppointmentStore>,
    request: &AppointmentRequest,
    config: &ClientConfig,
    ics_dir: &Path,
) -> ClientResult<BookingOutcome> {
    let settings = config.to_invite_settings().map_err(ClientError::Config)?;
    let event = consultation_event(request, &settings)?;

    let formatter = ExportFormatter::new(config.to_ics_options());
    let payload = formatter.ics_payload(&event);
    let google_link = formatter.google_link(&event);
    let outlook_link = formatter.outlook_link(&event);
    let target = ics_dir.join(ics_filename(request.date()?));

    let service = BookingService::new(store);
    let response = service.submit(request).await;
    if !response.is_success() {
        return Err(ClientError::Rejected(response.message().to_string()));
    }

    let ics_path = match actions::write_payload(&target, &payload).await {
        Ok(()) => {
            info!(path = %target.display(), store = service.store_name(), "wrote invite");
            Some(target)
        }
        Err(e) => {
            warn!(path = %target.display(), error = %e, "appointment booked, invite not saved");
            None
        }
    };

    Ok(BookingOutcome {
        response,
        ics_path,
        google_link,
        outlook_link,
    })
}

/// Picks the appointment store for this run.
fn open_store(dry_run: bool, config: &ClientConfig) -> ClientResult<Arc<dyn AppointmentStore>> {
    if dry_run {
        debug!("dry run, keeping appointment in memory");
        return Ok(Arc::new(MemoryStore::new()));
    }

    #[cfg(feature = "supabase")]
    {
        let settings = config.supabase.as_ref().ok_or_else(|| {
            ClientError::Config(format!(
                "no [supabase] section in {}; add one or pass --dry-run",
                ClientConfig::default_path().display()
            ))
        })?;
        let store_config = settings.to_store_config().map_err(ClientError::Config)?;
        let store = vitalprop_booking::supabase::SupabaseStore::new(store_config)?;
        Ok(Arc::new(store))
    }

    #[cfg(not(feature = "supabase"))]
    {
        let _ = config;
        Err(ClientError::Config(
            "built without Supabase support; pass --dry-run".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AppointmentRequest {
        AppointmentRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            company: None,
            service: "Lead Capture".to_string(),
            preferred_date: "2025-03-10".to_string(),
            preferred_time: "1:00 PM".to_string(),
            message: Some("Looking forward".to_string()),
        }
    }

    #[tokio::test]
    async fn books_and_writes_invite() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());

        let outcome = book(store.clone(), &request(), &ClientConfig::default(), dir.path())
            .await
            .unwrap();

        assert!(outcome.response.is_success());
        let ics_path = outcome.ics_path.unwrap();
        assert_eq!(ics_path, dir.path().join("vital-prop-consultation-2025-03-10.ics"));
        let ics = std::fs::read_to_string(&ics_path).unwrap();
        assert!(ics.contains("SUMMARY:Vital Prop Consultation - Lead Capture\r\n"));
        assert!(ics.contains("DTSTART:20250310T130000Z\r\n"));
        assert!(outcome.google_link.contains("dates=20250310T130000Z%2F20250310T133000Z"));
        assert!(outcome.outlook_link.contains("startdt=2025-03-10T13%3A00%3A00.000Z"));
        assert_eq!(store.appointments().await.len(), 1);
    }

    #[tokio::test]
    async fn invalid_request_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let req = AppointmentRequest {
            preferred_time: "25:00".to_string(),
            ..request()
        };

        let err = book(store.clone(), &req, &ClientConfig::default(), dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Booking(_)));
        assert!(store.appointments().await.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn uses_configured_timezone() {
        let dir = tempfile::tempdir().unwrap();
        let config: ClientConfig =
            toml::from_str("[booking]\ntimezone = \"America/New_York\"\n").unwrap();

        let outcome = book(Arc::new(MemoryStore::new()), &request(), &config, dir.path())
            .await
            .unwrap();
        let ics = std::fs::read_to_string(outcome.ics_path.unwrap()).unwrap();
        assert!(ics.contains("DTSTART:20250310T170000Z\r\n"));
    }

    #[tokio::test]
    async fn unwritable_invite_keeps_the_booking() {
        // A regular file where the invite directory should be
        let file = tempfile::NamedTempFile::new().unwrap();
        let store = Arc::new(MemoryStore::new());

        let outcome = book(store.clone(), &request(), &ClientConfig::default(), file.path())
            .await
            .unwrap();

        assert!(outcome.response.is_success());
        assert!(outcome.ics_path.is_none());
        assert!(outcome.google_link.contains("dates=20250310T130000Z%2F20250310T133000Z"));
        assert_eq!(store.appointments().await.len(), 1);
    }

    #[tokio::test]
    async fn off_catalog_slot_is_not_booked() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let req = AppointmentRequest {
            preferred_time: "3:17 AM".to_string(),
            ..request()
        };

        let err = book(store.clone(), &req, &ClientConfig::default(), dir.path())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not an available time slot"));
        assert!(store.appointments().await.is_empty());
    }

    #[test]
    fn dry_run_uses_memory_store() {
        let store = open_store(true, &ClientConfig::default()).unwrap();
        assert_eq!(store.name(), "memory");
    }

    #[cfg(feature = "supabase")]
    #[test]
    fn live_run_without_supabase_section_fails() {
        let err = open_store(false, &ClientConfig::default()).err().unwrap();
        assert!(err.to_string().contains("--dry-run"));
    }
}
