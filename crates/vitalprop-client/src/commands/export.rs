//! `vitalprop export`: turn an event file into an ICS payload or a link.

use std::path::Path;

use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use vitalprop_core::{CalendarEvent, CalendarTarget, Export, ExportFormatter};

use crate::actions;
use crate::cli::ExportArgs;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Runs the export command.
pub async fn run(args: ExportArgs, config: &ClientConfig) -> ClientResult<()> {
    let event = load_event(&args.event).await?;
    let formatter = ExportFormatter::new(config.to_ics_options());
    let export = formatter.export(&event, args.target);
    info!(calendar = %args.target, title = event.title(), "exported event");

    let output = args.output.as_deref().map(|path| {
        if path.is_dir() {
            path.join(default_file_name(args.target))
        } else {
            path.to_path_buf()
        }
    });

    match output {
        Some(ref path) => {
            actions::write_payload(path, &payload_text(&export)).await?;
            println!("{}", path.display());
        }
        None => print!("{}", payload_text(&export)),
    }

    if args.open {
        match (&export, output.as_deref()) {
            (Export::Link(url), _) => actions::open_url(url)?,
            (Export::Ics(_), Some(path)) => actions::open_file(path)?,
            (Export::Ics(_), None) => {
                return Err(ClientError::Action(
                    "--open needs --output for ICS exports".to_string(),
                ));
            }
        }
    }

    Ok(())
}

/// Reads a [`CalendarEvent`] from a JSON file, or stdin when `path` is `-`.
pub async fn load_event(path: &Path) -> ClientResult<CalendarEvent> {
    let content = if path == Path::new("-") {
        let mut content = String::new();
        tokio::io::stdin().read_to_string(&mut content).await?;
        content
    } else {
        tokio::fs::read_to_string(path).await?
    };
    debug!(path = %path.display(), "loaded event file");
    parse_event(&content)
}

/// Parses and validates an event.
pub fn parse_event(json: &str) -> ClientResult<CalendarEvent> {
    serde_json::from_str(json).map_err(|e| ClientError::Parse(format!("invalid event: {}", e)))
}

/// ICS payloads are written as-is; links get a trailing newline.
fn payload_text(export: &Export) -> String {
    match export {
        Export::Ics(ics) => ics.clone(),
        Export::Link(url) => format!("{}\n", url),
    }
}

/// File name used when `--output` is a directory.
pub fn default_file_name(target: CalendarTarget) -> &'static str {
    match target {
        CalendarTarget::Ics => "event.ics",
        CalendarTarget::Google | CalendarTarget::Outlook => "event.url",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const EVENT: &str = r#"{
        "title": "Vital Prop Consultation - CRM Integration",
        "description": "Intro call",
        "location": "Virtual Meeting (Link will be sent via email)",
        "start": "2025-03-10T14:00:00Z",
        "end": "2025-03-10T14:30:00Z",
        "organizer": {"name": "Vital Prop", "email": "hello@vitalprop.com"},
        "attendee": {"name": "Jane Doe", "email": "jane@example.com"}
    }"#;

    fn args(target: CalendarTarget, event: PathBuf, output: Option<PathBuf>) -> ExportArgs {
        ExportArgs {
            target,
            event,
            output,
            open: false,
        }
    }

    #[test]
    fn parses_event_json() {
        let event = parse_event(EVENT).unwrap();
        assert_eq!(event.title(), "Vital Prop Consultation - CRM Integration");
        assert_eq!(event.attendee().email, "jane@example.com");
    }

    #[test]
    fn rejects_inverted_range() {
        let json = EVENT.replace("14:30:00Z", "13:30:00Z");
        let err = parse_event(&json).unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
        assert!(err.to_string().contains("invalid time range"));
    }

    #[tokio::test]
    async fn writes_ics_file() {
        let dir = tempfile::tempdir().unwrap();
        let event_path = dir.path().join("event.json");
        std::fs::write(&event_path, EVENT).unwrap();
        let output = dir.path().join(default_file_name(CalendarTarget::Ics));

        run(
            args(CalendarTarget::Ics, event_path, Some(output.clone())),
            &ClientConfig::default(),
        )
        .await
        .unwrap();

        let ics = std::fs::read_to_string(&output).unwrap();
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(ics.contains("DTSTART:20250310T140000Z\r\n"));
        assert_eq!(ics.matches("BEGIN:VALARM").count(), 2);
    }

    #[tokio::test]
    async fn writes_google_link_file() {
        let dir = tempfile::tempdir().unwrap();
        let event_path = dir.path().join("event.json");
        std::fs::write(&event_path, EVENT).unwrap();
        let output = dir.path().join(default_file_name(CalendarTarget::Google));

        run(
            args(CalendarTarget::Google, event_path, Some(output.clone())),
            &ClientConfig::default(),
        )
        .await
        .unwrap();

        let link = std::fs::read_to_string(&output).unwrap();
        assert!(link.starts_with("https://calendar.google.com/calendar/render?action=TEMPLATE&"));
        assert!(link.contains("dates=20250310T140000Z%2F20250310T143000Z"));
        assert!(link.ends_with('\n'));
    }

    #[tokio::test]
    async fn output_directory_gets_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let event_path = dir.path().join("event.json");
        std::fs::write(&event_path, EVENT).unwrap();

        run(
            args(CalendarTarget::Outlook, event_path, Some(dir.path().to_path_buf())),
            &ClientConfig::default(),
        )
        .await
        .unwrap();

        let link = std::fs::read_to_string(dir.path().join("event.url")).unwrap();
        assert!(link.starts_with("https://outlook.live.com/calendar/0/deeplink/compose?"));
    }

    #[tokio::test]
    async fn missing_event_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(
            args(CalendarTarget::Outlook, dir.path().join("missing.json"), None),
            &ClientConfig::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }

    #[tokio::test]
    async fn open_ics_without_output_fails() {
        let dir = tempfile::tempdir().unwrap();
        let event_path = dir.path().join("event.json");
        std::fs::write(&event_path, EVENT).unwrap();

        let mut export_args = args(CalendarTarget::Ics, event_path, None);
        export_args.open = true;
        let err = run(export_args, &ClientConfig::default()).await.unwrap_err();
        assert!(matches!(err, ClientError::Action(_)));
    }
}
