//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use vitalprop_core::{CalendarTarget, LogFormat};

/// vitalprop - Consultation invites and bookings
#[derive(Debug, Parser)]
#[command(name = "vitalprop")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "VITALPROP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Log line format on stderr: compact or json
    #[arg(
        long,
        env = "VITALPROP_LOG_FORMAT",
        global = true,
        value_parser = clap::value_parser!(LogFormat)
    )]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export an event as an ICS file or a calendar link
    Export(ExportArgs),

    /// Book a consultation and produce its invite
    Book(BookArgs),

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments of `vitalprop export`.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Where the event is headed: ics, google or outlook
    #[arg(value_parser = clap::value_parser!(CalendarTarget))]
    pub target: CalendarTarget,

    /// JSON file describing the event (`-` for stdin)
    #[arg(long, short)]
    pub event: PathBuf,

    /// Write the result to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Open the link (or the written file) with the default application
    #[arg(long)]
    pub open: bool,
}

/// Arguments of `vitalprop book`.
#[derive(Debug, Args)]
pub struct BookArgs {
    /// Attendee name
    #[arg(long)]
    pub name: String,

    /// Attendee email
    #[arg(long)]
    pub email: String,

    /// Attendee phone number
    #[arg(long)]
    pub phone: String,

    /// Company name
    #[arg(long)]
    pub company: Option<String>,

    /// Service the consultation is about
    #[arg(long)]
    pub service: String,

    /// Preferred date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Preferred slot, e.g. "2:00 PM"
    #[arg(long)]
    pub time: String,

    /// Free-form notes
    #[arg(long)]
    pub message: Option<String>,

    /// Keep the appointment in memory instead of writing it to Supabase
    #[arg(long)]
    pub dry_run: bool,

    /// Directory the invite `.ics` file is written to
    #[arg(long)]
    pub ics_dir: Option<PathBuf>,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
