//! CLI for Vital Prop consultation invites and bookings
//!
//! This crate provides the `vitalprop` command-line interface.

pub mod actions;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod secret;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
