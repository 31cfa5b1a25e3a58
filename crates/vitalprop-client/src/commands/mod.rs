//! Subcommand implementations.

pub mod book;
pub mod config;
pub mod export;
