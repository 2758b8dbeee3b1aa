//! Command-line interface definitions.
//!
//! Defines the CLI structure for the lowstock service using `clap`. The CLI
//! runs the event receiver, replays a single change through the notifier, and
//! inspects the configuration file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Low-stock crossing notifier for Firestore inventory documents
#[derive(Parser, Debug)]
#[command(name = "lowstock")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the lowstock CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the CloudEvent receiver (foreground)
    Serve,

    /// Feed one change event from a JSON file through the notifier
    Replay(ReplayArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Arguments for `lowstock replay`.
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// JSON file holding `{productId, eventId, before, after}`
    pub file: PathBuf,

    /// Use the in-memory store and log-only push regardless of config
    #[arg(long)]
    pub dry_run: bool,
}

/// Subcommands for `lowstock config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}
