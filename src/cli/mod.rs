//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for crsync using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// crsync - Client Registry Patient Sync
#[derive(Parser, Debug)]
#[command(name = "crsync")]
#[command(version, about, long_about = None)]
#[command(author = "crsync Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "crsync.toml", env = "CRSYNC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CRSYNC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Listen for patient messages and sync them to the client registry
    Listen(commands::listen::ListenArgs),

    /// Sync a single patient to the client registry
    Sync(commands::sync::SyncArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Whether the command reads the configuration file
    pub fn uses_config(&self) -> bool {
        !matches!(self, Commands::Init(_))
    }
}
