//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::{error::DialError, settings::default_settings_path};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "dial-timer")]
#[command(about = "A countdown timer with a circular dial and a local control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the control surface to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Settings file (defaults to the user config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log finish events instead of sending desktop notifications
    #[arg(long)]
    pub no_notify: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Resolve the settings file location
    pub fn settings_path(&self) -> Result<PathBuf, DialError> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => default_settings_path(),
        }
    }
}
