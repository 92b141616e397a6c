//! `stitch-majors` command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::ClientSettings;
use crate::domain::{Identifier, IdentifierError};

/// `stitch-majors` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stitch-majors",
    about = "Choose your major on the Stitch study-matching platform",
    version
)]
pub struct CliArgs {
    /// Stitch server base URL. Overrides `STITCH_SERVER_URL`.
    #[arg(long = "server-url", value_name = "url", global = true)]
    pub server_url: Option<String>,
    /// JSON file persisting the session user. Overrides `STITCH_CACHE_PATH`.
    #[arg(long = "cache-path", value_name = "path", global = true)]
    pub cache_path: Option<PathBuf>,
    /// Use built-in sample data instead of the Stitch API.
    #[arg(long, global = true)]
    pub offline: bool,
    /// Emit logs as JSON lines on stderr.
    #[arg(long = "log-json", global = true)]
    pub log_json: bool,
    #[command(subcommand)]
    pub command: Command,
}

/// Actions available on the major selection page.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List selectable majors, marking the current and pending choice.
    List,
    /// Save a major selection and update the session cache.
    Select {
        /// Major identifier; integers are sent as numbers.
        #[arg(value_name = "MAJOR_ID", value_parser = parse_major_id)]
        major_id: Identifier,
    },
    /// Leave the selection for later.
    Skip,
    /// Show the user the session resolves to.
    Whoami,
}

impl CliArgs {
    /// Apply command-line overrides on top of loaded settings.
    pub fn apply_to(&self, mut settings: ClientSettings) -> ClientSettings {
        if let Some(server_url) = &self.server_url {
            settings.server_url = Some(server_url.clone());
        }
        if let Some(cache_path) = &self.cache_path {
            settings.cache_path = Some(cache_path.clone());
        }
        settings
    }
}

fn parse_major_id(raw: &str) -> Result<Identifier, IdentifierError> {
    raw.parse()
}
