//! Command execution context
//!
//! Loads configuration once and resolves the inventory source and report
//! store for every command.

use std::path::Path;

use log::info;

use crate::cli::OutputFormat;
use crate::cli::args::{GlobalOptions, InventoryArgs};
use crate::client::{CloudFoundryClient, fetch_report};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::Report;
use crate::store::ReportStore;

/// Context for command execution containing config and runtime options.
pub struct CommandContext {
    /// Loaded configuration with CLI/env overrides applied
    pub config: Config,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load config from the given path (or default location) and apply overrides.
    ///
    /// A missing default config file is not an error: snapshot-based and
    /// history commands work without one.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config =
            Config::load_at(opts.config_ref())?.with_overrides(opts.api_ref(), opts.token_ref());

        Ok(Self {
            config,
            format: opts.format,
        })
    }

    /// Load the inventory from a snapshot file, or fetch it from the API.
    pub async fn load_inventory(&self, args: &InventoryArgs) -> Result<Report> {
        match args.snapshot() {
            Some(path) => load_snapshot(path),
            None => self.fetch_inventory().await,
        }
    }

    /// Fetch the inventory from the platform API
    pub async fn fetch_inventory(&self) -> Result<Report> {
        let (endpoint, token) = self.config.validate_api()?;
        let client = CloudFoundryClient::new(endpoint, token, self.config.preferences.page_size)?;

        info!("Fetching inventory from {}", endpoint);
        fetch_report(&client, self.config.preferences.concurrency).await
    }

    /// Open the report store for the duration of one command.
    ///
    /// Location precedence: explicit flag > config file > default location.
    pub fn open_store(&self, flag: Option<&Path>) -> Result<ReportStore> {
        let store = match flag.or(self.config.store_path.as_deref()) {
            Some(path) => ReportStore::open_at(path)?,
            None => ReportStore::open()?,
        };
        Ok(store)
    }
}

/// Read a JSON inventory snapshot
pub fn load_snapshot(path: &Path) -> Result<Report> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::Other(format!("Failed to read inventory {}: {}", path.display(), e))
    })?;
    let report: Report = serde_json::from_str(&contents)?;

    info!(
        "Loaded {} orgs from snapshot {}",
        report.orgs.len(),
        path.display()
    );
    Ok(report)
}

/// Write `contents` to `path`, or to stdout when no path is given
pub fn write_output(path: Option<&Path>, contents: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, contents)?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", contents),
    }
    Ok(())
}
