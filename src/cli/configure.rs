//! Configure command implementation

use std::path::Path;

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Persist `--api`, `--token` and `--store-path` to the config file.
///
/// Values already in the file are kept unless overridden. The file is
/// created if it does not exist yet.
pub fn run(opts: &GlobalOptions, store_path: Option<&Path>) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;
    let existing = if path.exists() {
        Config::load_from(&path)?
    } else {
        Config::default()
    };

    let mut config = existing.with_overrides(opts.api_ref(), opts.token_ref());
    if let Some(store) = store_path {
        config.store_path = Some(store.to_path_buf());
    }

    if config.api_endpoint.is_some() {
        config.validate_api()?;
    }

    config.save_to(&path)?;

    println!(
        "{} Configuration saved to {}",
        "✓".green(),
        path.display().to_string().cyan()
    );
    if config.token.is_none() {
        println!("  → No token saved; pass --token or set USAGEREPORT_TOKEN");
    }

    Ok(())
}
