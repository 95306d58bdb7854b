//! Snapshot command implementation

use std::path::Path;

use crate::cli::{CommandContext, OutputFormat};
use crate::cli::args::GlobalOptions;
use crate::cli::context::write_output;
use crate::error::Result;

/// Fetch the live inventory and save it in the format `--inventory` reads
pub async fn run(opts: &GlobalOptions, output: Option<&Path>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.format.require("snapshot", &[OutputFormat::Pretty, OutputFormat::Json])?;
    let report = ctx.fetch_inventory().await?;

    let mut contents = serde_json::to_string_pretty(&report)?;
    contents.push('\n');
    write_output(output, &contents)?;

    eprintln!("Captured {} orgs", report.orgs.len());
    Ok(())
}
