//! Export command implementation

use std::path::Path;

use chrono::{Local, NaiveDate};
use colored::Colorize;

use crate::cli::{CommandContext, OutputFormat};
use crate::cli::args::{GlobalOptions, InventoryArgs};
use crate::cli::context::write_output;
use crate::error::Result;
use crate::report::{build_rows, export_report, render_csv};

/// Options for one export run
#[derive(Debug)]
pub struct ExportOptions<'a> {
    pub env: &'a str,
    pub output: Option<&'a Path>,
    pub store: Option<&'a Path>,
    pub no_store: bool,
    pub date: Option<NaiveDate>,
}

/// Run the export command.
///
/// The export is always CSV; `--format` may only be `pretty` or `csv`.
/// The same report date stamps the CSV and the stored rows, so re-running an
/// export on the same day adds nothing to the store.
pub async fn run(
    opts: &GlobalOptions,
    inventory: &InventoryArgs,
    export: ExportOptions<'_>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.format.require("export", &[OutputFormat::Pretty, OutputFormat::Csv])?;
    let report = ctx.load_inventory(inventory).await?;
    let report_date = export.date.unwrap_or_else(|| Local::now().date_naive());

    if export.no_store {
        let rows = build_rows(&report, export.env, report_date);
        write_output(export.output, &render_csv(&rows))?;
        eprintln!("{} rows exported (not recorded)", rows.len());
        return Ok(());
    }

    let mut store = ctx.open_store(export.store)?;
    let result = export_report(&report, export.env, report_date, &mut store)?;
    write_output(export.output, &result.csv)?;

    let skipped = result.rows.len() - result.inserted;
    eprintln!(
        "{} {} rows exported for {} on {} ({} new, {} already recorded)",
        "✓".green(),
        result.rows.len(),
        export.env.bold(),
        report_date,
        result.inserted,
        skipped
    );

    Ok(())
}
