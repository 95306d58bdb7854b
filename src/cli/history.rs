//! History command implementation

use std::path::Path;

use crate::cli::args::{GlobalOptions, HistoryFilterArgs};
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::output::json::JsonDocument;
use crate::output::table;
use crate::report::render_csv;

/// Non-numeric leading columns of a history row (env, date, org, space)
const TEXT_COLUMNS: usize = 4;

/// Run the history command
pub fn run(opts: &GlobalOptions, filters: &HistoryFilterArgs, store: Option<&Path>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let store = ctx.open_store(store)?;
    let filter = filters.to_filter();
    let rows = store.rows(&filter)?;

    log::debug!("History query returned {} rows", rows.len());

    match ctx.format {
        OutputFormat::Json => {
            let document = JsonDocument::new("history", &rows).with_filter(&filter);
            println!("{}", document.render()?)
        }
        OutputFormat::Csv => print!("{}", render_csv(&rows)),
        OutputFormat::Pretty | OutputFormat::Table => {
            println!("{}", table::format_table(&rows, TEXT_COLUMNS))
        }
    }

    Ok(())
}
