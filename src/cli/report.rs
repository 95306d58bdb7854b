//! Report command implementation

use crate::cli::args::{GlobalOptions, InventoryArgs};
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::output::json::JsonDocument;
use crate::report::{render_text, summarize};

/// Run the report command
pub async fn run(opts: &GlobalOptions, inventory: &InventoryArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let format = ctx.format.require("report", &[OutputFormat::Pretty, OutputFormat::Json])?;
    let report = ctx.load_inventory(inventory).await?;

    // The text summary also runs the zero-quota check for JSON output
    let text = render_text(&report)?;
    if format == OutputFormat::Json {
        let summaries = summarize(&report);
        println!("{}", JsonDocument::new("report", &summaries).render()?);
    } else {
        print!("{}", text);
    }

    Ok(())
}
