//! usagereport - platform usage statistics, summaries and CSV exports

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod report;
mod store;

use cli::args::GlobalOptions;
use cli::export::ExportOptions;
use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Report { inventory } => cli::report::run(&opts, &inventory).await,
        Commands::Export {
            env,
            inventory,
            output,
            store,
            no_store,
            date,
        } => {
            let export = ExportOptions {
                env: &env,
                output: output.as_deref(),
                store: store.as_deref(),
                no_store,
                date,
            };
            cli::export::run(&opts, &inventory, export).await
        }
        Commands::History { filters, store } => {
            cli::history::run(&opts, &filters, store.as_deref())
        }
        Commands::Snapshot { output } => cli::snapshot::run(&opts, output.as_deref()).await,
        Commands::Configure { store_path } => {
            cli::configure::run(&opts, store_path.as_deref())
        }
        Commands::Version => {
            println!("usagereport version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Log to stderr: warnings by default, debug with `--debug`. `RUST_LOG` wins
/// when set.
fn init_logging(debug: bool) {
    let default = if debug { "usagereport=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
