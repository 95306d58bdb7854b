//! CLI command definitions and handlers

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

pub mod args;
pub mod configure;
pub mod context;
pub mod export;
pub mod history;
pub mod report;
pub mod snapshot;

pub use args::{HistoryFilterArgs, InventoryArgs, OutputFormat};
pub use context::CommandContext;

/// usagereport - platform usage statistics and capacity reports
#[derive(Parser, Debug)]
#[command(name = "usagereport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json, csv)
    ///
    /// report and snapshot accept pretty or json, export accepts pretty or
    /// csv, and history accepts all four.
    #[arg(
        long,
        global = true,
        env = "USAGEREPORT_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "USAGEREPORT_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Platform API endpoint, e.g. https://api.sys.example.com
    #[arg(long, global = true, env = "USAGEREPORT_API", hide_env = true)]
    pub api: Option<String>,

    /// OAuth access token (as printed by `cf oauth-token`)
    #[arg(
        long,
        global = true,
        env = "USAGEREPORT_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "USAGEREPORT_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the usage summary for every org and space
    #[command(after_help = "EXAMPLES:\n  \
            usagereport report                         # Live from the API\n  \
            usagereport report -i inventory.json       # From a saved snapshot\n  \
            usagereport report --format json | jq '.data[0]'")]
    Report {
        #[command(flatten)]
        inventory: InventoryArgs,
    },

    /// Export per-space usage rows as CSV and record them in the history store
    #[command(after_help = "EXAMPLES:\n  \
            usagereport export -e prod                 # CSV to stdout, rows stored\n  \
            usagereport export -e prod -o usage.csv    # CSV to a file\n  \
            usagereport export -e prod --no-store      # CSV only\n  \
            usagereport export -e prod --date 2024-03-01 -i inventory.json")]
    Export {
        /// Environment label stamped on every row
        #[arg(long, short = 'e')]
        env: String,

        #[command(flatten)]
        inventory: InventoryArgs,

        /// Write the CSV to this file instead of stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,

        /// History database (defaults to ~/.usagereport/usagereport.db)
        #[arg(long, value_name = "FILE")]
        store: Option<PathBuf>,

        /// Render the CSV without recording rows
        #[arg(long, conflicts_with = "store")]
        no_store: bool,

        /// Report date stamped on the rows (YYYY-MM-DD, defaults to today)
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
    },

    /// Show recorded export rows
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n  \
            usagereport history                        # Everything recorded\n  \
            usagereport history -e prod --since 2024-01-01\n  \
            usagereport history --org acme --format csv"
    )]
    History {
        #[command(flatten)]
        filters: HistoryFilterArgs,

        /// History database (defaults to ~/.usagereport/usagereport.db)
        #[arg(long, value_name = "FILE")]
        store: Option<PathBuf>,
    },

    /// Fetch the inventory from the API and save it as JSON
    Snapshot {
        /// Write the snapshot to this file instead of stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Save the API endpoint, token and store location to the config file
    Configure {
        /// History database location to remember
        #[arg(long, value_name = "FILE")]
        store_path: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export() {
        let cli = Cli::try_parse_from([
            "usagereport",
            "export",
            "-e",
            "prod",
            "--date",
            "2024-03-01",
            "-i",
            "inv.json",
        ])
        .unwrap();

        match cli.command {
            Commands::Export {
                env,
                inventory,
                date,
                no_store,
                ..
            } => {
                assert_eq!(env, "prod");
                assert_eq!(inventory.inventory, Some(PathBuf::from("inv.json")));
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1));
                assert!(!no_store);
            }
            other => panic!("Expected export, got {other:?}"),
        }
    }

    #[test]
    fn test_export_requires_env() {
        assert!(Cli::try_parse_from(["usagereport", "export"]).is_err());
    }

    #[test]
    fn test_no_store_conflicts_with_store() {
        let result = Cli::try_parse_from([
            "usagereport",
            "export",
            "-e",
            "prod",
            "--no-store",
            "--store",
            "x.db",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::try_parse_from(["usagereport", "history", "--format", "csv"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Csv);
    }
}
