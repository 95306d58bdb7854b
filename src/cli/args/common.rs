//! Common CLI types shared across commands

use crate::error::{Error, Result};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-readable summary or table (default)
    #[default]
    Pretty,
    /// Table format - one row per entry
    Table,
    /// JSON format - structured for scripts
    Json,
    /// CSV format - comma-and-space delimited with a header row
    Csv,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Pretty => "pretty",
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    /// Fail unless this format is one `command` can produce
    pub fn require(self, command: &'static str, supported: &[OutputFormat]) -> Result<Self> {
        if supported.contains(&self) {
            return Ok(self);
        }

        Err(Error::UnsupportedFormat {
            command,
            format: self.name(),
            supported: supported
                .iter()
                .map(|format| format.name())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}
