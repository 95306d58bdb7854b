//! JSON documents for `--format json`
//!
//! Every document is `{ "data": [...], "meta": {...} }`. The metadata names the
//! command that produced it and the number of top-level items. For history
//! queries it also carries the filter that selected the rows.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::store::HistoryFilter;

/// Items plus the context they were produced in
#[derive(Debug, Serialize)]
pub struct JsonDocument<'a, T> {
    pub data: &'a [T],
    pub meta: Metadata<'a>,
}

#[derive(Debug, Serialize)]
pub struct Metadata<'a> {
    /// Subcommand that produced the document
    pub command: &'static str,

    /// Number of entries in `data` (orgs for `report`, rows for `history`)
    pub count: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<&'a HistoryFilter>,

    pub generated_at: DateTime<Local>,

    pub version: &'static str,
}

impl<'a, T: Serialize> JsonDocument<'a, T> {
    pub fn new(command: &'static str, data: &'a [T]) -> Self {
        Self {
            data,
            meta: Metadata {
                command,
                count: data.len(),
                filter: None,
                generated_at: Local::now(),
                version: env!("CARGO_PKG_VERSION"),
            },
        }
    }

    /// Record the history filter that selected `data`
    pub fn with_filter(mut self, filter: &'a HistoryFilter) -> Self {
        self.meta.filter = Some(filter);
        self
    }

    /// Pretty-printed JSON text
    pub fn render(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
