//! Filter argument types for history queries

use chrono::NaiveDate;
use clap::Args;

use crate::store::HistoryFilter;

/// Report history filters
#[derive(Args, Debug, Default, Clone)]
pub struct HistoryFilterArgs {
    /// Only rows for this environment
    #[arg(long, short = 'e')]
    pub env: Option<String>,

    /// Only rows for this org (exact name)
    #[arg(long)]
    pub org: Option<String>,

    /// Earliest report date (YYYY-MM-DD, inclusive)
    #[arg(long, value_name = "DATE")]
    pub since: Option<NaiveDate>,

    /// Latest report date (YYYY-MM-DD, inclusive)
    #[arg(long, value_name = "DATE")]
    pub until: Option<NaiveDate>,
}

impl HistoryFilterArgs {
    pub fn to_filter(&self) -> HistoryFilter {
        HistoryFilter {
            env: self.env.clone(),
            org: self.org.clone(),
            since: self.since,
            until: self.until,
        }
    }
}
