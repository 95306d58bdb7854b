//! Report rendering
//!
//! Two independent consumers of the aggregated stats: the text summary and
//! the tabular export. [`summarize`] exposes the same figures as structured
//! data for JSON output.

pub mod export;
pub mod text;

use serde::Serialize;

use crate::models::labels::SPRING_CLOUD_SERVICES_ORG;
use crate::models::{OrgStats, Report, SpaceStats, org_stats, space_stats};

pub use export::{UsageRow, build_rows, export_report, render_csv};
pub use text::render_text;

/// Org stats together with the stats of its spaces
#[derive(Debug, Serialize)]
pub struct OrgSummary<'a> {
    #[serde(flatten)]
    pub org: OrgStats<'a>,
    pub spaces: Vec<SpaceStats>,
}

/// Structured equivalent of [`render_text`], without the quota percentage
pub fn summarize(report: &Report) -> Vec<OrgSummary<'_>> {
    org_stats(&report.orgs)
        .into_iter()
        .map(|org| {
            let skip = org.name == SPRING_CLOUD_SERVICES_ORG;
            let spaces = space_stats(org.spaces, skip);
            OrgSummary { org, spaces }
        })
        .collect()
}
