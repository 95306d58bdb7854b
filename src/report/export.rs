//! Tabular export of per-space usage
//!
//! One row per (org, space) pair, written as comma-and-space delimited text
//! and appended to the report history store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::Result;
use crate::models::labels::{
    EXPORT_EXCLUDED_ORGS, MYSQL, RABBITMQ, REDIS, SCDF_INSTANCES_PER_BINDING,
};
use crate::models::{Organization, Report, Space};
use crate::store::ReportStore;

/// Column headers, in row order
pub const HEADERS: [&str; 16] = [
    "Env",
    "ReportDate",
    "OrgName",
    "SpaceName",
    "SpaceMemoryUsed",
    "OrgMemoryQuota",
    "AppsDeployed",
    "AppsRunning",
    "AppInstancesConfigured",
    "AppInstancesRunning",
    "TotalServiceInstancesDeployed",
    "RabbitMQServiceInstanceDeployed",
    "RedisServiceInstanceDeployed",
    "MySQLServiceInstanceDeployed",
    "SpringCloudServiceInstanceDeployed",
    "SpringCloudDataFlowServerInstanceDeployed",
];

/// Field separator for the CSV artifact
const SEPARATOR: &str = ", ";

/// Usage figures for one space on one report date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct UsageRow {
    #[tabled(rename = "ENV")]
    pub env: String,
    #[tabled(rename = "DATE")]
    pub report_date: NaiveDate,
    #[tabled(rename = "ORG")]
    pub org_name: String,
    #[tabled(rename = "SPACE")]
    pub space_name: String,
    #[tabled(rename = "MEMORY MB")]
    pub space_memory_used: i64,
    #[tabled(rename = "QUOTA MB")]
    pub org_memory_quota: i64,
    #[tabled(rename = "APPS")]
    pub apps_deployed: i64,
    #[tabled(rename = "RUNNING")]
    pub apps_running: i64,
    #[tabled(rename = "INSTANCES")]
    pub app_instances_configured: i64,
    #[tabled(rename = "RUNNING INST")]
    pub app_instances_running: i64,
    #[tabled(rename = "SERVICES")]
    pub total_service_instances_deployed: i64,
    #[tabled(rename = "RABBITMQ")]
    pub rabbitmq_service_instance_deployed: i64,
    #[tabled(rename = "REDIS")]
    pub redis_service_instance_deployed: i64,
    #[tabled(rename = "MYSQL")]
    pub mysql_service_instance_deployed: i64,
    #[tabled(rename = "SCS")]
    pub spring_cloud_service_instance_deployed: i64,
    #[tabled(rename = "SCDF")]
    pub spring_cloud_dataflow_server_instance_deployed: i64,
}

impl UsageRow {
    pub fn new(env: &str, report_date: NaiveDate, org: &Organization, space: &Space) -> Self {
        let scs = space.spring_cloud_services_count();
        let scdf = space.dataflow_servers_count();

        Self {
            env: env.to_string(),
            report_date,
            org_name: org.name.clone(),
            space_name: space.name.clone(),
            space_memory_used: space.consumed_memory().saturating_add(space.virtual_memory()),
            org_memory_quota: org.memory_quota,
            apps_deployed: space.apps.len() as i64,
            apps_running: space.running_apps_count(),
            // Configured instances exclude virtual instances
            app_instances_configured: space.instances_count(),
            app_instances_running: space.running_instances_count() + space.virtual_instances(),
            total_service_instances_deployed: space.services_count() - scs - scdf,
            rabbitmq_service_instance_deployed: space.service_instances_count(RABBITMQ),
            redis_service_instance_deployed: space.service_instances_count(REDIS),
            mysql_service_instance_deployed: space.service_instances_count(MYSQL),
            spring_cloud_service_instance_deployed: scs,
            spring_cloud_dataflow_server_instance_deployed: scdf * SCDF_INSTANCES_PER_BINDING,
        }
    }

    /// Row values in [`HEADERS`] order
    pub fn fields(&self) -> [String; 16] {
        [
            self.env.clone(),
            self.report_date.format("%Y-%m-%d").to_string(),
            self.org_name.clone(),
            self.space_name.clone(),
            self.space_memory_used.to_string(),
            self.org_memory_quota.to_string(),
            self.apps_deployed.to_string(),
            self.apps_running.to_string(),
            self.app_instances_configured.to_string(),
            self.app_instances_running.to_string(),
            self.total_service_instances_deployed.to_string(),
            self.rabbitmq_service_instance_deployed.to_string(),
            self.redis_service_instance_deployed.to_string(),
            self.mysql_service_instance_deployed.to_string(),
            self.spring_cloud_service_instance_deployed.to_string(),
            self.spring_cloud_dataflow_server_instance_deployed.to_string(),
        ]
    }
}

/// Build one row per (org, space), skipping the bundled-service provider orgs
pub fn build_rows(report: &Report, env: &str, report_date: NaiveDate) -> Vec<UsageRow> {
    report
        .orgs
        .iter()
        .filter(|org| !EXPORT_EXCLUDED_ORGS.contains(&org.name.as_str()))
        .flat_map(|org| {
            org.spaces
                .iter()
                .map(move |space| UsageRow::new(env, report_date, org, space))
        })
        .collect()
}

/// Render rows as CSV text, header first, one newline-terminated line per row
pub fn render_csv(rows: &[UsageRow]) -> String {
    let mut csv = HEADERS.join(SEPARATOR);
    csv.push('\n');

    for row in rows {
        csv.push_str(&row.fields().join(SEPARATOR));
        csv.push('\n');
    }

    csv
}

/// Result of an export run
#[derive(Debug)]
pub struct Export {
    pub rows: Vec<UsageRow>,
    pub csv: String,
    /// Rows newly written to the store; rows already present for the same
    /// (env, date, org, space) key are left untouched
    pub inserted: usize,
}

/// Build the export for `report` and append its rows to `store` in a single
/// transaction. Nothing is written if any row fails.
pub fn export_report(
    report: &Report,
    env: &str,
    report_date: NaiveDate,
    store: &mut ReportStore,
) -> Result<Export> {
    let rows = build_rows(report, env, report_date);
    let inserted = store.append_rows(&rows)?;

    log::info!(
        "Exported {} rows for {} ({} new)",
        rows.len(),
        report_date,
        inserted
    );

    let csv = render_csv(&rows);
    Ok(Export {
        rows,
        csv,
        inserted,
    })
}
