//! Platform inventory acquisition
//!
//! Reads orgs, quotas, memory usage and space summaries from a Cloud Foundry
//! v2 style API and assembles them into a [`Report`](crate::models::Report).

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;

pub mod cloudfoundry;
pub mod fetch;
#[cfg(test)]
pub mod mock;

pub use cloudfoundry::CloudFoundryClient;
pub use fetch::fetch_report;
#[cfg(test)]
pub use mock::MockCloudFoundryClient;

/// Inventory API used to build a report
#[async_trait]
pub trait CloudFoundryApi: Send + Sync {
    /// List all visible organizations, following pagination
    async fn list_orgs(&self) -> Result<Vec<OrgResource>>;

    /// Memory limit (MB) of a quota definition
    async fn quota_memory_limit(&self, quota_url: &str) -> Result<i64>;

    /// Memory currently used by an org (MB)
    async fn org_memory_usage(&self, org_guid: &str) -> Result<i64>;

    /// List the spaces of an org, following pagination
    async fn list_spaces(&self, spaces_url: &str) -> Result<Vec<SpaceResource>>;

    /// Apps and bound services of a space
    async fn space_summary(&self, space_guid: &str) -> Result<SpaceSummary>;
}

/// Organization as listed by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgResource {
    pub guid: String,
    pub name: String,
    pub quota_definition_url: String,
    pub spaces_url: String,
}

/// Space as listed by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceResource {
    pub guid: String,
    pub name: String,
}

/// Response of `/v2/spaces/{guid}/summary`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpaceSummary {
    #[serde(default)]
    pub apps: Vec<AppSummary>,

    #[serde(default)]
    pub services: Vec<ServiceSummary>,
}

/// App entry in a space summary
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppSummary {
    #[serde(default)]
    pub name: String,

    /// Desired instances
    #[serde(default)]
    pub instances: i64,

    #[serde(default)]
    pub running_instances: i64,

    /// Memory per instance (MB)
    #[serde(default)]
    pub memory: i64,
}

/// Service instance entry in a space summary
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceSummary {
    /// Absent for user-provided service instances
    #[serde(default)]
    pub service_plan: Option<ServicePlan>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServicePlan {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub service: Option<ServiceOffering>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceOffering {
    #[serde(default)]
    pub label: String,
}
