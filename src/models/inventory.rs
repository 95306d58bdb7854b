//! Inventory snapshot types and the metric functions computed over them
//!
//! An inventory is fetched once (or loaded from a snapshot file) and never
//! mutated afterwards. Every metric here is a pure function of that snapshot.

use serde::{Deserialize, Serialize};

use super::labels::{
    DATAFLOW_SERVERS, SCDF_INSTANCES_PER_BINDING, SCS_INSTANCES_PER_BINDING,
    SPRING_CLOUD_SERVICES, VIRTUAL_INSTANCE_MEMORY_MB,
};

/// Deployed application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Application name (informational only)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Desired instance count
    pub desired: i64,

    /// Running instance count
    pub actual: i64,

    /// Memory per instance in MB
    pub memory: i64,
}

impl Application {
    /// An app is running when at least one instance is up
    pub fn is_running(&self) -> bool {
        self.actual > 0
    }
}

/// Service instance bound in a space
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBinding {
    /// Service product label, e.g. `p-mysql`
    pub label: String,

    /// Service plan name
    #[serde(default)]
    pub plan: String,
}

/// Space within an organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub name: String,

    #[serde(default)]
    pub apps: Vec<Application>,

    #[serde(default)]
    pub services: Vec<ServiceBinding>,
}

/// Organization with its quota and externally reported memory usage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,

    /// Memory quota in MB
    pub memory_quota: i64,

    /// Memory usage in MB as reported by the platform
    pub memory_usage: i64,

    #[serde(default)]
    pub spaces: Vec<Space>,
}

/// Root of an inventory snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default)]
    pub orgs: Vec<Organization>,
}

impl Space {
    /// Memory used by running app instances (MB), without virtual instances.
    /// Saturates at `i64::MAX`.
    pub fn consumed_memory(&self) -> i64 {
        self.apps.iter().fold(0i64, |total, app| {
            total.saturating_add(app.actual.saturating_mul(app.memory))
        })
    }

    pub fn running_apps_count(&self) -> i64 {
        self.apps.iter().filter(|app| app.is_running()).count() as i64
    }

    /// Desired instances across all apps
    pub fn instances_count(&self) -> i64 {
        self.apps.iter().map(|app| app.desired).sum()
    }

    /// Running instances across all apps
    pub fn running_instances_count(&self) -> i64 {
        self.apps.iter().map(|app| app.actual).sum()
    }

    /// Number of service bindings, bundled products included
    pub fn services_count(&self) -> i64 {
        self.services.len() as i64
    }

    /// Number of bindings whose label contains `label` (case-sensitive)
    pub fn service_instances_count(&self, label: &str) -> i64 {
        self.services
            .iter()
            .filter(|service| service.label.contains(label))
            .count() as i64
    }

    pub fn spring_cloud_services_count(&self) -> i64 {
        self.service_instances_count(SPRING_CLOUD_SERVICES)
    }

    pub fn dataflow_servers_count(&self) -> i64 {
        self.service_instances_count(DATAFLOW_SERVERS)
    }

    /// App instances attributed to bundled service products
    pub fn virtual_instances(&self) -> i64 {
        self.spring_cloud_services_count() * SCS_INSTANCES_PER_BINDING
            + self.dataflow_servers_count() * SCDF_INSTANCES_PER_BINDING
    }

    /// Memory (MB) attributed to bundled service products
    pub fn virtual_memory(&self) -> i64 {
        self.virtual_instances() * VIRTUAL_INSTANCE_MEMORY_MB
    }

    /// Bindings that belong to bundled products rather than ordinary services
    pub fn bundled_services_count(&self) -> i64 {
        self.spring_cloud_services_count() + self.dataflow_servers_count()
    }
}

impl Organization {
    /// Desired instances including virtual instances
    pub fn instances_count(&self) -> i64 {
        self.spaces
            .iter()
            .map(|space| space.instances_count() + space.virtual_instances())
            .sum()
    }

    pub fn running_apps_count(&self) -> i64 {
        self.spaces.iter().map(Space::running_apps_count).sum()
    }

    /// Running instances including virtual instances
    pub fn running_instances_count(&self) -> i64 {
        self.spaces
            .iter()
            .map(|space| space.running_instances_count() + space.virtual_instances())
            .sum()
    }

    pub fn apps_count(&self) -> i64 {
        self.spaces.iter().map(|space| space.apps.len() as i64).sum()
    }

    /// Ordinary service bindings, bundled products excluded
    pub fn services_count(&self) -> i64 {
        self.spaces
            .iter()
            .map(|space| space.services_count() - space.bundled_services_count())
            .sum()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_empty_space_has_zero_metrics() {
        let space = space("empty", vec![], vec![]);

        assert_eq!(space.consumed_memory(), 0);
        assert_eq!(space.running_apps_count(), 0);
        assert_eq!(space.instances_count(), 0);
        assert_eq!(space.running_instances_count(), 0);
        assert_eq!(space.services_count(), 0);
        assert_eq!(space.service_instances_count("mysql"), 0);
    }

    #[test]
    fn test_space_app_metrics() {
        let space = space(
            "dev",
            vec![app(2, 1, 512), app(3, 0, 1024), app(1, 1, 256)],
            vec![],
        );

        assert_eq!(space.consumed_memory(), 512 + 256);
        assert_eq!(space.running_apps_count(), 2);
        assert_eq!(space.instances_count(), 6);
        assert_eq!(space.running_instances_count(), 2);
    }

    #[test]
    fn test_consumed_memory_excludes_virtual_instances() {
        let space = space(
            "dev",
            vec![app(1, 1, 128)],
            vec![binding("p-spring-cloud-services"), binding("p-dataflow-servers")],
        );

        assert_eq!(space.consumed_memory(), 128);
        assert_eq!(space.virtual_memory(), 4 * 1024);
    }

    #[test]
    fn test_consumed_memory_saturates() {
        let space = space(
            "huge",
            vec![app(1 << 40, 1 << 40, 1 << 30), app(1, 1, 512)],
            vec![],
        );

        assert_eq!(space.consumed_memory(), i64::MAX);
    }

    #[test]
    fn test_service_instances_count_is_substring_match() {
        let space = space(
            "dev",
            vec![],
            vec![
                binding("p-mysql"),
                binding("cleardb-mysql"),
                binding("p-rabbitmq"),
                binding("MySQL"),
            ],
        );

        assert_eq!(space.service_instances_count("mysql"), 2);
        assert_eq!(space.service_instances_count("rabbit"), 1);
        assert_eq!(space.service_instances_count("redis"), 0);
    }

    #[test]
    fn test_service_instances_count_is_monotonic() {
        let mut space = space("dev", vec![], vec![binding("p-redis")]);
        let before = space.service_instances_count("redis");

        space.services.push(binding("p-redis-shared"));
        assert_eq!(space.service_instances_count("redis"), before + 1);

        space.services.push(binding("p-mysql"));
        assert_eq!(space.service_instances_count("redis"), before + 1);
    }

    #[test]
    fn test_virtual_instances() {
        let space = space(
            "dev",
            vec![],
            vec![
                binding("p-spring-cloud-services-plan"),
                binding("p-dataflow-servers-x"),
                binding("p-dataflow-servers-y"),
            ],
        );

        assert_eq!(space.spring_cloud_services_count(), 1);
        assert_eq!(space.dataflow_servers_count(), 2);
        assert_eq!(space.virtual_instances(), 7);
        assert_eq!(space.virtual_memory(), 7 * 1024);
        assert_eq!(space.bundled_services_count(), 3);
    }

    #[test]
    fn test_org_metrics_include_virtual_instances() {
        let org = org(
            "acme",
            4096,
            1024,
            vec![
                space(
                    "dev",
                    vec![app(2, 1, 512)],
                    vec![binding("p-spring-cloud-services"), binding("p-mysql")],
                ),
                space(
                    "prod",
                    vec![app(4, 4, 256), app(1, 0, 256)],
                    vec![binding("p-dataflow-servers")],
                ),
            ],
        );

        assert_eq!(org.apps_count(), 3);
        assert_eq!(org.running_apps_count(), 2);
        assert_eq!(org.instances_count(), (2 + 1) + (5 + 3));
        assert_eq!(org.running_instances_count(), (1 + 1) + (4 + 3));
        assert_eq!(org.services_count(), 1);
    }

    #[test]
    fn test_empty_org() {
        let org = org("empty", 0, 0, vec![]);

        assert_eq!(org.apps_count(), 0);
        assert_eq!(org.instances_count(), 0);
        assert_eq!(org.services_count(), 0);
    }

    #[test]
    fn test_snapshot_deserializes_with_defaults() {
        let json = r#"{
            "orgs": [
                {
                    "name": "acme",
                    "memory_quota": 1000,
                    "memory_usage": 500,
                    "spaces": [
                        { "name": "dev", "apps": [ { "desired": 2, "actual": 1, "memory": 512 } ] }
                    ]
                }
            ]
        }"#;

        let report: Report = serde_json::from_str(json).unwrap();

        let space = &report.orgs[0].spaces[0];
        assert_eq!(space.apps[0], app(2, 1, 512));
        assert!(space.services.is_empty());
    }
}
