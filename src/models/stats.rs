//! Derived per-space and per-org statistics
//!
//! Stats are recomputed from the inventory on every render and are never
//! stored alongside it. Output order always follows input order.

use serde::Serialize;

use super::inventory::{Organization, Space};

/// Derived statistics for one space
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpaceStats {
    pub name: String,
    pub deployed_apps_count: i64,
    pub running_apps_count: i64,
    pub stopped_apps_count: i64,
    pub deployed_app_instances_count: i64,
    pub running_app_instances_count: i64,
    pub stopped_app_instances_count: i64,
    pub services_count: i64,
    pub consumed_memory: i64,
}

/// Derived statistics for one organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgStats<'a> {
    pub name: String,
    pub memory_quota: i64,
    pub memory_usage: i64,
    #[serde(skip)]
    pub spaces: &'a [Space],
    pub deployed_apps_count: i64,
    pub running_apps_count: i64,
    pub stopped_apps_count: i64,
    pub deployed_app_instances_count: i64,
    pub running_app_instances_count: i64,
    pub stopped_app_instances_count: i64,
    pub services_count: i64,
}

impl SpaceStats {
    /// Compute stats for a single space.
    ///
    /// `skip_service_instance_count` forces the services count to zero. It is
    /// set when the enclosing org is itself the bundled-service provider, whose
    /// bindings would otherwise be counted twice.
    pub fn compute(space: &Space, skip_service_instance_count: bool) -> Self {
        let virtual_instances = space.virtual_instances();

        let deployed_apps = space.apps.len() as i64;
        let running_apps = space.running_apps_count();
        let deployed_instances = space.instances_count() + virtual_instances;
        let running_instances = space.running_instances_count() + virtual_instances;

        let services = if skip_service_instance_count {
            0
        } else {
            space.services_count() - space.bundled_services_count()
        };

        Self {
            name: space.name.clone(),
            deployed_apps_count: deployed_apps,
            running_apps_count: running_apps,
            stopped_apps_count: deployed_apps - running_apps,
            deployed_app_instances_count: deployed_instances,
            running_app_instances_count: running_instances,
            stopped_app_instances_count: deployed_instances - running_instances,
            services_count: services,
            consumed_memory: space.consumed_memory().saturating_add(space.virtual_memory()),
        }
    }
}

impl<'a> OrgStats<'a> {
    pub fn compute(org: &'a Organization) -> Self {
        let deployed_apps = org.apps_count();
        let running_apps = org.running_apps_count();
        let deployed_instances = org.instances_count();
        let running_instances = org.running_instances_count();

        Self {
            name: org.name.clone(),
            memory_quota: org.memory_quota,
            memory_usage: org.memory_usage,
            spaces: &org.spaces,
            deployed_apps_count: deployed_apps,
            running_apps_count: running_apps,
            stopped_apps_count: deployed_apps - running_apps,
            deployed_app_instances_count: deployed_instances,
            running_app_instances_count: running_instances,
            stopped_app_instances_count: deployed_instances - running_instances,
            services_count: org.services_count(),
        }
    }
}

/// Stats for every space, in input order
pub fn space_stats(spaces: &[Space], skip_service_instance_count: bool) -> Vec<SpaceStats> {
    spaces
        .iter()
        .map(|space| SpaceStats::compute(space, skip_service_instance_count))
        .collect()
}

/// Stats for every org, in input order
pub fn org_stats(orgs: &[Organization]) -> Vec<OrgStats<'_>> {
    orgs.iter().map(OrgStats::compute).collect()
}
