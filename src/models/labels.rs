//! Service labels and org names with special meaning in usage accounting
//!
//! All label checks are substring matches against the binding label, so
//! `p-spring-cloud-services` also matches `p-spring-cloud-services-plan`.

/// Spring Cloud Services bindings. Each one counts as a virtual app instance.
pub const SPRING_CLOUD_SERVICES: &str = "p-spring-cloud-services";

/// Spring Cloud Data Flow server bindings. Each one counts as three virtual app instances.
pub const DATAFLOW_SERVERS: &str = "p-dataflow-servers";

/// Org that hosts the Spring Cloud Services backing apps
pub const SPRING_CLOUD_SERVICES_ORG: &str = "p-spring-cloud-services";

/// Org that hosts the Data Flow backing apps
pub const DATAFLOW_ORG: &str = "p-dataflow";

/// Orgs never listed in the tabular export; their usage is accounted for virtually
pub const EXPORT_EXCLUDED_ORGS: [&str; 2] = [SPRING_CLOUD_SERVICES_ORG, DATAFLOW_ORG];

pub const RABBITMQ: &str = "rabbit";
pub const REDIS: &str = "redis";
pub const MYSQL: &str = "mysql";

/// Virtual instances per Spring Cloud Services binding
pub const SCS_INSTANCES_PER_BINDING: i64 = 1;

/// Virtual instances per Data Flow server binding
pub const SCDF_INSTANCES_PER_BINDING: i64 = 3;

/// Memory (MB) attributed to each virtual instance
pub const VIRTUAL_INSTANCE_MEMORY_MB: i64 = 1024;
