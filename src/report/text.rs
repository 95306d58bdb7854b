//! Human-readable usage summary

use crate::error::{ReportError, Result};
use crate::models::labels::SPRING_CLOUD_SERVICES_ORG;
use crate::models::{Report, SpaceStats, org_stats, space_stats};

/// Running totals across all orgs for the closing summary line
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Totals {
    apps: i64,
    instances: i64,
    running_apps: i64,
    running_instances: i64,
    service_instances: i64,
}

/// Render the usage summary for every org and space in the report.
///
/// Fails with [`ReportError::ZeroQuota`] if an org with at least one space
/// has a memory quota of 0 MB.
pub fn render_text(report: &Report) -> Result<String> {
    let mut response = String::new();
    let mut totals = Totals::default();

    for org in org_stats(&report.orgs) {
        response.push_str(&format!(
            "Org {} is consuming {} MB of {} MB.\n",
            org.name, org.memory_usage, org.memory_quota
        ));

        let skip_service_instance_count = org.name == SPRING_CLOUD_SERVICES_ORG;
        for space in space_stats(org.spaces, skip_service_instance_count) {
            let percent = quota_percent(&space, org.memory_quota, &org.name)?;
            push_space(&mut response, &space, percent);
        }

        totals.apps += org.deployed_apps_count;
        totals.instances += org.deployed_app_instances_count;
        totals.running_apps += org.running_apps_count;
        totals.running_instances += org.running_app_instances_count;
        totals.service_instances += org.services_count;
    }

    response.push_str(&format!(
        "You have deployed {} apps across {} org(s), with a total of {} app instances configured. \
         You are currently running {} apps with {} app instances and using {} service instances \
         of type Service Suite.\n",
        totals.apps,
        report.orgs.len(),
        totals.instances,
        totals.running_apps,
        totals.running_instances,
        totals.service_instances
    ));

    Ok(response)
}

/// Share of the org quota used by a space, truncated to a whole percent
fn quota_percent(space: &SpaceStats, memory_quota: i64, org: &str) -> Result<i64> {
    space
        .consumed_memory
        .saturating_mul(100)
        .checked_div(memory_quota)
        .ok_or_else(|| {
            ReportError::ZeroQuota {
                org: org.to_string(),
            }
            .into()
        })
}

fn push_space(response: &mut String, space: &SpaceStats, percent: i64) {
    response.push_str(&format!(
        "\tSpace {} is consuming {} MB memory ({}%) of org quota.\n",
        space.name, space.consumed_memory, percent
    ));
    response.push_str(&format!(
        "\t\t{} apps: {} running {} stopped\n",
        space.deployed_apps_count, space.running_apps_count, space.stopped_apps_count
    ));
    response.push_str(&format!(
        "\t\t{} app instances: {} running, {} stopped\n",
        space.deployed_app_instances_count,
        space.running_app_instances_count,
        space.stopped_app_instances_count
    ));
    response.push_str(&format!(
        "\t\t{} service instances of type Service Suite\n",
        space.services_count
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::inventory::fixtures::*;

    fn acme_report() -> Report {
        Report {
            orgs: vec![org(
                "acme",
                1000,
                500,
                vec![space("dev", vec![app(2, 1, 512)], vec![])],
            )],
        }
    }

    #[test]
    fn test_render_acme_scenario() {
        let text = render_text(&acme_report()).unwrap();

        let expected = "Org acme is consuming 500 MB of 1000 MB.\n\
            \tSpace dev is consuming 512 MB memory (51%) of org quota.\n\
            \t\t1 apps: 1 running 0 stopped\n\
            \t\t2 app instances: 1 running, 1 stopped\n\
            \t\t0 service instances of type Service Suite\n\
            You have deployed 1 apps across 1 org(s), with a total of 2 app instances configured. \
            You are currently running 1 apps with 1 app instances and using 0 service instances \
            of type Service Suite.\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_empty_report() {
        let text = render_text(&Report::default()).unwrap();

        assert_eq!(
            text,
            "You have deployed 0 apps across 0 org(s), with a total of 0 app instances configured. \
             You are currently running 0 apps with 0 app instances and using 0 service instances \
             of type Service Suite.\n"
        );
    }

    #[test]
    fn test_zero_quota_is_an_error() {
        let report = Report {
            orgs: vec![org("broke", 0, 0, vec![space("dev", vec![], vec![])])],
        };

        let err = render_text(&report).unwrap_err();

        match err {
            Error::Report(ReportError::ZeroQuota { org }) => assert_eq!(org, "broke"),
            other => panic!("Expected ZeroQuota, got {other:?}"),
        }
    }

    #[test]
    fn test_oversized_space_memory_renders() {
        let report = Report {
            orgs: vec![org(
                "acme",
                1000,
                500,
                vec![space("dev", vec![app(1 << 40, 1 << 40, 1 << 30)], vec![])],
            )],
        };

        let text = render_text(&report).unwrap();

        assert!(text.contains(&format!(
            "\tSpace dev is consuming {} MB memory ({}%) of org quota.\n",
            i64::MAX,
            i64::MAX / 1000
        )));
    }

    #[test]
    fn test_zero_quota_without_spaces_renders() {
        let report = Report {
            orgs: vec![org("idle", 0, 0, vec![])],
        };

        let text = render_text(&report).unwrap();
        assert!(text.starts_with("Org idle is consuming 0 MB of 0 MB.\n"));
    }

    #[test]
    fn test_provider_org_suppresses_service_counts() {
        let spaces = vec![space(
            "instances",
            vec![app(1, 1, 1024)],
            vec![binding("p-mysql"), binding("p-rabbitmq")],
        )];
        let report = Report {
            orgs: vec![
                org("p-spring-cloud-services", 10240, 1024, spaces.clone()),
                org("acme", 10240, 1024, spaces),
            ],
        };

        let text = render_text(&report).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[4], "\t\t0 service instances of type Service Suite");
        assert_eq!(lines[9], "\t\t2 service instances of type Service Suite");
        // Org-level totals are not suppressed
        assert!(lines[10].ends_with("using 4 service instances of type Service Suite."));
    }

    #[test]
    fn test_totals_include_virtual_instances() {
        let report = Report {
            orgs: vec![
                org(
                    "acme",
                    8192,
                    2048,
                    vec![space(
                        "dev",
                        vec![app(2, 2, 256)],
                        vec![binding("p-dataflow-servers"), binding("p-redis")],
                    )],
                ),
                org(
                    "globex",
                    4096,
                    0,
                    vec![space(
                        "qa",
                        vec![app(1, 0, 256)],
                        vec![binding("p-spring-cloud-services")],
                    )],
                ),
            ],
        };

        let text = render_text(&report).unwrap();

        assert!(text.contains("\tSpace dev is consuming 3584 MB memory (43%) of org quota.\n"));
        assert!(text.contains("\t\t5 app instances: 5 running, 0 stopped\n"));
        assert!(text.ends_with(
            "You have deployed 2 apps across 2 org(s), with a total of 7 app instances configured. \
             You are currently running 1 apps with 6 app instances and using 1 service instances \
             of type Service Suite.\n"
        ));
    }
}
