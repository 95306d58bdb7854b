//! Assemble an inventory report from the platform API
//!
//! Fetching runs in two phases, each with at most `concurrency` orgs or spaces
//! in flight: org quota, usage and space lists first, then every space summary
//! as one flattened stream. `buffered` yields results in input order, so the
//! report lists orgs and spaces exactly as the API returned them.

use futures::stream::{self, StreamExt, TryStreamExt};
use futures::try_join;
use log::{debug, info};

use super::{CloudFoundryApi, OrgResource, SpaceResource, SpaceSummary};
use crate::error::Result;
use crate::models::{Application, Organization, Report, ServiceBinding, Space};

/// Org figures gathered before its spaces are summarised
struct OrgHeader {
    memory_quota: i64,
    memory_usage: i64,
    spaces: Vec<SpaceResource>,
}

/// Fetch the full inventory: orgs, their quota and usage, spaces, apps and services.
pub async fn fetch_report<A>(api: &A, concurrency: usize) -> Result<Report>
where
    A: CloudFoundryApi + ?Sized,
{
    let concurrency = concurrency.max(1);
    let orgs = api.list_orgs().await?;
    info!("Fetching inventory for {} orgs", orgs.len());

    let headers = stream::iter(orgs.iter().map(|org| fetch_org_header(api, org)))
        .buffered(concurrency)
        .try_collect::<Vec<_>>()
        .await?;

    let space_refs = headers.iter().flat_map(|header| header.spaces.iter());
    let spaces = stream::iter(space_refs.map(|space| fetch_space(api, space)))
        .buffered(concurrency)
        .try_collect::<Vec<_>>()
        .await?;
    debug!("Fetched {} space summaries", spaces.len());

    let mut spaces = spaces.into_iter();
    let orgs = orgs
        .into_iter()
        .zip(headers)
        .map(|(org, header)| Organization {
            name: org.name,
            memory_quota: header.memory_quota,
            memory_usage: header.memory_usage,
            spaces: spaces.by_ref().take(header.spaces.len()).collect(),
        })
        .collect();

    Ok(Report { orgs })
}

async fn fetch_org_header<A>(api: &A, org: &OrgResource) -> Result<OrgHeader>
where
    A: CloudFoundryApi + ?Sized,
{
    let (memory_quota, memory_usage, spaces) = try_join!(
        api.quota_memory_limit(&org.quota_definition_url),
        api.org_memory_usage(&org.guid),
        api.list_spaces(&org.spaces_url),
    )?;
    debug!("Org {}: {} spaces", org.name, spaces.len());

    Ok(OrgHeader {
        memory_quota,
        memory_usage,
        spaces,
    })
}

async fn fetch_space<A>(api: &A, space: &SpaceResource) -> Result<Space>
where
    A: CloudFoundryApi + ?Sized,
{
    let summary = api.space_summary(&space.guid).await?;
    Ok(space_from_summary(&space.name, summary))
}

/// Convert a space summary into the inventory model
pub fn space_from_summary(name: &str, summary: SpaceSummary) -> Space {
    let apps = summary
        .apps
        .into_iter()
        .map(|app| Application {
            name: app.name,
            desired: app.instances,
            actual: app.running_instances,
            memory: app.memory,
        })
        .collect();

    // User-provided services carry no plan; they bind with an empty label
    let services = summary
        .services
        .into_iter()
        .map(|service| {
            let plan = service.service_plan.unwrap_or_default();
            ServiceBinding {
                label: plan.service.map(|s| s.label).unwrap_or_default(),
                plan: plan.name,
            }
        })
        .collect();

    Space {
        name: name.to_string(),
        apps,
        services,
    }
}
