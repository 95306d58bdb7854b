//! Mock platform API client for testing
//!
//! Serves a fixed inventory from memory without making HTTP calls.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use super::{CloudFoundryApi, OrgResource, SpaceResource, SpaceSummary};
use crate::error::{ApiError, Result};

struct MockOrg {
    resource: OrgResource,
    memory_quota: i64,
    memory_usage: i64,
    spaces: Vec<(SpaceResource, SpaceSummary)>,
}

/// Mock API client.
///
/// # Example
/// ```ignore
/// let mock = MockCloudFoundryClient::new()
///     .with_org("acme", 1024, 512, vec![("dev", SpaceSummary::default())]);
/// let report = fetch_report(&mock, 4).await?;
/// ```
#[derive(Default)]
pub struct MockCloudFoundryClient {
    orgs: Vec<MockOrg>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Total number of API calls served
    calls: AtomicUsize,
    /// Space summary calls currently awaiting, and the highest value seen
    summaries_in_flight: AtomicUsize,
    max_summaries_in_flight: AtomicUsize,
}

impl MockCloudFoundryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an org with named spaces. Guids and URLs are derived from the names.
    pub fn with_org(
        mut self,
        name: &str,
        memory_quota: i64,
        memory_usage: i64,
        spaces: Vec<(&str, SpaceSummary)>,
    ) -> Self {
        let guid = format!("org-{}", name);
        let spaces = spaces
            .into_iter()
            .map(|(space, summary)| {
                (
                    SpaceResource {
                        guid: format!("{}-{}", guid, space),
                        name: space.to_string(),
                    },
                    summary,
                )
            })
            .collect();

        self.orgs.push(MockOrg {
            resource: OrgResource {
                guid: guid.clone(),
                name: name.to_string(),
                quota_definition_url: format!("/v2/quota_definitions/{}", guid),
                spaces_url: format!("/v2/organizations/{}/spaces", guid),
            },
            memory_quota,
            memory_usage,
            spaces,
        });
        self
    }

    /// Fail the next call with `error`
    pub fn with_error(mut self, error: ApiError) -> Self {
        self.error = Arc::new(Mutex::new(Some(error)));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_summaries_in_flight(&self) -> usize {
        self.max_summaries_in_flight.load(Ordering::SeqCst)
    }

    async fn check_error(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.error.lock().await.take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    fn org_by(&self, pred: impl Fn(&OrgResource) -> bool) -> Result<&MockOrg> {
        self.orgs
            .iter()
            .find(|org| pred(&org.resource))
            .ok_or_else(|| ApiError::NotFound("organization".to_string()).into())
    }
}

#[async_trait]
impl CloudFoundryApi for MockCloudFoundryClient {
    async fn list_orgs(&self) -> Result<Vec<OrgResource>> {
        self.check_error().await?;
        Ok(self.orgs.iter().map(|org| org.resource.clone()).collect())
    }

    async fn quota_memory_limit(&self, quota_url: &str) -> Result<i64> {
        self.check_error().await?;
        Ok(self
            .org_by(|org| org.quota_definition_url == quota_url)?
            .memory_quota)
    }

    async fn org_memory_usage(&self, org_guid: &str) -> Result<i64> {
        self.check_error().await?;
        Ok(self.org_by(|org| org.guid == org_guid)?.memory_usage)
    }

    async fn list_spaces(&self, spaces_url: &str) -> Result<Vec<SpaceResource>> {
        self.check_error().await?;
        let org = self.org_by(|org| org.spaces_url == spaces_url)?;
        Ok(org.spaces.iter().map(|(space, _)| space.clone()).collect())
    }

    async fn space_summary(&self, space_guid: &str) -> Result<SpaceSummary> {
        self.check_error().await?;

        let now = self.summaries_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_summaries_in_flight.fetch_max(now, Ordering::SeqCst);
        // Give other buffered requests a chance to start
        tokio::task::yield_now().await;
        self.summaries_in_flight.fetch_sub(1, Ordering::SeqCst);

        self.orgs
            .iter()
            .flat_map(|org| org.spaces.iter())
            .find(|(space, _)| space.guid == space_guid)
            .map(|(_, summary)| summary.clone())
            .ok_or_else(|| ApiError::NotFound(space_guid.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serves_configured_orgs() {
        let mock = MockCloudFoundryClient::new()
            .with_org("acme", 1024, 256, vec![("dev", SpaceSummary::default())]);

        let orgs = mock.list_orgs().await.unwrap();
        assert_eq!(orgs.len(), 1);

        let spaces = mock.list_spaces(&orgs[0].spaces_url).await.unwrap();
        assert_eq!(spaces[0].name, "dev");
        assert_eq!(mock.quota_memory_limit(&orgs[0].quota_definition_url).await.unwrap(), 1024);
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_error_is_consumed_once() {
        let mock = MockCloudFoundryClient::new().with_error(ApiError::Unauthorized);

        assert!(mock.list_orgs().await.is_err());
        assert!(mock.list_orgs().await.is_ok());
    }
}
