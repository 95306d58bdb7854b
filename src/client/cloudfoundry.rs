//! Cloud Foundry v2 API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{CloudFoundryApi, OrgResource, SpaceResource, SpaceSummary};
use crate::error::{ApiError, Result};

/// Requests per second sent to the API
const RATE_LIMIT_PER_SECOND: NonZeroU32 = match NonZeroU32::new(20) {
    Some(n) => n,
    None => unreachable!(),
};

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Paged list response (`/v2/organizations`, `/v2/organizations/{guid}/spaces`)
#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct Page<T> {
    #[serde(default)]
    next_url: Option<String>,
    #[serde(default)]
    resources: Vec<Resource<T>>,
}

#[derive(Debug, Deserialize)]
struct Resource<T> {
    metadata: Metadata,
    entity: T,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    guid: String,
}

#[derive(Debug, Deserialize)]
struct OrgEntity {
    name: String,
    quota_definition_url: String,
    spaces_url: String,
}

#[derive(Debug, Deserialize)]
struct SpaceEntity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct QuotaEntity {
    memory_limit: i64,
}

#[derive(Debug, Deserialize)]
struct MemoryUsage {
    memory_usage_in_mb: i64,
}

/// Cloud Foundry API client
pub struct CloudFoundryClient {
    http: HttpClient,
    base_url: String,
    token: String,
    page_size: usize,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl CloudFoundryClient {
    /// Create a new client for `base_url` authenticating with a bearer token
    pub fn new(base_url: &str, token: &str, page_size: usize) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            RATE_LIMIT_PER_SECOND,
        )));

        // `cf oauth-token` prints "bearer <token>"; accept either form
        let token = token
            .strip_prefix("bearer ")
            .or_else(|| token.strip_prefix("Bearer "))
            .unwrap_or(token);

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            page_size: page_size.max(1),
            rate_limiter,
        })
    }

    /// GET an API path (relative to the base URL) and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let data = response.json::<T>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse {}: {}", path, e))
                })?;
                Ok(data)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(path.to_string()).into()),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => Err(ApiError::InvalidResponse(format!(
                "Unexpected status code {} for {}",
                status, path
            ))
            .into()),
        }
    }

    /// Collect every resource of a paged list, following `next_url`
    async fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<Resource<T>>> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut next = Some(format!(
            "{}{}results-per-page={}",
            path, separator, self.page_size
        ));
        let mut resources = Vec::new();

        while let Some(path) = next.take() {
            let page: Page<T> = self.get(&path).await?;
            resources.extend(page.resources);
            next = page.next_url;
        }

        Ok(resources)
    }
}

#[async_trait]
impl CloudFoundryApi for CloudFoundryClient {
    async fn list_orgs(&self) -> Result<Vec<OrgResource>> {
        let resources: Vec<Resource<OrgEntity>> = self.get_all("/v2/organizations").await?;
        Ok(resources
            .into_iter()
            .map(|r| OrgResource {
                guid: r.metadata.guid,
                name: r.entity.name,
                quota_definition_url: r.entity.quota_definition_url,
                spaces_url: r.entity.spaces_url,
            })
            .collect())
    }

    async fn quota_memory_limit(&self, quota_url: &str) -> Result<i64> {
        let quota: Resource<QuotaEntity> = self.get(quota_url).await?;
        Ok(quota.entity.memory_limit)
    }

    async fn org_memory_usage(&self, org_guid: &str) -> Result<i64> {
        let path = format!("/v2/organizations/{}/memory_usage", org_guid);
        let usage: MemoryUsage = self.get(&path).await?;
        Ok(usage.memory_usage_in_mb)
    }

    async fn list_spaces(&self, spaces_url: &str) -> Result<Vec<SpaceResource>> {
        let resources: Vec<Resource<SpaceEntity>> = self.get_all(spaces_url).await?;
        Ok(resources
            .into_iter()
            .map(|r| SpaceResource {
                guid: r.metadata.guid,
                name: r.entity.name,
            })
            .collect())
    }

    async fn space_summary(&self, space_guid: &str) -> Result<SpaceSummary> {
        let path = format!("/v2/spaces/{}/summary", space_guid);
        self.get(&path).await
    }
}
