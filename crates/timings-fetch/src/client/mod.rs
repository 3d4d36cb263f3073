//! Client for the upstream services holding timing data.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{TimingsError, TimingsResult};
use crate::harness::Harness;
use crate::response::DataResponse;
use crate::types::{FetchConfig, JobsPage, PushList};

mod helpers;
mod http;

use http::HttpBackend;

pub(crate) const USER_AGENT_VALUE: &str = concat!("timings-fetch/", env!("CARGO_PKG_VERSION"));

/// Client for treeherder, the taskcluster queue/index, and local data files.
#[derive(Debug, Clone)]
pub struct TimingsClient {
    http: HttpBackend,
    treeherder_url: String,
    queue_url: String,
    index_url: String,
    push_count: u32,
}

impl TimingsClient {
    /// Create a client for the configured service roots.
    pub fn new(config: &FetchConfig) -> TimingsResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let mut builder = reqwest::Client::builder().default_headers(default_headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| TimingsError::Config {
            message: format!("failed to create HTTP client: {}", e),
        })?;

        Ok(Self {
            http: HttpBackend { client },
            treeherder_url: config.treeherder_url.trim_end_matches('/').to_string(),
            queue_url: config.queue_url.trim_end_matches('/').to_string(),
            index_url: config.index_url.trim_end_matches('/').to_string(),
            push_count: config.push_count,
        })
    }

    /// GET a JSON document; `Ok(None)` when the server answers non-2xx.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> TimingsResult<Option<T>> {
        self.http.get_json(url).await
    }

    /// Pushes on the try repository for a revision.
    pub async fn lookup_pushes(&self, revision: &str) -> TimingsResult<Option<PushList>> {
        let url = helpers::push_lookup_url(&self.treeherder_url, revision, self.push_count);
        debug!(url = %url, revision, "looking up push");
        self.fetch_json(&url).await
    }

    /// URL of the first job-listing page for a push.
    pub fn jobs_url(&self, push_id: u64) -> String {
        helpers::jobs_url(&self.treeherder_url, push_id)
    }

    /// One job-listing page; follow `next` with the same method.
    pub async fn fetch_jobs_page(&self, url: &str) -> TimingsResult<Option<JobsPage>> {
        debug!(url = %url, "fetching jobs page");
        self.fetch_json(url).await
    }

    /// Artifact uploaded by a specific task.
    pub async fn fetch_task_artifact(
        &self,
        task_id: &str,
        filename: &str,
    ) -> TimingsResult<DataResponse> {
        let url = helpers::task_artifact_url(&self.queue_url, task_id, filename);
        debug!(url = %url, task_id, "fetching task artifact");
        self.fetch(&url).await
    }

    /// Artifact of the latest indexed timings task for a harness.
    pub async fn fetch_latest_artifact(
        &self,
        repository: &str,
        harness: Harness,
        filename: &str,
    ) -> TimingsResult<DataResponse> {
        let url = helpers::index_artifact_url(&self.index_url, repository, harness, filename);
        debug!(url = %url, %harness, "fetching latest artifact");
        self.fetch(&url).await
    }

    /// Data file served next to the dashboard page.
    pub async fn fetch_local(&self, url: &Url) -> TimingsResult<DataResponse> {
        debug!(url = %url, "fetching local data");
        self.fetch(url.as_str()).await
    }

    async fn fetch(&self, url: &str) -> TimingsResult<DataResponse> {
        let response = self.http.get(url).await?;
        Ok(DataResponse::from_http(response))
    }

    /// Treeherder root without trailing slash.
    pub fn treeherder_url(&self) -> &str {
        &self.treeherder_url
    }
}
