//! Timing data resolution.
//!
//! Resolves a data filename to a response:
//! 1. Local mode: `data/<filename>` next to the page, with an
//!    xpcshell-try → mochitest-try fallback
//! 2. Try revision (`<harness>-try-<rev>.json`): push → jobs → task artifact,
//!    falling back from xpcshell to mochitest
//! 3. Anything else: latest indexed artifact for the selected harness

use tracing::{debug, info, warn};

use crate::client::TimingsClient;
use crate::error::TimingsResult;
use crate::harness::{
    select_harness, to_mochitest_filename, Harness, TryRevision, XPCSHELL_TRY_PREFIX,
};
use crate::jobs::locate_timings_jobs;
use crate::page::{Mode, PageContext};
use crate::response::DataResponse;
use crate::types::FetchConfig;

/// Message of the synthetic 404 when a push has no usable timings job.
pub const NO_JOB_FOUND: &str = "no job found for revision";

/// Resolves data filenames for one dashboard page.
#[derive(Debug, Clone)]
pub struct TimingsResolver {
    client: TimingsClient,
    page: PageContext,
}

impl TimingsResolver {
    /// Create a resolver for the page at `page_url`.
    pub fn new(config: &FetchConfig, page_url: &str) -> TimingsResult<Self> {
        let page = PageContext::from_url(page_url, config.public_demo_host.as_deref())?;
        let client = TimingsClient::new(config)?;
        Ok(Self::with_components(client, page))
    }

    /// Create a resolver from an existing client and page context.
    pub fn with_components(client: TimingsClient, page: PageContext) -> Self {
        Self { client, page }
    }

    /// Page context this resolver was built for.
    pub fn page(&self) -> &PageContext {
        &self.page
    }

    /// Fetch a data file.
    ///
    /// Upstream failures come back as non-ok responses; try-revision lookup
    /// failures come back as synthetic 404s. Errors are transport failures
    /// outside the try-revision path and malformed JSON from the job APIs.
    pub async fn fetch_data(&self, filename: &str) -> TimingsResult<DataResponse> {
        debug!(filename, mode = ?self.page.mode, "fetching data");
        match self.page.mode {
            Mode::Remote => match TryRevision::parse(filename) {
                Some(try_rev) => self.fetch_try_revision(filename, &try_rev).await,
                None => self.fetch_latest(filename).await,
            },
            Mode::Local => self.fetch_local(filename).await,
        }
    }

    async fn fetch_try_revision(
        &self,
        filename: &str,
        try_rev: &TryRevision,
    ) -> TimingsResult<DataResponse> {
        match self.fetch_try_artifact(filename, try_rev).await {
            Err(e) if e.is_lookup_failure() => {
                warn!(revision = %try_rev.revision, error = %e, "try revision lookup failed");
                Ok(DataResponse::not_found(e.to_string()))
            }
            other => other,
        }
    }

    async fn fetch_try_artifact(
        &self,
        filename: &str,
        try_rev: &TryRevision,
    ) -> TimingsResult<DataResponse> {
        let jobs = locate_timings_jobs(&self.client, &try_rev.revision).await?;

        if let Some(task_id) = jobs.get(try_rev.harness) {
            let response = self.client.fetch_task_artifact(task_id, filename).await?;
            if response.ok() {
                return Ok(response);
            }
            debug!(task_id, status = response.status(), "task artifact unavailable");
        }

        if try_rev.harness == Harness::Xpcshell {
            if let Some(task_id) = jobs.get(Harness::Mochitest) {
                let fallback = to_mochitest_filename(filename);
                info!(task_id, filename = %fallback, "falling back to mochitest timings");
                return self.client.fetch_task_artifact(task_id, &fallback).await;
            }
        }

        Ok(DataResponse::not_found(NO_JOB_FOUND))
    }

    async fn fetch_latest(&self, filename: &str) -> TimingsResult<DataResponse> {
        let repository = self.page.environment.repository();
        let harness = select_harness(filename, self.page.kind.as_deref());

        let response = self
            .client
            .fetch_latest_artifact(repository, harness, filename)
            .await?;

        if !response.ok() && filename.starts_with(XPCSHELL_TRY_PREFIX) {
            let fallback = to_mochitest_filename(filename);
            info!(
                status = response.status(),
                filename = %fallback,
                "falling back to mochitest timings"
            );
            return self
                .client
                .fetch_latest_artifact(repository, Harness::Mochitest, &fallback)
                .await;
        }

        Ok(response)
    }

    async fn fetch_local(&self, filename: &str) -> TimingsResult<DataResponse> {
        let url = self.page.local_data_url(filename)?;

        match self.client.fetch_local(&url).await {
            Ok(response) if response.ok() => return Ok(response),
            Ok(response) => {
                debug!(url = %url, status = response.status(), "local data unavailable");
            }
            Err(e) => warn!(url = %url, error = %e, "local fetch failed"),
        }

        if filename.starts_with(XPCSHELL_TRY_PREFIX) {
            let fallback = self.page.local_data_url(&to_mochitest_filename(filename))?;
            info!(url = %fallback, "falling back to local mochitest timings");
            return self.client.fetch_local(&fallback).await;
        }

        self.client.fetch_local(&url).await
    }
}
