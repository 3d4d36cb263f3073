//! Configuration and upstream API response types.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::harness::Harness;

/// Response from the push lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushList {
    /// Matching pushes, most recent first.
    #[serde(default)]
    pub results: Vec<Push>,
}

/// A push: the batch of CI jobs triggered by one revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Push {
    /// Opaque push identifier.
    pub id: u64,
}

/// One page of the job listing.
///
/// Rows are positional; `job_property_names` gives the column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsPage {
    #[serde(default)]
    pub results: Vec<Vec<serde_json::Value>>,

    #[serde(default)]
    pub job_property_names: Vec<String>,

    /// Absolute URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
}

/// Most recent completed timings task per harness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingsJobs {
    pub xpcshell: Option<String>,
    pub mochitest: Option<String>,
}

impl TimingsJobs {
    /// Task id recorded for a harness.
    pub fn get(&self, harness: Harness) -> Option<&str> {
        match harness {
            Harness::Xpcshell => self.xpcshell.as_deref(),
            Harness::Mochitest => self.mochitest.as_deref(),
        }
    }

    pub(crate) fn set(&mut self, harness: Harness, task_id: impl Into<String>) {
        let slot = match harness {
            Harness::Xpcshell => &mut self.xpcshell,
            Harness::Mochitest => &mut self.mochitest,
        };
        *slot = Some(task_id.into());
    }
}

/// Upstream service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Treeherder root (push lookup and job listing).
    #[serde(default = "default_treeherder_url")]
    pub treeherder_url: String,

    /// Taskcluster queue API root (artifacts by task id).
    #[serde(default = "default_queue_url")]
    pub queue_url: String,

    /// Taskcluster index API root (latest artifacts by route).
    #[serde(default = "default_index_url")]
    pub index_url: String,

    /// Host of the public demo deployment, which reads from the try repository.
    #[serde(default)]
    pub public_demo_host: Option<String>,

    /// Request timeout in seconds. Unset leaves the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// How many pushes the revision lookup asks for.
    #[serde(default = "default_push_count")]
    pub push_count: u32,

    /// Sub-second timeout override, takes precedence over `timeout_secs`.
    #[serde(skip)]
    pub request_timeout: Option<Duration>,
}

fn default_treeherder_url() -> String {
    "https://treeherder.mozilla.org".to_string()
}

fn default_queue_url() -> String {
    "https://firefox-ci-tc.services.mozilla.com/api/queue/v1".to_string()
}

fn default_index_url() -> String {
    "https://firefox-ci-tc.services.mozilla.com/api/index/v1".to_string()
}

fn default_push_count() -> u32 {
    10
}

fn parse_timeout_secs(value: &str) -> Option<u64> {
    match value.trim().parse() {
        Ok(secs) => Some(secs),
        Err(e) => {
            warn!(value, error = %e, "ignoring invalid TIMINGS_REQUEST_TIMEOUT");
            None
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            treeherder_url: default_treeherder_url(),
            queue_url: default_queue_url(),
            index_url: default_index_url(),
            public_demo_host: None,
            timeout_secs: None,
            push_count: default_push_count(),
            request_timeout: None,
        }
    }
}

impl FetchConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `TIMINGS_TREEHERDER_URL` | Treeherder root |
    /// | `TIMINGS_QUEUE_URL` | Taskcluster queue API root |
    /// | `TIMINGS_INDEX_URL` | Taskcluster index API root |
    /// | `TIMINGS_PUBLIC_DEMO_HOST` | Host served from the try repository |
    /// | `TIMINGS_REQUEST_TIMEOUT` | Request timeout in seconds |
    pub fn from_env() -> Self {
        Self {
            treeherder_url: std::env::var("TIMINGS_TREEHERDER_URL")
                .unwrap_or_else(|_| default_treeherder_url()),
            queue_url: std::env::var("TIMINGS_QUEUE_URL").unwrap_or_else(|_| default_queue_url()),
            index_url: std::env::var("TIMINGS_INDEX_URL").unwrap_or_else(|_| default_index_url()),
            public_demo_host: std::env::var("TIMINGS_PUBLIC_DEMO_HOST")
                .ok()
                .filter(|v| !v.is_empty()),
            timeout_secs: std::env::var("TIMINGS_REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| parse_timeout_secs(&v)),
            push_count: default_push_count(),
            request_timeout: None,
        }
    }

    /// Set the treeherder root.
    pub fn with_treeherder_url(mut self, url: impl Into<String>) -> Self {
        self.treeherder_url = url.into();
        self
    }

    /// Set the taskcluster queue root.
    pub fn with_queue_url(mut self, url: impl Into<String>) -> Self {
        self.queue_url = url.into();
        self
    }

    /// Set the taskcluster index root.
    pub fn with_index_url(mut self, url: impl Into<String>) -> Self {
        self.index_url = url.into();
        self
    }

    /// Set the public demo host.
    pub fn with_public_demo_host(mut self, host: impl Into<String>) -> Self {
        self.public_demo_host = Some(host.into());
        self
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Effective request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout
            .or_else(|| self.timeout_secs.map(Duration::from_secs))
    }
}
