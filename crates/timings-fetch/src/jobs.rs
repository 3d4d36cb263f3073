//! Locating the timings jobs of a try push.
//!
//! Treeherder returns jobs as positional rows with a separate list of
//! column names. All pages are collected before any column index is used;
//! the column order is taken from the first page.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::TimingsClient;
use crate::error::{TimingsError, TimingsResult};
use crate::harness::Harness;
use crate::types::TimingsJobs;

const JOB_TYPE_NAME: &str = "job_type_name";
const TASK_ID: &str = "task_id";
const STATE: &str = "state";
const COMPLETED: &str = "completed";

/// Column name → position lookup for one job listing.
#[derive(Debug, Clone, Default)]
pub struct JobColumns {
    index: HashMap<String, usize>,
}

impl JobColumns {
    pub fn new(property_names: &[String]) -> Self {
        let index = property_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { index }
    }

    /// Value of `name` in `row`, if the column exists and the row is long enough.
    pub fn field<'a>(&self, row: &'a [Value], name: &str) -> Option<&'a Value> {
        self.index.get(name).and_then(|&i| row.get(i))
    }

    /// Non-empty string value of `name` in `row`.
    fn str_field<'a>(&self, row: &'a [Value], name: &str) -> Option<&'a str> {
        self.field(row, name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Pick the last completed timings task per harness, in listing order.
pub fn scan_timings_jobs(columns: &JobColumns, rows: &[Vec<Value>]) -> TimingsJobs {
    let mut jobs = TimingsJobs::default();

    for row in rows {
        if columns.str_field(row, STATE) != Some(COMPLETED) {
            continue;
        }
        let (Some(job_type), Some(task_id)) = (
            columns.str_field(row, JOB_TYPE_NAME),
            columns.str_field(row, TASK_ID),
        ) else {
            continue;
        };

        for harness in [Harness::Xpcshell, Harness::Mochitest] {
            if job_type.ends_with(harness.timings_job_suffix()) {
                debug!(%harness, job_type, task_id, "found timings job");
                jobs.set(harness, task_id);
            }
        }
    }

    jobs
}

/// Find the timings task ids for a try revision.
pub async fn locate_timings_jobs(
    client: &TimingsClient,
    revision: &str,
) -> TimingsResult<TimingsJobs> {
    let push_id = find_push(client, revision).await?;
    let (columns, rows) = list_jobs(client, push_id).await?;

    let jobs = scan_timings_jobs(&columns, &rows);
    info!(
        revision,
        push_id,
        rows = rows.len(),
        xpcshell = ?jobs.xpcshell,
        mochitest = ?jobs.mochitest,
        "located timings jobs"
    );
    Ok(jobs)
}

async fn find_push(client: &TimingsClient, revision: &str) -> TimingsResult<u64> {
    let pushes = match client.lookup_pushes(revision).await {
        Ok(pushes) => pushes,
        Err(TimingsError::Network { message }) => {
            warn!(revision, error = %message, "push lookup failed");
            None
        }
        Err(e) => return Err(e),
    };

    pushes
        .and_then(|list| list.results.into_iter().next())
        .map(|push| push.id)
        .ok_or_else(|| TimingsError::NotFound {
            message: format!("no push for revision {}", revision),
        })
}

async fn list_jobs(
    client: &TimingsClient,
    push_id: u64,
) -> TimingsResult<(JobColumns, Vec<Vec<Value>>)> {
    let mut next = Some(client.jobs_url(push_id));
    let mut columns: Option<JobColumns> = None;
    let mut rows = Vec::new();

    while let Some(url) = next.take() {
        let page = match client.fetch_jobs_page(&url).await {
            Ok(Some(page)) => page,
            Ok(None) => {
                return Err(TimingsError::JobsListing {
                    message: format!("no data from {}", url),
                })
            }
            Err(TimingsError::Network { message }) => {
                return Err(TimingsError::JobsListing { message })
            }
            Err(e) => return Err(e),
        };

        if columns.is_none() {
            columns = Some(JobColumns::new(&page.job_property_names));
        }
        rows.extend(page.results);
        next = page.next.filter(|n| !n.is_empty());
    }

    Ok((columns.unwrap_or_default(), rows))
}
