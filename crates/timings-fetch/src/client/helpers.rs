//! Pure helpers: upstream URL construction (no HTTP, no status logic).

use crate::harness::Harness;

/// Push lookup on the try repository.
///
/// URL format: {treeherder}/api/project/try/push/?full=true&count={n}&revision={rev}
pub(crate) fn push_lookup_url(treeherder: &str, revision: &str, count: u32) -> String {
    format!(
        "{}/api/project/try/push/?full=true&count={}&revision={}",
        treeherder, count, revision
    )
}

/// First page of the job listing for a push.
pub(crate) fn jobs_url(treeherder: &str, push_id: u64) -> String {
    format!("{}/api/jobs/?push_id={}", treeherder, push_id)
}

/// Public artifact of run 0 of a task.
pub(crate) fn task_artifact_url(queue: &str, task_id: &str, filename: &str) -> String {
    format!(
        "{}/task/{}/runs/0/artifacts/public/{}",
        queue, task_id, filename
    )
}

/// Public artifact of the latest timings task indexed for a repository.
pub(crate) fn index_artifact_url(
    index: &str,
    repository: &str,
    harness: Harness,
    filename: &str,
) -> String {
    format!(
        "{}/task/gecko.v2.{}.latest.source.test-info-{}-timings/artifacts/public/{}",
        index, repository, harness, filename
    )
}
