//! Test-timing data fetching for the test-info dashboard.
//!
//! Resolves a data filename to a response by trying, depending on the page:
//!
//! - a local `data/` directory next to the dashboard page
//! - the CI index ("latest" timings artifact for a harness)
//! - for try revisions, the treeherder push and job listings, then the
//!   artifact of the most recent completed timings task
//!
//! with a fallback from xpcshell to mochitest data when xpcshell has none.
//!
//! # Quick Start
//!
//! ```no_run
//! use timings_fetch::{FetchConfig, TimingsResolver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = TimingsResolver::new(&FetchConfig::from_env(), "https://dashboard.example/?kind=mochitest")?;
//!
//! let response = resolver.fetch_data("index.json").await?;
//! if response.ok() {
//!     let index: serde_json::Value = response.json().await?;
//!     println!("{}", index);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `TIMINGS_TREEHERDER_URL` | Treeherder root (default: `https://treeherder.mozilla.org`) |
//! | `TIMINGS_QUEUE_URL` | Taskcluster queue API root |
//! | `TIMINGS_INDEX_URL` | Taskcluster index API root |
//! | `TIMINGS_PUBLIC_DEMO_HOST` | Page host that reads from the try repository |
//! | `TIMINGS_REQUEST_TIMEOUT` | Request timeout in seconds (default: none) |

pub mod client;
pub mod error;
pub mod harness;
pub mod jobs;
pub mod page;
pub mod resolver;
pub mod response;
pub mod types;

// Re-export main types
pub use client::TimingsClient;
pub use error::{TimingsError, TimingsResult};
pub use harness::{select_harness, to_mochitest_filename, Harness, TryRevision, INDEX_FILENAME};
pub use jobs::{locate_timings_jobs, scan_timings_jobs, JobColumns};
pub use page::{Environment, Mode, PageContext};
pub use resolver::{TimingsResolver, NO_JOB_FOUND};
pub use response::DataResponse;
pub use types::{FetchConfig, JobsPage, Push, PushList, TimingsJobs};

/// User-Agent sent with every request.
pub const TIMINGS_USER_AGENT: &str = client::USER_AGENT_VALUE;
