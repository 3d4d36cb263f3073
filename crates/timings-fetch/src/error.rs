//! Error types for timing data resolution.

/// Resolution errors.
///
/// An HTTP failure for a data file is not an error: it surfaces as `Ok(None)`
/// from the JSON fetcher or as a non-ok [`DataResponse`](crate::DataResponse).
#[derive(Debug, thiserror::Error)]
pub enum TimingsError {
    /// No push exists for a revision, or no completed timings job was found.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// A page of the job listing could not be fetched.
    #[error("jobs listing failed: {message}")]
    JobsListing { message: String },

    /// Transport-level failure (connection, timeout, body read).
    #[error("network error: {message}")]
    Network { message: String },

    /// A 2xx response whose body is not the expected JSON.
    #[error("malformed body from {url}: {message}")]
    MalformedBody { url: String, message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl TimingsError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => 1,
            Self::Config { .. } => 2,

            Self::JobsListing { .. } => 5,
            Self::Network { .. } => 5,

            Self::MalformedBody { .. } => 6,
        }
    }

    /// Whether the try-revision path converts this error into a synthetic 404.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::JobsListing { .. } | Self::Network { .. }
        )
    }
}

impl From<reqwest::Error> for TimingsError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for timing data resolution.
pub type TimingsResult<T> = Result<T, TimingsError>;
