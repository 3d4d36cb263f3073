//! Response handed back to the dashboard.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{TimingsError, TimingsResult};

#[derive(Debug)]
enum Body {
    /// Upstream response, body not yet read.
    Http(reqwest::Response),
    /// Locally constructed failure.
    Synthetic(String),
}

/// A fetched (or synthesized) data file.
///
/// Failed upstream responses are returned as-is; the caller checks [`ok`](Self::ok).
#[derive(Debug)]
pub struct DataResponse {
    status: StatusCode,
    status_text: String,
    url: Option<String>,
    body: Body,
}

impl DataResponse {
    pub(crate) fn from_http(response: reqwest::Response) -> Self {
        let status = response.status();
        Self {
            status,
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            url: Some(response.url().to_string()),
            body: Body::Http(response),
        }
    }

    /// Synthetic 404 carrying `message` as its status text.
    pub fn not_found(message: impl Into<String>) -> Self {
        let message = message.into();
        let body = serde_json::json!({ "error": message }).to_string();
        Self {
            status: StatusCode::NOT_FOUND,
            status_text: message,
            url: None,
            body: Body::Synthetic(body),
        }
    }

    /// Whether the status is 2xx.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// Numeric HTTP status.
    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Reason phrase, or the message of a synthetic failure.
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Final URL of the upstream response; `None` when synthesized.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Whether this response was built locally rather than received.
    pub fn is_synthetic(&self) -> bool {
        matches!(self.body, Body::Synthetic(_))
    }

    /// Read the body as text.
    pub async fn text(self) -> TimingsResult<String> {
        match self.body {
            Body::Http(response) => response.text().await.map_err(|e| TimingsError::Network {
                message: format!("failed to read response body: {}", e),
            }),
            Body::Synthetic(text) => Ok(text),
        }
    }

    /// Read and parse the body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> TimingsResult<T> {
        let url = self.url.clone().unwrap_or_else(|| "<synthetic>".to_string());
        let text = self.text().await?;
        serde_json::from_str(&text).map_err(|e| TimingsError::MalformedBody {
            url,
            message: e.to_string(),
        })
    }
}
