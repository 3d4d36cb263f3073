//! HTTP layer: the single GET primitive and the JSON status mapping.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{TimingsError, TimingsResult};

/// HTTP backend for making requests (holds the reqwest client).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
}

impl HttpBackend {
    /// Issue a GET and return the response whatever its status.
    pub(crate) async fn get(&self, url: &str) -> TimingsResult<reqwest::Response> {
        debug!(url = %url, "GET");
        let response = self.client.get(url).send().await?;
        debug!(url = %url, status = response.status().as_u16(), "response");
        Ok(response)
    }

    /// GET and decode JSON; `Ok(None)` for any non-2xx status.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> TimingsResult<Option<T>> {
        let response = self.get(url).await?;
        let status = response.status();

        if !status.is_success() {
            debug!(url = %url, status = status.as_u16(), "no data");
            return Ok(None);
        }

        let text = response.text().await.map_err(|e| TimingsError::Network {
            message: format!("failed to read response body: {}", e),
        })?;

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| TimingsError::MalformedBody {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}
