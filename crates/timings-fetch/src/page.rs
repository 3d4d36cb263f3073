//! Dashboard page context.
//!
//! The page URL decides the resolution mode (scheme), the upstream
//! repository namespace (host) and the default harness for `index.json`
//! (`kind` query parameter). It is resolved once and handed to the resolver.

use url::Url;

use crate::error::{TimingsError, TimingsResult};

/// Where data files are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `https` page: resolve through CI services.
    Remote,
    /// Any other scheme: read `data/<filename>` next to the page.
    Local,
}

/// Deployment the page is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    PublicDemo,
    Default,
}

impl Environment {
    /// Repository namespace used for "latest" index artifacts.
    pub fn repository(&self) -> &'static str {
        match self {
            Self::PublicDemo => "try",
            Self::Default => "mozilla-central",
        }
    }
}

/// Inputs derived from the dashboard page URL.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub mode: Mode,
    pub environment: Environment,
    pub kind: Option<String>,
    pub base_url: Url,
}

impl PageContext {
    /// Resolve the context from the page URL.
    pub fn from_url(page_url: &str, public_demo_host: Option<&str>) -> TimingsResult<Self> {
        let base_url = Url::parse(page_url).map_err(|e| TimingsError::Config {
            message: format!("invalid page url {}: {}", page_url, e),
        })?;

        let mode = if base_url.scheme() == "https" {
            Mode::Remote
        } else {
            Mode::Local
        };

        let environment = match (base_url.host_str(), public_demo_host) {
            (Some(host), Some(demo)) if host.eq_ignore_ascii_case(demo) => Environment::PublicDemo,
            _ => Environment::Default,
        };

        let kind = base_url
            .query_pairs()
            .find(|(key, _)| key == "kind")
            .map(|(_, value)| value.into_owned());

        Ok(Self {
            mode,
            environment,
            kind,
            base_url,
        })
    }

    /// Remote-mode context with no `kind` parameter.
    pub fn remote(environment: Environment) -> Self {
        Self {
            mode: Mode::Remote,
            environment,
            kind: None,
            base_url: Url::parse("https://localhost/").expect("static url"),
        }
    }

    /// Local-mode context serving data relative to `base_url`.
    pub fn local(base_url: Url) -> Self {
        Self {
            mode: Mode::Local,
            environment: Environment::Default,
            kind: None,
            base_url,
        }
    }

    /// Set the `kind` parameter.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Override the deployment environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// URL of a data file in local mode.
    pub fn local_data_url(&self, filename: &str) -> TimingsResult<Url> {
        self.base_url
            .join(&format!("data/{}", filename))
            .map_err(|e| TimingsError::Config {
                message: format!("invalid local data path for {}: {}", filename, e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_page_is_remote() {
        let page = PageContext::from_url("https://dash.example.org/?kind=mochitest", None).unwrap();
        assert_eq!(page.mode, Mode::Remote);
        assert_eq!(page.environment, Environment::Default);
        assert_eq!(page.kind.as_deref(), Some("mochitest"));
    }

    #[test]
    fn test_http_page_is_local() {
        let page = PageContext::from_url("http://localhost:8000/index.html", None).unwrap();
        assert_eq!(page.mode, Mode::Local);
        assert!(page.kind.is_none());
        assert_eq!(
            page.local_data_url("xpcshell-foo.json").unwrap().as_str(),
            "http://localhost:8000/data/xpcshell-foo.json"
        );
    }

    #[test]
    fn test_demo_host_selects_try_repository() {
        let page =
            PageContext::from_url("https://demo.example.org/timings/", Some("demo.example.org"))
                .unwrap();
        assert_eq!(page.environment, Environment::PublicDemo);
        assert_eq!(page.environment.repository(), "try");

        let other =
            PageContext::from_url("https://other.example.org/", Some("demo.example.org")).unwrap();
        assert_eq!(other.environment.repository(), "mozilla-central");
    }

    #[test]
    fn test_local_data_url_is_relative_to_page_directory() {
        let page = PageContext::from_url("http://localhost:8000/timings/index.html", None).unwrap();
        assert_eq!(
            page.local_data_url("index.json").unwrap().as_str(),
            "http://localhost:8000/timings/data/index.json"
        );
    }

    #[test]
    fn test_invalid_page_url() {
        let err = PageContext::from_url("not a url", None).unwrap_err();
        assert!(matches!(err, TimingsError::Config { .. }));
    }
}
