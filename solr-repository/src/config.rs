//! Configuration types for the HttpSolrClient.

use std::time::Duration;

use url::Url;

use crate::errors::SolrError;

/// Connection settings for a single Solr core.
#[derive(Debug, Clone)]
pub struct SolrConfig {
    /// Base URL of the Solr server, e.g. `http://localhost:8983/solr`.
    pub base_url: Url,
    /// Name of the core (or collection) documents are written to.
    pub core: String,
    /// Per-request timeout. `None` leaves the HTTP client default in place.
    pub timeout: Option<Duration>,
}

impl SolrConfig {
    /// Create a config for `core` on the server at `base_url`.
    pub fn new(base_url: &str, core: impl Into<String>) -> Result<Self, SolrError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| SolrError::invalid_config(format!("Invalid Solr URL: {}", e)))?;

        if base_url.cannot_be_a_base() {
            return Err(SolrError::invalid_config(format!(
                "Solr URL cannot be used as a base: {}",
                base_url
            )));
        }

        let core = core.into();
        if core.trim().is_empty() {
            return Err(SolrError::invalid_config("core name is required"));
        }

        Ok(Self {
            base_url,
            core,
            timeout: None,
        })
    }

    /// Set a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// URL of the core, always ending in a slash so handler paths can be joined onto it.
    pub fn core_url(&self) -> Result<Url, SolrError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        base.join(&format!("{}/", self.core.trim_matches('/')))
            .map_err(|e| SolrError::invalid_config(e.to_string()))
    }

    /// URL of a request handler below the core, e.g. `select` or `update`.
    pub fn handler_url(&self, handler: &str) -> Result<Url, SolrError> {
        self.core_url()?
            .join(handler)
            .map_err(|e| SolrError::invalid_config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_url_without_trailing_slash() {
        let config = SolrConfig::new("http://localhost:8983/solr", "content").unwrap();
        assert_eq!(
            config.core_url().unwrap().as_str(),
            "http://localhost:8983/solr/content/"
        );
    }

    #[test]
    fn test_core_url_with_trailing_slash() {
        let config = SolrConfig::new("http://localhost:8983/solr/", "content").unwrap();
        assert_eq!(
            config.handler_url("select").unwrap().as_str(),
            "http://localhost:8983/solr/content/select"
        );
        assert_eq!(
            config.handler_url("admin/ping").unwrap().as_str(),
            "http://localhost:8983/solr/content/admin/ping"
        );
    }

    #[test]
    fn test_invalid_url() {
        let result = SolrConfig::new("not a url", "content");
        assert!(matches!(result, Err(SolrError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_core() {
        let result = SolrConfig::new("http://localhost:8983/solr", "  ");
        assert!(matches!(result, Err(SolrError::InvalidConfig(_))));
    }

    #[test]
    fn test_with_timeout() {
        let config = SolrConfig::new("http://localhost:8983/solr", "content")
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }
}
