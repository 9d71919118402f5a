//! Environment-driven wiring of the Solr destination.

use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::{DestinationConfig, DEFAULT_BATCH_SIZE};
use crate::destination::SolrDestination;
use crate::errors::DestinationError;
use solr_repository::{HttpSolrClient, SolrClient, SolrConfig};

/// Default Solr base URL.
const DEFAULT_SOLR_URL: &str = "http://localhost:8983/solr";

/// Default Solr core.
const DEFAULT_SOLR_CORE: &str = "content";

/// Settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub solr_url: String,
    pub solr_core: String,
    pub batch_size: usize,
    pub timeout: Option<Duration>,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `SOLR_URL`: Solr base URL (default: http://localhost:8983/solr)
    /// - `SOLR_CORE`: core to synchronize into (default: content)
    /// - `SOLR_BATCH_SIZE`: pending changes per flush (default: 20)
    /// - `SOLR_TIMEOUT_MS`: per-request timeout in milliseconds (default: none)
    pub fn from_env() -> Result<Self, DestinationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DestinationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let solr_url = lookup("SOLR_URL").unwrap_or_else(|| DEFAULT_SOLR_URL.to_string());
        let solr_core = lookup("SOLR_CORE").unwrap_or_else(|| DEFAULT_SOLR_CORE.to_string());

        let batch_size = match lookup("SOLR_BATCH_SIZE") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                DestinationError::config(format!("Invalid SOLR_BATCH_SIZE {:?}: {}", raw, e))
            })?,
            None => DEFAULT_BATCH_SIZE,
        };

        let timeout = lookup("SOLR_TIMEOUT_MS")
            .map(|raw| {
                raw.trim().parse::<u64>().map(Duration::from_millis).map_err(|e| {
                    DestinationError::config(format!("Invalid SOLR_TIMEOUT_MS {:?}: {}", raw, e))
                })
            })
            .transpose()?;

        Ok(Self {
            solr_url,
            solr_core,
            batch_size,
            timeout,
        })
    }

    /// The Solr connection part of the settings.
    pub fn solr_config(&self) -> Result<SolrConfig, DestinationError> {
        let config = SolrConfig::new(&self.solr_url, self.solr_core.clone())?;
        Ok(match self.timeout {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        })
    }

    /// The destination part of the settings.
    pub fn destination_config(&self) -> DestinationConfig {
        DestinationConfig::with_batch_size(self.batch_size)
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The destination, ready to be driven by a synchronization run.
    pub destination: SolrDestination,
}

impl Dependencies {
    /// Initialize all dependencies from the environment.
    ///
    /// A `.env` file in the working directory is loaded first if present. The
    /// Solr core is pinged before the destination is handed out.
    pub async fn from_env() -> Result<Self, DestinationError> {
        dotenv::dotenv().ok();
        let settings = Settings::from_env()?;

        info!(
            solr_url = %settings.solr_url,
            solr_core = %settings.solr_core,
            batch_size = settings.batch_size,
            "Initializing dependencies"
        );

        let client = HttpSolrClient::new(settings.solr_config()?).map_err(|e| {
            DestinationError::config(format!("Failed to create Solr client: {}", e))
        })?;

        Self::with_client(Arc::new(client), settings.destination_config()).await
    }

    /// Wire a destination around an existing client, verifying it is reachable.
    pub async fn with_client(
        client: Arc<dyn SolrClient>,
        config: DestinationConfig,
    ) -> Result<Self, DestinationError> {
        let healthy = client
            .ping()
            .await
            .map_err(|e| DestinationError::config(format!("Solr ping failed: {}", e)))?;

        if !healthy {
            return Err(DestinationError::config("Solr core is unhealthy"));
        }

        info!("Solr connection verified");

        let destination = SolrDestination::with_config(client, config)?;

        Ok(Self { destination })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use solr_repository::{SelectQuery, SelectResponse, SolrError, UpdateRequest};
    use std::collections::HashMap;

    struct PingClient {
        healthy: bool,
    }

    #[async_trait]
    impl SolrClient for PingClient {
        async fn select(&self, _query: &SelectQuery) -> Result<SelectResponse, SolrError> {
            Ok(SelectResponse::default())
        }

        async fn update(&self, _request: &UpdateRequest) -> Result<(), SolrError> {
            Ok(())
        }

        async fn ping(&self) -> Result<bool, SolrError> {
            Ok(self.healthy)
        }
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();

        assert_eq!(settings.solr_url, "http://localhost:8983/solr");
        assert_eq!(settings.solr_core, "content");
        assert_eq!(settings.batch_size, 20);
        assert_eq!(settings.timeout, None);
    }

    #[test]
    fn test_settings_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("SOLR_URL", "http://solr:8983/solr"),
            ("SOLR_CORE", "articles"),
            ("SOLR_BATCH_SIZE", "50"),
            ("SOLR_TIMEOUT_MS", "1500"),
        ]))
        .unwrap();

        assert_eq!(settings.solr_url, "http://solr:8983/solr");
        assert_eq!(settings.solr_core, "articles");
        assert_eq!(settings.batch_size, 50);
        assert_eq!(settings.timeout, Some(Duration::from_millis(1500)));

        let solr_config = settings.solr_config().unwrap();
        assert_eq!(solr_config.core, "articles");
        assert_eq!(solr_config.timeout, Some(Duration::from_millis(1500)));
        assert_eq!(settings.destination_config().batch_size, 50);
    }

    #[test]
    fn test_settings_invalid_batch_size() {
        let result = Settings::from_lookup(lookup(&[("SOLR_BATCH_SIZE", "lots")]));
        assert!(matches!(result, Err(DestinationError::ConfigError(_))));
    }

    #[test]
    fn test_settings_invalid_timeout() {
        let result = Settings::from_lookup(lookup(&[("SOLR_TIMEOUT_MS", "-1")]));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_with_client_healthy() {
        let deps = Dependencies::with_client(
            Arc::new(PingClient { healthy: true }),
            DestinationConfig::with_batch_size(3),
        )
        .await
        .unwrap();

        assert_eq!(deps.destination.config().batch_size, 3);
    }

    #[tokio::test]
    async fn test_with_client_unhealthy() {
        let result = Dependencies::with_client(
            Arc::new(PingClient { healthy: false }),
            DestinationConfig::default(),
        )
        .await;

        assert!(matches!(result, Err(DestinationError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_with_client_rejects_zero_batch_size() {
        let result = Dependencies::with_client(
            Arc::new(PingClient { healthy: true }),
            DestinationConfig::with_batch_size(0),
        )
        .await;

        assert!(result.is_err());
    }
}
