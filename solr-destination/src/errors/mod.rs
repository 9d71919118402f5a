//! Error types for the Solr destination.

use solr_repository::SolrError;
use thiserror::Error;

/// Errors that can occur while driving the Solr destination.
#[derive(Error, Debug)]
pub enum DestinationError {
    /// A caller passed a value the operation cannot accept.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error from the Solr client, passed through unchanged.
    #[error("Solr error: {0}")]
    SolrError(#[from] SolrError),
}

impl DestinationError {
    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
