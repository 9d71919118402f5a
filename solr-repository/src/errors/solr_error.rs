//! Solr error types.
//!
//! This module defines the error types that can occur while talking to Solr.

use thiserror::Error;

/// Errors that can occur during Solr operations.
#[derive(Error, Debug, Clone)]
pub enum SolrError {
    /// Failed to reach the Solr server.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Select query execution failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// Update request (add, delete or commit) failed.
    #[error("Update error: {0}")]
    UpdateError(String),

    /// Failed to parse a response from Solr.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize a request body.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The client configuration is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SolrError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create an update error.
    pub fn update(msg: impl Into<String>) -> Self {
        Self::UpdateError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<serde_json::Error> for SolrError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
