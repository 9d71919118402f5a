//! Solr client trait definition.
//!
//! This module defines the abstract interface the destination uses to talk to
//! Solr, so the HTTP implementation can be swapped for a mock in tests.

use async_trait::async_trait;

use crate::errors::SolrError;
use crate::types::{SelectQuery, SelectResponse, UpdateRequest};

/// Abstract interface for Solr operations.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, SolrError>`. Implementations do not retry;
/// callers decide what a failure means for their run.
#[async_trait]
pub trait SolrClient: Send + Sync {
    /// Execute a select query against the core.
    ///
    /// # Arguments
    ///
    /// * `query` - Query string, sort, field projection and paging
    ///
    /// # Returns
    ///
    /// * `Ok(SelectResponse)` - Total match count and the returned documents
    /// * `Err(SolrError)` - If the query is rejected or the server is unreachable
    async fn select(&self, query: &SelectQuery) -> Result<SelectResponse, SolrError>;

    /// Execute a combined update request as a single round trip.
    ///
    /// # Arguments
    ///
    /// * `request` - Deletions, additions and an optional commit directive
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If Solr accepted the whole request
    /// * `Err(SolrError)` - If the request failed
    async fn update(&self, request: &UpdateRequest) -> Result<(), SolrError>;

    /// Check if the core is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the ping handler reports OK
    /// * `Ok(false)` - If Solr answered but reported a problem
    /// * `Err(SolrError)` - If the ping could not be executed
    async fn ping(&self) -> Result<bool, SolrError>;
}
