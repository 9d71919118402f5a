//! Solr HTTP client implementation.
//!
//! This module provides the concrete implementation of `SolrClient` over
//! Solr's JSON HTTP API.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::config::SolrConfig;
use crate::errors::SolrError;
use crate::http::queries::{
    build_select_params, build_update_body, build_update_params, error_message,
    parse_ping_response, parse_select_response,
};
use crate::interfaces::SolrClient;
use crate::types::{SelectQuery, SelectResponse, UpdateRequest};

/// Solr client talking to one core over HTTP.
///
/// # Example
///
/// ```ignore
/// let config = SolrConfig::new("http://localhost:8983/solr", "content")?;
/// let client = HttpSolrClient::new(config)?;
///
/// let request = UpdateRequest::new()
///     .delete_by_ids(vec!["Foo:1".to_string()])
///     .with_commit();
/// client.update(&request).await?;
/// ```
pub struct HttpSolrClient {
    client: Client,
    config: SolrConfig,
}

impl HttpSolrClient {
    /// Create a new client for the configured core.
    ///
    /// No request is made; use `ping` to verify the server is reachable.
    pub fn new(config: SolrConfig) -> Result<Self, SolrError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SolrError::connection(e.to_string()))?;

        info!(
            url = %config.base_url,
            core = %config.core,
            "Created Solr client"
        );

        Ok(Self { client, config })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &SolrConfig {
        &self.config
    }

    /// Read a response body as JSON, turning non-success statuses into errors.
    async fn json_body(
        response: Response,
        to_error: fn(String) -> SolrError,
    ) -> Result<Value, SolrError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SolrError::connection(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::status_error(status, &text, to_error));
        }

        serde_json::from_str(&text).map_err(|e| SolrError::parse(e.to_string()))
    }

    fn status_error(status: StatusCode, body: &str, to_error: fn(String) -> SolrError) -> SolrError {
        let message = error_message(body).unwrap_or_else(|| body.to_string());
        error!(status = %status, body = %message, "Solr request failed");
        to_error(format!("Solr responded with status {}: {}", status, message))
    }
}

#[async_trait]
impl SolrClient for HttpSolrClient {
    #[instrument(skip(self, query), fields(q = %query.query, rows = query.rows))]
    async fn select(&self, query: &SelectQuery) -> Result<SelectResponse, SolrError> {
        let url = self.config.handler_url("select")?;
        let params = build_select_params(query);

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| SolrError::connection(e.to_string()))?;

        let body = Self::json_body(response, SolrError::QueryError).await?;
        let result = parse_select_response(&body)?;

        debug!(
            num_found = result.num_found,
            returned = result.docs.len(),
            "Select completed"
        );
        Ok(result)
    }

    #[instrument(
        skip(self, request),
        fields(deletes = request.delete_ids.len(), adds = request.add_docs.len(), commit = request.commit)
    )]
    async fn update(&self, request: &UpdateRequest) -> Result<(), SolrError> {
        let url = self.config.handler_url("update")?;
        let body = build_update_body(request)?;

        let response = self
            .client
            .post(url)
            .query(&build_update_params())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| SolrError::connection(e.to_string()))?;

        Self::json_body(response, SolrError::UpdateError).await?;

        debug!("Update request accepted");
        Ok(())
    }

    async fn ping(&self) -> Result<bool, SolrError> {
        let url = self.config.handler_url("admin/ping")?;

        let response = self
            .client
            .get(url)
            .query(&[("wt", "json")])
            .send()
            .await
            .map_err(|e| SolrError::connection(e.to_string()))?;

        if response.status() == StatusCode::SERVICE_UNAVAILABLE {
            return Ok(false);
        }

        let body = Self::json_body(response, SolrError::QueryError).await?;
        Ok(parse_ping_response(&body))
    }
}
