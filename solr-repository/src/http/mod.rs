//! HTTP implementation of the Solr client.
//!
//! This module provides a concrete implementation of `SolrClient` using
//! Solr's JSON request handlers.

mod client;
pub mod queries;

pub use client::HttpSolrClient;
