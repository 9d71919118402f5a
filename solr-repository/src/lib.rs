//! # Solr Repository
//!
//! This crate provides the client interface used to talk to a Solr core,
//! the request and response types it exchanges, and a concrete
//! implementation over Solr's JSON HTTP API.

pub mod config;
pub mod errors;
pub mod http;
pub mod interfaces;
pub mod types;

pub use config::SolrConfig;
pub use errors::SolrError;
pub use http::HttpSolrClient;
pub use interfaces::SolrClient;
pub use types::{SelectQuery, SelectResponse, SolrDoc, SortDirection, UpdateRequest};
