//! Interface definitions for the Solr client.
//!
//! This module defines the abstract `SolrClient` trait that allows for
//! dependency injection and mock implementations in tests.

mod solr_client;

pub use solr_client::SolrClient;
