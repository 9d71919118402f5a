//! Error types for the Solr repository.

mod solr_error;

pub use solr_error::SolrError;
