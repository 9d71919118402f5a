//! Configuration for the Solr destination.

mod dependencies;

pub use dependencies::{Dependencies, Settings};

use crate::errors::DestinationError;

/// Default number of pending changes that triggers a flush.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Default row cap when listing existing documents.
pub const DEFAULT_SELECT_LIMIT: u64 = 1_000_000;

/// What happens to pending changes when the update request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushPolicy {
    /// Drop pending changes whether or not Solr accepted them.
    ///
    /// A failed flush loses the batch; the error is still returned.
    #[default]
    ClearAlways,
    /// Keep pending changes when the request fails, so `commit` can retry them.
    RetainOnError,
}

/// Configuration for the Solr destination.
#[derive(Debug, Clone)]
pub struct DestinationConfig {
    /// Combined pending upserts and deletes that trigger a flush after an object is processed.
    pub batch_size: usize,
    /// Maximum number of rows requested when listing existing documents.
    pub select_limit: u64,
    /// Pending state handling on a failed flush.
    pub flush_policy: FlushPolicy,
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            select_limit: DEFAULT_SELECT_LIMIT,
            flush_policy: FlushPolicy::default(),
        }
    }
}

impl DestinationConfig {
    /// Create a config with a custom batch size.
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            batch_size,
            ..Self::default()
        }
    }

    /// Set the row cap for listing.
    pub fn select_limit(mut self, select_limit: u64) -> Self {
        self.select_limit = select_limit;
        self
    }

    /// Set the failed-flush policy.
    pub fn flush_policy(mut self, flush_policy: FlushPolicy) -> Self {
        self.flush_policy = flush_policy;
        self
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<(), DestinationError> {
        if self.batch_size == 0 {
            return Err(DestinationError::config("batch_size must be positive"));
        }
        if self.select_limit == 0 {
            return Err(DestinationError::config("select_limit must be positive"));
        }
        Ok(())
    }
}
