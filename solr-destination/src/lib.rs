//! # Solr Destination
//!
//! This crate connects a content synchronization run to a Solr core.
//!
//! ## Flow
//!
//! For every objectclass the run lists the documents already indexed, then
//! walks the source objects:
//!
//! 1. **Create / update / delete**: new documents are built, existing ones copied
//!    for update, vanished ones scheduled for deletion
//! 2. **Mark updated**: written documents join the pending batch
//! 3. **After object processed**: the batch is flushed once it reaches the batch size
//! 4. **Commit**: whatever is left is flushed at the end of the run
//!
//! Each flush is one Solr update request carrying deletions, additions and a commit.

pub mod config;
pub mod destination;
pub mod document;
pub mod errors;
pub mod interfaces;

pub use config::{Dependencies, DestinationConfig, FlushPolicy};
pub use destination::{ExistingObjects, FlushSummary, SolrDestination};
pub use document::{DestinationObject, Fields, ReadDocument, WriteDocument};
pub use errors::DestinationError;
pub use interfaces::Destination;
