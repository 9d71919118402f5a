//! Destination trait definition.

use async_trait::async_trait;

use crate::document::{DestinationObject, ReadDocument, WriteDocument};
use crate::errors::DestinationError;

/// Iterator over the objects already present in a destination.
pub type ObjectIter = Box<dyn Iterator<Item = ReadDocument> + Send>;

/// The operations a synchronization run performs against a destination.
///
/// Per source object the framework calls one of `create_object`,
/// `prepare_update` or `delete`, then `mark_updated` for writes, then
/// `after_object_processed`. `commit` is called once at the end of the run.
///
/// Implementations hold per-run state and are driven by a single caller.
#[async_trait]
pub trait Destination: Send {
    /// Existing objects of a class, ordered by object id ascending.
    async fn list_objects(&mut self, objectclass: &str) -> Result<ObjectIter, DestinationError>;

    /// A new, empty destination object for a source object.
    fn create_object(&self, object_id: i64, objectclass: &str) -> WriteDocument;

    /// A writable copy of an existing object.
    fn prepare_update(&self, existing: &ReadDocument) -> WriteDocument;

    /// Schedule an existing object for removal.
    fn delete(&mut self, existing: &ReadDocument) -> Result<(), DestinationError>;

    /// Schedule a written object for submission.
    fn mark_updated(&mut self, object: DestinationObject) -> Result<(), DestinationError>;

    /// Called once per processed source object.
    async fn after_object_processed(&mut self) -> Result<(), DestinationError>;

    /// Submit everything still pending.
    async fn commit(&mut self) -> Result<(), DestinationError>;

    /// The source object id a destination object belongs to.
    fn object_id_of(&self, existing: &ReadDocument) -> Result<i64, DestinationError>;
}
