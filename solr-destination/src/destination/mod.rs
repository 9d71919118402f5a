//! Solr destination for content synchronization runs.
//!
//! Accumulates document upserts and deletions and submits them to Solr in
//! combined update requests.

use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use async_trait::async_trait;

use crate::config::{DestinationConfig, FlushPolicy};
use crate::document::{
    normalize_objectclass, DestinationObject, Fields, ReadDocument, WriteDocument, HASH_FIELD,
    ID_FIELD, OBJECTCLASS_FIELD, OBJECT_ID_FIELD,
};
use crate::errors::DestinationError;
use crate::interfaces::{Destination, ObjectIter};
use solr_repository::http::queries::quote_term;
use solr_repository::{SelectQuery, SolrClient, SolrDoc, SortDirection, UpdateRequest};

/// Counts of the most recent update request that was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushSummary {
    /// Ids submitted for deletion.
    pub deleted: usize,
    /// Documents submitted for indexing.
    pub upserted: usize,
}

/// Existing documents returned by [`SolrDestination::list_objects`].
#[derive(Debug)]
pub struct ExistingObjects {
    total: u64,
    docs: std::vec::IntoIter<SolrDoc>,
}

impl ExistingObjects {
    /// Number of matches Solr reported, which may exceed what was returned.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// True when Solr matched more documents than the select limit returned.
    pub fn is_truncated(&self) -> bool {
        self.total > self.docs.len() as u64
    }
}

impl Iterator for ExistingObjects {
    type Item = ReadDocument;

    fn next(&mut self) -> Option<Self::Item> {
        self.docs.next().map(ReadDocument::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.docs.size_hint()
    }
}

impl ExactSizeIterator for ExistingObjects {}

/// Destination that writes synchronized objects into a Solr core.
///
/// The destination is responsible for:
/// - Listing the documents already indexed for an objectclass
/// - Building new and updated documents
/// - Batching upserts and deletions and flushing them in one request
///
/// One instance serves one synchronization run.
pub struct SolrDestination {
    client: Arc<dyn SolrClient>,
    config: DestinationConfig,
    pending_docs: Vec<WriteDocument>,
    pending_deletes: Vec<String>,
    last_flush: Option<FlushSummary>,
}

impl SolrDestination {
    /// Create a new destination with the default configuration.
    pub fn new(client: Arc<dyn SolrClient>) -> Self {
        Self {
            client,
            config: DestinationConfig::default(),
            pending_docs: Vec::new(),
            pending_deletes: Vec::new(),
            last_flush: None,
        }
    }

    /// Create a new destination with custom configuration.
    pub fn with_config(
        client: Arc<dyn SolrClient>,
        config: DestinationConfig,
    ) -> Result<Self, DestinationError> {
        config.validate()?;
        let batch_size = config.batch_size;
        Ok(Self {
            client,
            config,
            pending_docs: Vec::with_capacity(batch_size),
            pending_deletes: Vec::new(),
            last_flush: None,
        })
    }

    pub fn config(&self) -> &DestinationConfig {
        &self.config
    }

    /// List the documents already indexed for `objectclass`, ordered by object id.
    ///
    /// Only the id, object id, objectclass and hash fields are fetched, and at
    /// most `select_limit` documents are returned. A listing cut short by the
    /// limit is logged as a warning and reported by
    /// [`ExistingObjects::is_truncated`].
    #[instrument(skip(self))]
    pub async fn list_objects(
        &self,
        objectclass: &str,
    ) -> Result<ExistingObjects, DestinationError> {
        let objectclass = normalize_objectclass(objectclass);
        let filter = format!("{}:{}", OBJECTCLASS_FIELD, quote_term(&objectclass));
        let query = SelectQuery::new(filter)
            .sort_by(OBJECT_ID_FIELD, SortDirection::Asc)
            .with_fields([ID_FIELD, OBJECT_ID_FIELD, OBJECTCLASS_FIELD, HASH_FIELD])
            .with_rows(self.config.select_limit);

        let response = self.client.select(&query).await?;

        info!(
            objectclass = %objectclass,
            count = response.num_found,
            "Found existing objects in Solr"
        );

        let objects = ExistingObjects {
            total: response.num_found,
            docs: response.docs.into_iter(),
        };

        if objects.is_truncated() {
            warn!(
                objectclass = %objectclass,
                num_found = objects.total(),
                returned = objects.len(),
                select_limit = self.config.select_limit,
                "Existing object listing truncated by select limit"
            );
        }

        Ok(objects)
    }

    /// A new document for the source object `object_id` of class `objectclass`.
    pub fn create_document(&self, object_id: i64, objectclass: &str) -> WriteDocument {
        WriteDocument::new(object_id, objectclass)
    }

    /// A writable copy of an existing document.
    pub fn prepare_update(&self, existing: &ReadDocument) -> WriteDocument {
        WriteDocument::from_existing(existing)
    }

    /// Schedule an existing document for deletion.
    pub fn delete(&mut self, existing: &ReadDocument) -> Result<(), DestinationError> {
        let id = existing
            .composite_id()
            .ok_or_else(|| DestinationError::invalid_argument("document has no id field"))?;

        debug!(id = %id, "Scheduling deletion");
        self.pending_deletes.push(id.to_string());
        Ok(())
    }

    /// Schedule a written document for submission.
    ///
    /// Only writable documents are accepted; passing an existing document is
    /// an invalid argument and leaves the pending set untouched.
    pub fn mark_updated(
        &mut self,
        object: impl Into<DestinationObject>,
    ) -> Result<(), DestinationError> {
        match object.into() {
            DestinationObject::Writable(document) => {
                debug!(id = ?document.composite_id(), "Scheduling upsert");
                self.pending_docs.push(document);
                Ok(())
            }
            DestinationObject::Existing(document) => Err(DestinationError::invalid_argument(
                format!(
                    "expected a writable document, got an existing one (id {:?})",
                    document.composite_id()
                ),
            )),
        }
    }

    /// Flush if the pending changes have reached the batch size.
    pub async fn after_object_processed(&mut self) -> Result<(), DestinationError> {
        if self.pending_len() >= self.config.batch_size {
            self.flush().await?;
        }
        Ok(())
    }

    /// Flush all pending changes, whatever their number.
    pub async fn commit(&mut self) -> Result<(), DestinationError> {
        self.flush().await
    }

    /// The object id stored in a document.
    pub fn id_of(&self, document: &impl Fields) -> Result<i64, DestinationError> {
        document.object_id()
    }

    /// Documents waiting to be indexed.
    pub fn pending_upserts(&self) -> &[WriteDocument] {
        &self.pending_docs
    }

    /// Ids waiting to be deleted.
    pub fn pending_deletes(&self) -> &[String] {
        &self.pending_deletes
    }

    /// Combined number of pending upserts and deletions.
    pub fn pending_len(&self) -> usize {
        self.pending_docs.len() + self.pending_deletes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending_docs.is_empty() && self.pending_deletes.is_empty()
    }

    /// Counts of the last update request that was sent, if any.
    pub fn last_flush(&self) -> Option<FlushSummary> {
        self.last_flush
    }

    /// Send all pending changes to Solr in a single update request with commit.
    #[instrument(skip(self))]
    async fn flush(&mut self) -> Result<(), DestinationError> {
        if self.is_empty() {
            return Ok(());
        }

        let deletes = std::mem::take(&mut self.pending_deletes);
        let docs = std::mem::take(&mut self.pending_docs);
        let summary = FlushSummary {
            deleted: deletes.len(),
            upserted: docs.len(),
        };

        info!(
            deletes = summary.deleted,
            upserts = summary.upserted,
            "Flushing pending changes to Solr"
        );

        let mut request = UpdateRequest::new();
        if !deletes.is_empty() {
            request = request.delete_by_ids(deletes);
        }
        if !docs.is_empty() {
            request = request.add_documents(
                docs.into_iter().map(WriteDocument::into_fields).collect(),
            );
        }
        let request = request.with_commit();

        let result = self.client.update(&request).await;
        self.last_flush = Some(summary);

        match result {
            Ok(()) => {
                debug!(
                    deletes = summary.deleted,
                    upserts = summary.upserted,
                    "Flush completed"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    error = %e,
                    deletes = summary.deleted,
                    upserts = summary.upserted,
                    policy = ?self.config.flush_policy,
                    "Flush failed"
                );

                if self.config.flush_policy == FlushPolicy::RetainOnError {
                    let UpdateRequest {
                        delete_ids,
                        add_docs,
                        ..
                    } = request;
                    self.pending_deletes = delete_ids;
                    self.pending_docs = add_docs
                        .into_iter()
                        .map(WriteDocument::from_fields)
                        .collect();
                }

                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl Destination for SolrDestination {
    async fn list_objects(&mut self, objectclass: &str) -> Result<ObjectIter, DestinationError> {
        let objects = SolrDestination::list_objects(self, objectclass).await?;
        Ok(Box::new(objects))
    }

    fn create_object(&self, object_id: i64, objectclass: &str) -> WriteDocument {
        self.create_document(object_id, objectclass)
    }

    fn prepare_update(&self, existing: &ReadDocument) -> WriteDocument {
        SolrDestination::prepare_update(self, existing)
    }

    fn delete(&mut self, existing: &ReadDocument) -> Result<(), DestinationError> {
        SolrDestination::delete(self, existing)
    }

    fn mark_updated(&mut self, object: DestinationObject) -> Result<(), DestinationError> {
        SolrDestination::mark_updated(self, object)
    }

    async fn after_object_processed(&mut self) -> Result<(), DestinationError> {
        SolrDestination::after_object_processed(self).await
    }

    async fn commit(&mut self) -> Result<(), DestinationError> {
        SolrDestination::commit(self).await
    }

    fn object_id_of(&self, existing: &ReadDocument) -> Result<i64, DestinationError> {
        self.id_of(existing)
    }
}
