//! Documents exchanged with the synchronization framework.
//!
//! Documents read back from Solr and documents about to be submitted are
//! distinct types. Both expose their fields through [`Fields`], and
//! [`WriteDocument::from_existing`] is the only way to turn one into the other.

mod objectclass;

pub use objectclass::{composite_id, normalize_objectclass};

use serde_json::Value;
use solr_repository::SolrDoc;

use crate::errors::DestinationError;

/// Unique key field holding the composite id.
pub const ID_FIELD: &str = "id";
/// Numeric id of the source object.
pub const OBJECT_ID_FIELD: &str = "objectid";
/// Normalized objectclass used to scope queries.
pub const OBJECTCLASS_FIELD: &str = "objectclass";
/// Content hash the framework may compare to skip unchanged objects.
pub const HASH_FIELD: &str = "hash";

/// Read access to a document's field mapping.
pub trait Fields {
    /// The underlying field mapping.
    fn fields(&self) -> &SolrDoc;

    /// Look up a single field.
    fn get(&self, name: &str) -> Option<&Value> {
        self.fields().get(name)
    }

    /// The composite id, if present and a string.
    fn composite_id(&self) -> Option<&str> {
        self.get(ID_FIELD).and_then(Value::as_str)
    }

    /// The normalized objectclass, if present.
    fn objectclass(&self) -> Option<&str> {
        self.get(OBJECTCLASS_FIELD).and_then(Value::as_str)
    }

    /// The stored content hash, if present.
    fn hash(&self) -> Option<&str> {
        self.get(HASH_FIELD).and_then(Value::as_str)
    }

    /// The numeric object id.
    ///
    /// Integer values and strings holding an integer are accepted; anything
    /// else, including a missing field, is an invalid argument.
    fn object_id(&self) -> Result<i64, DestinationError> {
        match self.get(OBJECT_ID_FIELD) {
            Some(Value::Number(n)) => n.as_i64().ok_or_else(|| {
                DestinationError::invalid_argument(format!("objectid {} is not an integer", n))
            }),
            Some(Value::String(s)) => s.parse().map_err(|_| {
                DestinationError::invalid_argument(format!("objectid {:?} is not an integer", s))
            }),
            Some(other) => Err(DestinationError::invalid_argument(format!(
                "objectid has unexpected type: {}",
                other
            ))),
            None => Err(DestinationError::invalid_argument(
                "document has no objectid field",
            )),
        }
    }
}

/// A document as returned by a select against the index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadDocument {
    fields: SolrDoc,
}

impl ReadDocument {
    pub fn new(fields: SolrDoc) -> Self {
        Self { fields }
    }
}

impl From<SolrDoc> for ReadDocument {
    fn from(fields: SolrDoc) -> Self {
        Self::new(fields)
    }
}

impl Fields for ReadDocument {
    fn fields(&self) -> &SolrDoc {
        &self.fields
    }
}

/// A document being prepared for submission to the index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WriteDocument {
    fields: SolrDoc,
}

impl WriteDocument {
    /// A fresh document carrying the composite id, object id and normalized objectclass.
    pub fn new(object_id: i64, objectclass: &str) -> Self {
        let objectclass = normalize_objectclass(objectclass);
        let mut fields = SolrDoc::new();
        fields.insert(
            ID_FIELD.to_string(),
            Value::String(composite_id(&objectclass, object_id)),
        );
        fields.insert(OBJECT_ID_FIELD.to_string(), Value::from(object_id));
        fields.insert(OBJECTCLASS_FIELD.to_string(), Value::String(objectclass));
        Self { fields }
    }

    /// A writable copy of an existing document.
    ///
    /// Every field is carried over, so fields the mapper does not touch survive the update.
    pub fn from_existing(existing: &ReadDocument) -> Self {
        Self {
            fields: existing.fields.clone(),
        }
    }

    pub(crate) fn from_fields(fields: SolrDoc) -> Self {
        Self { fields }
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Consume the document into its field mapping.
    pub fn into_fields(self) -> SolrDoc {
        self.fields
    }
}

impl Fields for WriteDocument {
    fn fields(&self) -> &SolrDoc {
        &self.fields
    }
}

/// Whatever the framework hands back to the destination for an object.
///
/// The framework only sees destination objects opaquely, so it may pass an
/// existing document where a writable one is expected.
#[derive(Debug, Clone, PartialEq)]
pub enum DestinationObject {
    Existing(ReadDocument),
    Writable(WriteDocument),
}

impl From<ReadDocument> for DestinationObject {
    fn from(document: ReadDocument) -> Self {
        Self::Existing(document)
    }
}

impl From<WriteDocument> for DestinationObject {
    fn from(document: WriteDocument) -> Self {
        Self::Writable(document)
    }
}
