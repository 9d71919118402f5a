//! Request and response types for Solr operations.

use std::fmt;

use serde_json::{Map, Value};

/// A Solr document as a flat mapping from field name to value.
pub type SolrDoc = Map<String, Value>;

/// Sort direction for a select query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// A select request against a core.
///
/// `query` is passed through verbatim as Solr's `q` parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    /// The `q` parameter.
    pub query: String,
    /// Sort clauses, applied in order.
    pub sort: Vec<(String, SortDirection)>,
    /// Field projection (`fl`). Empty means all stored fields.
    pub fields: Vec<String>,
    /// Offset of the first row.
    pub start: u64,
    /// Maximum number of rows returned.
    pub rows: u64,
}

impl SelectQuery {
    /// Create a query with Solr's default paging (10 rows from offset 0).
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            sort: Vec::new(),
            fields: Vec::new(),
            start: 0,
            rows: 10,
        }
    }

    /// Add a sort clause.
    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort.push((field.into(), direction));
        self
    }

    /// Restrict the returned fields.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the row limit.
    pub fn with_rows(mut self, rows: u64) -> Self {
        self.rows = rows;
        self
    }
}

/// The result of a select request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectResponse {
    /// Total number of matching documents, regardless of `rows`.
    pub num_found: u64,
    /// The returned documents, in the requested order.
    pub docs: Vec<SolrDoc>,
}

/// A combined update request executed as one round trip.
///
/// Deletions are applied before additions, then the commit (if requested).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateRequest {
    /// Unique keys of documents to delete.
    pub delete_ids: Vec<String>,
    /// Documents to add or replace.
    pub add_docs: Vec<SolrDoc>,
    /// Whether to issue a hard commit after the changes.
    pub commit: bool,
}

impl UpdateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a delete-by-id instruction.
    pub fn delete_by_ids(mut self, ids: Vec<String>) -> Self {
        self.delete_ids.extend(ids);
        self
    }

    /// Add an add-documents instruction.
    pub fn add_documents(mut self, docs: Vec<SolrDoc>) -> Self {
        self.add_docs.extend(docs);
        self
    }

    /// Request a commit after the changes.
    pub fn with_commit(mut self) -> Self {
        self.commit = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_select_query_builder() {
        let query = SelectQuery::new("objectclass:Foo-Bar")
            .sort_by("objectid", SortDirection::Asc)
            .with_fields(["id", "objectid"])
            .with_rows(500);

        assert_eq!(query.query, "objectclass:Foo-Bar");
        assert_eq!(query.sort, vec![("objectid".to_string(), SortDirection::Asc)]);
        assert_eq!(query.fields, vec!["id".to_string(), "objectid".to_string()]);
        assert_eq!(query.rows, 500);
        assert_eq!(query.start, 0);
    }

    #[test]
    fn test_update_request_builder() {
        let mut doc = SolrDoc::new();
        doc.insert("id".to_string(), json!("Foo:1"));

        let request = UpdateRequest::new()
            .delete_by_ids(vec!["Foo:2".to_string()])
            .add_documents(vec![doc])
            .with_commit();

        assert_eq!(request.delete_ids, vec!["Foo:2".to_string()]);
        assert_eq!(request.add_docs.len(), 1);
        assert!(request.commit);
    }

    #[test]
    fn test_sort_direction_display() {
        assert_eq!(SortDirection::Asc.to_string(), "asc");
        assert_eq!(SortDirection::Desc.to_string(), "desc");
    }
}
