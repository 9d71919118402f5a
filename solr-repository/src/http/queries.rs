//! Solr request builders and response parsers.
//!
//! Kept free of any I/O so the exact request shapes can be tested without a
//! running server.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::SolrError;
use crate::types::{SelectQuery, SelectResponse, SolrDoc, UpdateRequest};

/// Build the query-string parameters for a select request.
pub fn build_select_params(query: &SelectQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("q", query.query.clone()),
        ("start", query.start.to_string()),
        ("rows", query.rows.to_string()),
        ("wt", "json".to_string()),
    ];

    if !query.sort.is_empty() {
        let sort = query
            .sort
            .iter()
            .map(|(field, direction)| format!("{} {}", field, direction))
            .collect::<Vec<_>>()
            .join(",");
        params.push(("sort", sort));
    }

    if !query.fields.is_empty() {
        params.push(("fl", query.fields.join(",")));
    }

    params
}

/// Build the query-string parameters for an update request.
pub fn build_update_params() -> Vec<(&'static str, String)> {
    vec![("wt", "json".to_string())]
}

/// Quote a term for use as a phrase in a field query, e.g. `objectclass:"Foo Bar"`.
///
/// Backslashes and double quotes are escaped; everything else is literal
/// inside the quotes.
pub fn quote_term(term: &str) -> String {
    let mut quoted = String::with_capacity(term.len() + 2);
    quoted.push('"');
    for c in term.chars() {
        if c == '\\' || c == '"' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Build the JSON command body for an update request.
///
/// Solr's JSON update syntax repeats the `add` key once per document, which a
/// JSON object map cannot represent, so the body is assembled from fragments
/// that are each serialized on their own.
///
/// Example output:
///
/// ```text
/// {"delete":["Foo:1"],"add":{"doc":{"id":"Foo:2"}},"commit":{}}
/// ```
pub fn build_update_body(request: &UpdateRequest) -> Result<String, SolrError> {
    let mut commands: Vec<String> = Vec::with_capacity(request.add_docs.len() + 2);

    if !request.delete_ids.is_empty() {
        commands.push(format!(
            "\"delete\":{}",
            serde_json::to_string(&request.delete_ids)?
        ));
    }

    for doc in &request.add_docs {
        commands.push(format!(
            "\"add\":{}",
            serde_json::to_string(&json!({ "doc": doc }))?
        ));
    }

    if request.commit {
        commands.push("\"commit\":{}".to_string());
    }

    Ok(format!("{{{}}}", commands.join(",")))
}

/// The parts of a `wt=json` select response the client reads.
#[derive(Debug, Deserialize)]
struct RawSelectResponse {
    response: RawResultSet,
}

#[derive(Debug, Deserialize)]
struct RawResultSet {
    #[serde(rename = "numFound")]
    num_found: u64,
    #[serde(default)]
    docs: Vec<SolrDoc>,
}

/// Parse a `wt=json` select response body.
pub fn parse_select_response(body: &Value) -> Result<SelectResponse, SolrError> {
    let raw = RawSelectResponse::deserialize(body)
        .map_err(|e| SolrError::parse(format!("Invalid select result: {}", e)))?;

    Ok(SelectResponse {
        num_found: raw.response.num_found,
        docs: raw.response.docs,
    })
}

/// Parse a `wt=json` ping response body.
pub fn parse_ping_response(body: &Value) -> bool {
    body.get("status").and_then(Value::as_str) == Some("OK")
}

/// Extract Solr's error message from an error response body, if there is one.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.get("msg"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SortDirection;

    fn doc(id: &str, objectid: i64) -> SolrDoc {
        let mut doc = SolrDoc::new();
        doc.insert("id".to_string(), json!(id));
        doc.insert("objectid".to_string(), json!(objectid));
        doc
    }

    #[test]
    fn test_select_params() {
        let query = SelectQuery::new("objectclass:Foo-Bar")
            .sort_by("objectid", SortDirection::Asc)
            .with_fields(["id", "objectid", "objectclass", "hash"])
            .with_rows(1_000_000);

        let params = build_select_params(&query);

        assert!(params.contains(&("q", "objectclass:Foo-Bar".to_string())));
        assert!(params.contains(&("sort", "objectid asc".to_string())));
        assert!(params.contains(&("fl", "id,objectid,objectclass,hash".to_string())));
        assert!(params.contains(&("rows", "1000000".to_string())));
        assert!(params.contains(&("start", "0".to_string())));
        assert!(params.contains(&("wt", "json".to_string())));
    }

    #[test]
    fn test_select_params_without_sort_or_fields() {
        let params = build_select_params(&SelectQuery::new("*:*"));

        assert!(!params.iter().any(|(key, _)| *key == "sort"));
        assert!(!params.iter().any(|(key, _)| *key == "fl"));
    }

    #[test]
    fn test_update_params_request_json() {
        assert_eq!(build_update_params(), vec![("wt", "json".to_string())]);
    }

    #[test]
    fn test_quote_term() {
        assert_eq!(quote_term("Foo-Bar"), r#""Foo-Bar""#);
        assert_eq!(quote_term("Foo Bar:Baz"), r#""Foo Bar:Baz""#);
        assert_eq!(quote_term(r#"Foo"Bar\Baz"#), r#""Foo\"Bar\\Baz""#);
    }

    #[test]
    fn test_update_body_combined() {
        let request = UpdateRequest::new()
            .delete_by_ids(vec!["Foo:1".to_string(), "Foo:2".to_string()])
            .add_documents(vec![doc("Foo:3", 3), doc("Foo:4", 4)])
            .with_commit();

        let body = build_update_body(&request).unwrap();

        assert_eq!(
            body,
            concat!(
                r#"{"delete":["Foo:1","Foo:2"],"#,
                r#""add":{"doc":{"id":"Foo:3","objectid":3}},"#,
                r#""add":{"doc":{"id":"Foo:4","objectid":4}},"#,
                r#""commit":{}}"#
            )
        );
    }

    #[test]
    fn test_update_body_deletes_only() {
        let request = UpdateRequest::new()
            .delete_by_ids(vec!["Foo:1".to_string()])
            .with_commit();

        let body = build_update_body(&request).unwrap();

        assert_eq!(body, r#"{"delete":["Foo:1"],"commit":{}}"#);
    }

    #[test]
    fn test_update_body_without_commit() {
        let request = UpdateRequest::new().add_documents(vec![doc("Foo:1", 1)]);

        let body = build_update_body(&request).unwrap();

        assert_eq!(body, r#"{"add":{"doc":{"id":"Foo:1","objectid":1}}}"#);
    }

    #[test]
    fn test_parse_select_response() {
        let body = json!({
            "responseHeader": { "status": 0, "QTime": 1 },
            "response": {
                "numFound": 2,
                "start": 0,
                "docs": [
                    { "id": "Foo:1", "objectid": 1, "objectclass": "Foo", "hash": "abc" },
                    { "id": "Foo:2", "objectid": 2, "objectclass": "Foo" }
                ]
            }
        });

        let response = parse_select_response(&body).unwrap();

        assert_eq!(response.num_found, 2);
        assert_eq!(response.docs.len(), 2);
        assert_eq!(response.docs[0]["hash"], json!("abc"));
        assert_eq!(response.docs[1]["objectid"], json!(2));
    }

    #[test]
    fn test_parse_select_response_missing_response() {
        let body = json!({ "responseHeader": { "status": 0 } });
        assert!(matches!(
            parse_select_response(&body),
            Err(SolrError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_select_response_bad_doc() {
        let body = json!({ "response": { "numFound": 1, "docs": ["nope"] } });
        assert!(parse_select_response(&body).is_err());
    }

    #[test]
    fn test_parse_ping_response() {
        assert!(parse_ping_response(&json!({ "status": "OK" })));
        assert!(!parse_ping_response(&json!({ "status": "FAIL" })));
        assert!(!parse_ping_response(&json!({})));
    }

    #[test]
    fn test_error_message() {
        let body = r#"{"error":{"msg":"undefined field foo","code":400}}"#;
        assert_eq!(error_message(body), Some("undefined field foo".to_string()));
        assert_eq!(error_message("<html>oops</html>"), None);
    }
}
