//! Container enumeration and estimate queries

use serde_json::Value;

use crate::indexes::RawResponse;

/// Every collection URI in the database
pub const COLLECTIONS_QUERY: &str = "cts:collections()";

/// Every distinct directory holding at least one document
pub const DIRECTORIES_QUERY: &str = "fn:distinct-values(for $d in xdmp:directory(\"/\", \"infinity\") return fn:replace(xdmp:node-uri($d), \"[^/]+$\", \"\"))";

/// Estimated document count of a collection
pub fn collection_estimate_query(collection: &str) -> String {
    format!(
        "xdmp:estimate(cts:search(doc(), cts:collection-query(\"{}\")))",
        collection
    )
}

/// Estimated document count of a directory, optionally including subdirectories
pub fn directory_estimate_query(directory: &str, recursive: bool) -> String {
    if recursive {
        format!(
            "xdmp:estimate(cts:search(fn:doc(), cts:directory-query(\"{}\", \"infinity\")))",
            directory
        )
    } else {
        format!(
            "xdmp:estimate(cts:search(fn:doc(), cts:directory-query(\"{}\")))",
            directory
        )
    }
}

/// String values of a response, skipping non-string items
pub fn response_strings(responses: &[RawResponse]) -> Vec<String> {
    responses
        .iter()
        .filter_map(|r| r.value.as_str().map(str::to_string))
        .collect()
}

/// Numeric value of the first response item; 0 when missing or not a number
pub fn response_count(responses: &[RawResponse]) -> u64 {
    match responses.first().map(|r| &r.value) {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> RawResponse {
        RawResponse {
            value,
            ..RawResponse::default()
        }
    }

    #[test]
    fn test_estimate_queries() {
        assert_eq!(
            collection_estimate_query("users"),
            "xdmp:estimate(cts:search(doc(), cts:collection-query(\"users\")))"
        );
        assert!(directory_estimate_query("/a/", true).contains("\"/a/\", \"infinity\""));
        assert!(!directory_estimate_query("/a/", false).contains("infinity"));
    }

    #[test]
    fn test_response_count() {
        assert_eq!(response_count(&[response(json!(42))]), 42);
        assert_eq!(response_count(&[response(json!("17"))]), 17);
        assert_eq!(response_count(&[response(json!(null))]), 0);
        assert_eq!(response_count(&[]), 0);
    }

    #[test]
    fn test_response_strings() {
        let items = vec![response(json!("/a/")), response(json!(1)), response(json!("/b/"))];
        assert_eq!(response_strings(&items), vec!["/a/", "/b/"]);
    }
}
