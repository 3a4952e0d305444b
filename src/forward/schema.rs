//! Validation schema adoption
//!
//! Reduces a modelled container schema to the JSON Schema keywords the database
//! understands, and decides the URI the schema is stored under.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{ForwardError, ForwardResult};

/// Top-level keywords copied verbatim before adoption
pub const ENVELOPE_KEYWORDS: [&str; 6] = [
    "$schema",
    "id",
    "type",
    "title",
    "description",
    "additionalProperties",
];

/// Keywords kept on every adopted schema node
pub const ADOPTED_KEYWORDS: [&str; 22] = [
    "enum",
    "additionalItems",
    "maxItems",
    "minItems",
    "uniqueItems",
    "multipleOf",
    "maximum",
    "exclusiveMaximum",
    "minimum",
    "exclusiveMinimum",
    "maxProperties",
    "minProperties",
    "required",
    "additionalProperties",
    "properties",
    "patternProperties",
    "dependencies",
    "maxLength",
    "minLength",
    "pattern",
    "format",
    "description",
];

const CHOICE_KEYWORDS: [&str; 3] = ["allOf", "anyOf", "oneOf"];

/// Map modelling types onto JSON Schema types
pub fn adopt_type(node_type: &str) -> &str {
    match node_type {
        "geoSpatial" => "object",
        "binary" => "string",
        other => other,
    }
}

fn pick(schema: &Map<String, Value>, keys: &[&str], into: &mut Map<String, Value>) {
    for key in keys {
        if let Some(value) = schema.get(*key) {
            into.insert((*key).to_string(), value.clone());
        }
    }
}

fn adopt_map(children: &Map<String, Value>) -> Map<String, Value> {
    children
        .iter()
        .map(|(key, child)| (key.clone(), adopt_schema(child)))
        .collect()
}

/// Adopt one schema node and, recursively, its children
///
/// Non-object input adopts to an empty schema.
pub fn adopt_schema(schema: &Value) -> Value {
    let Some(schema) = schema.as_object() else {
        return Value::Object(Map::new());
    };

    let mut adopted = Map::new();

    match schema.get("type") {
        Some(Value::String(t)) => {
            adopted.insert("type".to_string(), Value::String(adopt_type(t).to_string()));
        }
        Some(Value::Null) | None => {}
        Some(other) => {
            adopted.insert("type".to_string(), other.clone());
        }
    }

    pick(schema, &ADOPTED_KEYWORDS, &mut adopted);

    for keyword in CHOICE_KEYWORDS {
        if let Some(Value::Array(options)) = schema.get(keyword) {
            let options = options.iter().map(adopt_schema).collect();
            adopted.insert(keyword.to_string(), Value::Array(options));
        }
    }
    if let Some(not) = schema.get("not").filter(|v| !v.is_null()) {
        adopted.insert("not".to_string(), adopt_schema(not));
    }

    for keyword in ["properties", "patternProperties"] {
        if let Some(Value::Object(children)) = schema.get(keyword) {
            adopted.insert(keyword.to_string(), Value::Object(adopt_map(children)));
        }
    }

    match schema.get("items") {
        Some(Value::Array(items)) => {
            adopted.insert(
                "items".to_string(),
                Value::Array(items.iter().map(adopt_schema).collect()),
            );
        }
        Some(item @ Value::Object(_)) => {
            adopted.insert("items".to_string(), adopt_schema(item));
        }
        _ => {}
    }

    Value::Object(adopted)
}

fn non_empty_str<'a>(schema: &'a Value, key: &str) -> Option<&'a str> {
    schema
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Storage URI of a container schema
///
/// An explicit `schemaURI` is normalised to start with `/` and end with
/// `.json`; otherwise the container's `code` or `collectionName` names it.
pub fn schema_uri(schema: &Value) -> ForwardResult<String> {
    if let Some(uri) = non_empty_str(schema, "schemaURI") {
        let mut uri = if uri.starts_with('/') {
            uri.to_string()
        } else {
            format!("/{uri}")
        };
        if !uri.to_lowercase().ends_with(".json") {
            uri.push_str(".json");
        }
        return Ok(uri);
    }

    non_empty_str(schema, "code")
        .or_else(|| non_empty_str(schema, "collectionName"))
        .map(|name| format!("/{name}.json"))
        .ok_or(ForwardError::MissingSchemaName)
}

/// A schema ready to be inserted into the schema database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSchemaData {
    pub uri: String,
    pub schema: Value,
}

impl ValidationSchemaData {
    /// Build from a parsed container schema
    pub fn from_schema(schema: &Value) -> ForwardResult<Self> {
        let uri = schema_uri(schema)?;

        let mut merged = Map::new();
        if let Some(object) = schema.as_object() {
            pick(object, &ENVELOPE_KEYWORDS, &mut merged);
        }
        if let Value::Object(adopted) = adopt_schema(schema) {
            merged.extend(adopted);
        }

        Ok(Self {
            uri,
            schema: Value::Object(merged),
        })
    }

    /// Parse and build from container schema text
    pub fn from_json(text: &str) -> ForwardResult<Self> {
        let schema: Value = serde_json::from_str(text)?;
        Self::from_schema(&schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_mapping() {
        assert_eq!(adopt_type("geoSpatial"), "object");
        assert_eq!(adopt_type("binary"), "string");
        assert_eq!(adopt_type("array"), "array");
    }

    #[test]
    fn test_adoption_drops_unknown_keywords() {
        let adopted = adopt_schema(&json!({
            "type": "string",
            "maxLength": 10,
            "sample": "x",
            "GUID": "abc",
            "subType": "point"
        }));
        assert_eq!(adopted, json!({"type": "string", "maxLength": 10}));
    }

    #[test]
    fn test_adoption_recurses() {
        let adopted = adopt_schema(&json!({
            "type": "object",
            "properties": {
                "loc": {"type": "geoSpatial", "subType": "point", "properties": {}}
            },
            "patternProperties": {
                "^x-": {"type": "binary", "mode": "raw"}
            },
            "anyOf": [{"type": "binary"}],
            "not": {"type": "geoSpatial"}
        }));
        assert_eq!(adopted["properties"]["loc"], json!({"type": "object", "properties": {}}));
        assert_eq!(adopted["patternProperties"]["^x-"], json!({"type": "string"}));
        assert_eq!(adopted["anyOf"], json!([{"type": "string"}]));
        assert_eq!(adopted["not"], json!({"type": "object"}));
    }

    #[test]
    fn test_items_object_or_array() {
        let single = adopt_schema(&json!({"type": "array", "items": {"type": "binary"}}));
        assert_eq!(single["items"], json!({"type": "string"}));

        let tuple = adopt_schema(&json!({"type": "array", "items": [{"type": "binary"}, {}]}));
        assert_eq!(tuple["items"], json!([{"type": "string"}, {}]));
    }

    #[test]
    fn test_schema_uri() {
        assert_eq!(schema_uri(&json!({"schemaURI": "a/b"})).unwrap(), "/a/b.json");
        assert_eq!(schema_uri(&json!({"schemaURI": "/x.JSON"})).unwrap(), "/x.JSON");
        assert_eq!(
            schema_uri(&json!({"code": "users", "collectionName": "Users"})).unwrap(),
            "/users.json"
        );
        assert_eq!(schema_uri(&json!({"collectionName": "Users"})).unwrap(), "/Users.json");
        assert_eq!(schema_uri(&json!({})), Err(ForwardError::MissingSchemaName));
    }

    #[test]
    fn test_validation_schema_data() {
        let data = ValidationSchemaData::from_schema(&json!({
            "$schema": "http://json-schema.org/draft-04/schema#",
            "title": "Users",
            "collectionName": "users",
            "type": "object",
            "additionalProperties": false,
            "properties": {"name": {"type": "string", "GUID": "1"}}
        }))
        .unwrap();
        assert_eq!(data.uri, "/users.json");
        assert_eq!(
            data.schema,
            json!({
                "$schema": "http://json-schema.org/draft-04/schema#",
                "title": "Users",
                "type": "object",
                "additionalProperties": false,
                "properties": {"name": {"type": "string"}}
            })
        );
    }

    #[test]
    fn test_invalid_json_text() {
        assert!(matches!(
            ValidationSchemaData::from_json("{oops"),
            Err(ForwardError::InvalidSchema(_))
        ));
    }
}
