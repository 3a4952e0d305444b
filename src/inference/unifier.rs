//! Structural type unification for JSON values

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::geospatial;
use super::types::{Items, SchemaNode};

/// Broad classification of a JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> ValueKind {
        match value {
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                ValueKind::Scalar
            }
        }
    }
}

/// Derive the structural schema of a value
///
/// Scalars yield an empty (unconstrained) node, arrays follow the collapse rule
/// in [`infer_array`], objects are inferred per key and may resolve to a
/// geospatial snippet.
pub fn infer(value: &Value) -> SchemaNode {
    match value {
        Value::Array(items) => infer_array(items),
        Value::Object(object) => infer_object(object),
        _ => SchemaNode::scalar(),
    }
}

/// Infer an array schema
///
/// An empty array has no `items`. Otherwise every element is inferred on its
/// own; when all elements share one shape the items collapse to that single
/// node, else the full positional sequence is kept.
pub fn infer_array(values: &[Value]) -> SchemaNode {
    if values.is_empty() {
        return SchemaNode::array(None);
    }

    let items: Vec<SchemaNode> = values.iter().map(infer).collect();

    let mut distinct: Vec<&SchemaNode> = Vec::new();
    for item in &items {
        if !distinct.contains(&item) {
            distinct.push(item);
            if distinct.len() > 1 {
                break;
            }
        }
    }

    if distinct.len() == 1 {
        let single = items.into_iter().next().unwrap_or_default();
        SchemaNode::array(Some(Items::Single(Box::new(single))))
    } else {
        SchemaNode::array(Some(Items::Tuple(items)))
    }
}

/// Infer an object schema, substituting a geospatial snippet when one matches
pub fn infer_object(object: &Map<String, Value>) -> SchemaNode {
    let properties: BTreeMap<String, SchemaNode> = object
        .iter()
        .map(|(key, value)| (key.clone(), infer(value)))
        .collect();

    match geospatial::resolve(object, &properties) {
        Some(node) => node,
        None => SchemaNode::object(properties),
    }
}
