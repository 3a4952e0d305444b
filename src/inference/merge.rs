//! Document template merging
//!
//! Folds sample documents into one representative template. Objects are merged
//! key by key and arrays position by position, so fields seen only in earlier
//! samples survive. Any other conflict is resolved in favour of the later
//! document, so the result depends on sample order when the same key carries
//! differently shaped values across samples.

use serde_json::map::Entry;
use serde_json::{Map, Value};
use tracing::debug;

/// Deep-merge `next` into `template`
///
/// Two objects merge key by key. Two arrays merge element `i` into element `i`,
/// appending the extra elements of a longer `next`. Anything else is replaced
/// by `next`.
pub fn merge_into(template: &mut Value, next: &Value) {
    match (template, next) {
        (Value::Object(target), Value::Object(source)) => merge_objects(target, source),
        (Value::Array(target), Value::Array(source)) => merge_arrays(target, source),
        (target, source) => *target = source.clone(),
    }
}

fn merge_objects(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        match target.entry(key.clone()) {
            Entry::Occupied(mut existing) => merge_into(existing.get_mut(), value),
            Entry::Vacant(slot) => {
                slot.insert(value.clone());
            }
        }
    }
}

fn merge_arrays(target: &mut Vec<Value>, source: &[Value]) {
    for (i, item) in source.iter().enumerate() {
        if i < target.len() {
            merge_into(&mut target[i], item);
        } else {
            target.push(item.clone());
        }
    }
}

/// Merge two values, returning the combined template
pub fn merge(mut template: Value, next: &Value) -> Value {
    merge_into(&mut template, next);
    template
}

/// Merge one sample document into an object template
///
/// A top-level array contributes its elements under the keys `"0"`, `"1"`, ...
/// and a top-level scalar contributes nothing, so the template stays an object.
pub fn merge_document(template: &mut Map<String, Value>, document: &Value) {
    match document {
        Value::Object(source) => merge_objects(template, source),
        Value::Array(items) => {
            let indexed: Map<String, Value> = items
                .iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item.clone()))
                .collect();
            merge_objects(template, &indexed);
        }
        other => debug!("Ignoring non-object sample document: {}", other),
    }
}

/// Fold documents left to right, starting from the empty object
pub fn merge_documents<'a, I>(documents: I) -> Value
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut template = Map::new();
    for document in documents {
        merge_document(&mut template, document);
    }
    Value::Object(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_fold_is_empty_object() {
        let docs: Vec<Value> = Vec::new();
        assert_eq!(merge_documents(&docs), json!({}));
    }

    #[test]
    fn test_key_union() {
        let docs = vec![json!({"a": 1}), json!({"b": 2})];
        assert_eq!(merge_documents(&docs), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn test_nested_objects_merge_recursively() {
        let docs = vec![
            json!({"user": {"name": "Alice"}}),
            json!({"user": {"email": "bob@example.com"}}),
        ];
        assert_eq!(
            merge_documents(&docs),
            json!({"user": {"name": "Alice", "email": "bob@example.com"}})
        );
    }

    #[test]
    fn test_last_writer_wins_on_conflict() {
        let docs = vec![json!({"v": {"x": 1}}), json!({"v": [1, 2]})];
        assert_eq!(merge_documents(&docs), json!({"v": [1, 2]}));

        let reversed = vec![json!({"v": [1, 2]}), json!({"v": {"x": 1}})];
        assert_eq!(merge_documents(&reversed), json!({"v": {"x": 1}}));
    }

    #[test]
    fn test_arrays_merge_by_position() {
        let merged = merge(json!({"tags": ["a", "b", "c"]}), &json!({"tags": ["d"]}));
        assert_eq!(merged, json!({"tags": ["d", "b", "c"]}));

        let longer = merge(json!({"tags": ["a"]}), &json!({"tags": ["b", "c"]}));
        assert_eq!(longer, json!({"tags": ["b", "c"]}));
    }

    #[test]
    fn test_array_elements_merge_recursively() {
        let docs = vec![
            json!({"addr": [{"city": "Lviv"}, {"zip": 1}]}),
            json!({"addr": [{"street": "x"}]}),
        ];
        assert_eq!(
            merge_documents(&docs),
            json!({"addr": [{"city": "Lviv", "street": "x"}, {"zip": 1}]})
        );
    }

    #[test]
    fn test_top_level_array_is_indexed() {
        let docs = vec![json!({"a": 1}), json!([1, {"b": 2}])];
        assert_eq!(merge_documents(&docs), json!({"a": 1, "0": 1, "1": {"b": 2}}));
    }

    #[test]
    fn test_top_level_scalar_is_ignored() {
        let docs = vec![json!({"a": 1}), json!("text"), json!(null)];
        assert_eq!(merge_documents(&docs), json!({"a": 1}));
    }
}
