//! Schema inference tests

use docdb_modelling_sdk::inference::{
    GeoKind, Items, NodeType, SCHEMA_DIALECT, SchemaBuilder, build_schema, merge_documents,
};
use serde_json::{Value, json};

mod build_schema_tests {
    use super::*;

    #[test]
    fn test_documents_with_arrays() {
        let docs = vec![
            json!({"name": "a", "tags": ["x"]}),
            json!({"name": "b", "tags": ["y", "z"]}),
        ];
        let schema = build_schema(&docs, None);

        assert_eq!(
            schema.to_json(),
            json!({
                "$schema": SCHEMA_DIALECT,
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "name": {},
                    "tags": {"type": "array", "items": {}}
                }
            })
        );
    }

    #[test]
    fn test_inference_is_idempotent() {
        let docs = vec![
            json!({"a": {"b": [1, 2]}, "c": "x"}),
            json!({"a": {"d": true}}),
        ];
        let first = build_schema(&docs, None);
        let second = build_schema(&docs, None);
        assert_eq!(first, second);

        // Feeding the same documents twice describes the same shape
        let doubled: Vec<Value> = docs.iter().chain(docs.iter()).cloned().collect();
        assert_eq!(build_schema(&doubled, None), first);
    }

    #[test]
    fn test_later_documents_extend_nested_objects() {
        let docs = vec![
            json!({"user": {"name": "Alice"}}),
            json!({"user": {"email": "a@example.com"}}),
        ];
        let schema = build_schema(&docs, None);
        let user = schema.property("user").unwrap();
        assert_eq!(user.node_type, Some(NodeType::Object));
        assert!(user.property("name").is_some());
        assert!(user.property("email").is_some());
    }

    #[test]
    fn test_object_replaces_scalar() {
        let docs = vec![json!({"a": 1}), json!({"a": {"b": 2}})];
        let schema = build_schema(&docs, None);
        assert_eq!(
            schema.property("a").unwrap().to_json(),
            json!({"type": "object", "properties": {"b": {}}})
        );
    }

    #[test]
    fn test_parent_collection() {
        let docs = vec![json!({"x": 1})];
        let schema = build_schema(&docs, Some("/orders/"));
        assert_eq!(schema.to_json()["parentCollection"], "/orders/");
    }
}

mod array_tests {
    use super::*;

    #[test]
    fn test_uniform_objects_collapse_to_one_item() {
        let docs = vec![json!({"lines": [{"sku": "a"}, {"sku": "b"}]})];
        let schema = build_schema(&docs, None);
        match &schema.property("lines").unwrap().items {
            Some(Items::Single(item)) => {
                assert_eq!(item.to_json(), json!({"type": "object", "properties": {"sku": {}}}));
            }
            other => panic!("expected collapsed items, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_arrays_keep_positions() {
        let docs = vec![json!({"row": [1, [2], {"k": 3}]})];
        let schema = build_schema(&docs, None);
        match &schema.property("row").unwrap().items {
            Some(Items::Tuple(items)) => {
                assert_eq!(items.len(), 3);
                assert!(items[0].is_scalar());
                assert_eq!(items[1].node_type, Some(NodeType::Array));
                assert_eq!(items[2].node_type, Some(NodeType::Object));
            }
            other => panic!("expected positional items, got {:?}", other),
        }
    }

    #[test]
    fn test_arrays_merge_by_position() {
        let merged = merge_documents(&[json!({"a": [1, 2, 3]}), json!({"a": [{"b": 1}]})]);
        assert_eq!(merged, json!({"a": [{"b": 1}, 2, 3]}));
    }

    #[test]
    fn test_earlier_array_fields_survive() {
        let docs = vec![
            json!({"addr": [{"city": "Lviv"}, {"zip": 1}]}),
            json!({"addr": [{"street": "x"}]}),
        ];
        let schema = build_schema(&docs, None);
        match &schema.property("addr").unwrap().items {
            Some(Items::Tuple(items)) => {
                assert_eq!(items.len(), 2);
                assert_eq!(
                    items[0].to_json(),
                    json!({"type": "object", "properties": {"city": {}, "street": {}}})
                );
                assert_eq!(
                    items[1].to_json(),
                    json!({"type": "object", "properties": {"zip": {}}})
                );
            }
            other => panic!("expected positional items, got {:?}", other),
        }
    }

    #[test]
    fn test_top_level_array_document_keeps_object_schema() {
        let docs = vec![json!({"a": 1}), json!([{"b": 2}]), json!(7)];
        let schema = build_schema(&docs, None);
        assert_eq!(schema.node_type, Some(NodeType::Object));
        assert!(schema.property("a").unwrap().is_scalar());
        assert_eq!(schema.property("0").unwrap().node_type, Some(NodeType::Object));
    }
}

mod geospatial_tests {
    use super::*;

    #[test]
    fn test_point_property() {
        let docs = vec![json!({"location": {"type": "Point", "coordinates": [13.4, 52.5]}})];
        let schema = build_schema(&docs, None);
        let location = schema.property("location").unwrap();

        assert_eq!(location.node_type, Some(NodeType::GeoSpatial));
        assert_eq!(location.sub_type, Some(GeoKind::Point));
        assert_eq!(location.to_json()["subType"], "point");
        assert_eq!(location.property("type").unwrap().sample.as_deref(), Some("Point"));
    }

    #[test]
    fn test_geometry_type_is_case_insensitive() {
        let docs = vec![json!({"area": {"type": "POLYGON", "coordinates": [[[0, 0], [1, 1]]]}})];
        let schema = build_schema(&docs, None);
        assert_eq!(schema.property("area").unwrap().sub_type, Some(GeoKind::Polygon));
    }

    #[test]
    fn test_geometry_takes_precedence_over_object() {
        let docs = vec![json!({"g": {"type": "LineString", "coordinates": [[0, 0], [1, 1]], "name": "x"}})];
        let schema = build_schema(&docs, None);
        let g = schema.property("g").unwrap();
        assert_eq!(g.node_type, Some(NodeType::GeoSpatial));
        assert!(g.property("name").unwrap().is_scalar());
    }

    #[test]
    fn test_unknown_geometry_type_is_an_object() {
        let docs = vec![json!({"f": {"type": "Feature", "coordinates": [1, 2]}})];
        let schema = build_schema(&docs, None);
        assert_eq!(schema.property("f").unwrap().node_type, Some(NodeType::Object));
    }
}

mod builder_tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_builder_matches_build_schema() {
        let docs = vec![json!({"a": 1}), json!({"b": [true]})];

        let mut builder = SchemaBuilder::new().parent("/root/");
        for doc in &docs {
            builder.add_value(doc);
        }
        assert_eq!(builder.finalize(), build_schema(&docs, Some("/root/")));
    }

    #[test]
    fn test_files_of_every_layout() {
        let dir = TempDir::new().unwrap();
        let single = dir.path().join("single.json");
        let array = dir.path().join("array.json");
        let lines = dir.path().join("lines.jsonl");
        fs::write(&single, r#"{"a": 1}"#).unwrap();
        fs::write(&array, r#"[{"b": 1}, {"c": 1}]"#).unwrap();
        fs::write(&lines, "{\"d\": 1}\n\n{\"e\": 1}\n").unwrap();

        let mut builder = SchemaBuilder::new();
        assert_eq!(builder.add_json_file(&single).unwrap(), 1);
        assert_eq!(builder.add_json_file(&array).unwrap(), 2);
        assert_eq!(builder.add_json_file(&lines).unwrap(), 2);
        assert_eq!(builder.document_count(), 5);

        let schema = builder.finalize();
        for key in ["a", "b", "c", "d", "e"] {
            assert!(schema.property(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut builder = SchemaBuilder::new();
        assert!(builder.add_json_file(&dir.path().join("absent.json")).is_err());
    }
}
