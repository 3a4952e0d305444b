//! Geospatial snippet resolution
//!
//! Objects shaped like a geometry (`{"type": "Point", "coordinates": [...]}`) are
//! described by a predefined snippet instead of plain object inference. Snippets are
//! a static table of named fields which unroll into the same [`SchemaNode`] shape the
//! unifier produces.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::types::{GeoKind, Items, NodeType, SchemaNode};

/// One field of a snippet template
#[derive(Debug)]
pub struct SnippetField {
    pub name: &'static str,
    pub field_type: NodeType,
    pub sample: Option<&'static str>,
    /// Nested fields; positional items when `field_type` is an array
    pub properties: &'static [SnippetField],
}

/// Predefined schema for one geometry kind
#[derive(Debug)]
pub struct Snippet {
    pub kind: GeoKind,
    pub properties: &'static [SnippetField],
}

const fn field(name: &'static str, field_type: NodeType) -> SnippetField {
    SnippetField {
        name,
        field_type,
        sample: None,
        properties: &[],
    }
}

const fn nested(
    name: &'static str,
    field_type: NodeType,
    properties: &'static [SnippetField],
) -> SnippetField {
    SnippetField {
        name,
        field_type,
        sample: None,
        properties,
    }
}

const fn type_field(sample: &'static str) -> SnippetField {
    SnippetField {
        name: "type",
        field_type: NodeType::String,
        sample: Some(sample),
        properties: &[],
    }
}

const POSITION: &[SnippetField] = &[
    field("longitude", NodeType::Number),
    field("latitude", NodeType::Number),
];

const LINE: &[SnippetField] = &[
    nested("position", NodeType::Array, POSITION),
    nested("position", NodeType::Array, POSITION),
];

const RING: &[SnippetField] = &[
    nested("position", NodeType::Array, POSITION),
    nested("position", NodeType::Array, POSITION),
    nested("position", NodeType::Array, POSITION),
    nested("position", NodeType::Array, POSITION),
];

const POLYGON: &[SnippetField] = &[nested("ring", NodeType::Array, RING)];

const POSITIONS: &[SnippetField] = &[nested("position", NodeType::Array, POSITION)];

const LINES: &[SnippetField] = &[nested("line", NodeType::Array, LINE)];

const POLYGONS: &[SnippetField] = &[nested("polygon", NodeType::Array, POLYGON)];

const BOX_EDGES: &[SnippetField] = &[
    field("south", NodeType::Number),
    field("west", NodeType::Number),
    field("north", NodeType::Number),
    field("east", NodeType::Number),
];

const POINT_SNIPPET: &[SnippetField] = &[
    type_field("Point"),
    nested("coordinates", NodeType::Array, POSITION),
];

const MULTIPOINT_SNIPPET: &[SnippetField] = &[
    type_field("MultiPoint"),
    nested("coordinates", NodeType::Array, POSITIONS),
];

const LINESTRING_SNIPPET: &[SnippetField] = &[
    type_field("LineString"),
    nested("coordinates", NodeType::Array, LINE),
];

const MULTILINESTRING_SNIPPET: &[SnippetField] = &[
    type_field("MultiLineString"),
    nested("coordinates", NodeType::Array, LINES),
];

const POLYGON_SNIPPET: &[SnippetField] = &[
    type_field("Polygon"),
    nested("coordinates", NodeType::Array, POLYGON),
];

const MULTIPOLYGON_SNIPPET: &[SnippetField] = &[
    type_field("MultiPolygon"),
    nested("coordinates", NodeType::Array, POLYGONS),
];

const BOX_SNIPPET: &[SnippetField] = &[
    type_field("Box"),
    nested("coordinates", NodeType::Array, BOX_EDGES),
];

const CIRCLE_SNIPPET: &[SnippetField] = &[
    type_field("Circle"),
    nested("coordinates", NodeType::Array, POSITION),
    field("radius", NodeType::Number),
];

static SNIPPETS: [Snippet; 8] = [
    Snippet {
        kind: GeoKind::Box,
        properties: BOX_SNIPPET,
    },
    Snippet {
        kind: GeoKind::Circle,
        properties: CIRCLE_SNIPPET,
    },
    Snippet {
        kind: GeoKind::LineString,
        properties: LINESTRING_SNIPPET,
    },
    Snippet {
        kind: GeoKind::MultiLineString,
        properties: MULTILINESTRING_SNIPPET,
    },
    Snippet {
        kind: GeoKind::MultiPoint,
        properties: MULTIPOINT_SNIPPET,
    },
    Snippet {
        kind: GeoKind::MultiPolygon,
        properties: MULTIPOLYGON_SNIPPET,
    },
    Snippet {
        kind: GeoKind::Point,
        properties: POINT_SNIPPET,
    },
    Snippet {
        kind: GeoKind::Polygon,
        properties: POLYGON_SNIPPET,
    },
];

/// Look up the registered snippet for a geometry kind
pub fn snippet_for(kind: GeoKind) -> Option<&'static Snippet> {
    SNIPPETS.iter().find(|s| s.kind == kind)
}

/// Detect whether an object looks like a geometry
///
/// Requires a string `type` in the geometry vocabulary (any case) and an array
/// `coordinates`.
pub fn detect_geometry(object: &Map<String, Value>) -> Option<GeoKind> {
    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .and_then(GeoKind::from_type_value)?;

    match object.get("coordinates") {
        Some(Value::Array(_)) => Some(kind),
        _ => None,
    }
}

/// Unroll snippet fields into named schema properties
pub fn snippet_properties(fields: &[SnippetField]) -> BTreeMap<String, SchemaNode> {
    fields
        .iter()
        .map(|f| (f.name.to_string(), field_schema(f)))
        .collect()
}

fn field_schema(field: &SnippetField) -> SchemaNode {
    let mut node = SchemaNode::typed(field.field_type);

    if !field.properties.is_empty() {
        if field.field_type == NodeType::Array {
            let items = field.properties.iter().map(field_schema).collect();
            node.items = Some(Items::Tuple(items));
        } else {
            node.properties = Some(snippet_properties(field.properties));
        }
    }

    node.sample = field.sample.map(str::to_string);
    node
}

/// Resolve an object into a geospatial node, if it matches a registered snippet
///
/// `inferred` holds the normally-inferred properties of the object; snippet
/// entries are applied afterwards so they win on key collisions.
pub fn resolve(
    object: &Map<String, Value>,
    inferred: &BTreeMap<String, SchemaNode>,
) -> Option<SchemaNode> {
    let kind = detect_geometry(object)?;
    let snippet = snippet_for(kind)?;

    let mut properties = inferred.clone();
    properties.extend(snippet_properties(snippet.properties));

    Some(SchemaNode {
        node_type: Some(NodeType::GeoSpatial),
        sub_type: Some(kind),
        properties: Some(properties),
        ..SchemaNode::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_every_kind_has_snippet() {
        for kind in GeoKind::ALL {
            assert!(snippet_for(kind).is_some(), "missing snippet for {kind}");
        }
    }

    #[test]
    fn test_detect_requires_coordinates_array() {
        let point = as_object(json!({"type": "Point", "coordinates": [1, 2]}));
        assert_eq!(detect_geometry(&point), Some(GeoKind::Point));

        let no_coords = as_object(json!({"type": "Point"}));
        assert_eq!(detect_geometry(&no_coords), None);

        let scalar_coords = as_object(json!({"type": "Point", "coordinates": "1,2"}));
        assert_eq!(detect_geometry(&scalar_coords), None);

        let unknown = as_object(json!({"type": "Feature", "coordinates": []}));
        assert_eq!(detect_geometry(&unknown), None);
    }

    #[test]
    fn test_point_snippet_unrolls_positional_items() {
        let props = snippet_properties(POINT_SNIPPET);
        assert_eq!(props["type"].node_type, Some(NodeType::String));
        assert_eq!(props["type"].sample.as_deref(), Some("Point"));

        let coords = &props["coordinates"];
        assert_eq!(coords.node_type, Some(NodeType::Array));
        match &coords.items {
            Some(Items::Tuple(items)) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].node_type, Some(NodeType::Number));
            }
            _ => panic!("Expected positional items"),
        }
    }

    #[test]
    fn test_polygon_nesting_depth() {
        let props = snippet_properties(POLYGON_SNIPPET);
        let coords = props["coordinates"].to_json();
        assert_eq!(coords["items"][0]["type"], "array");
        assert_eq!(coords["items"][0]["items"][0]["type"], "array");
        assert_eq!(coords["items"][0]["items"][0]["items"][1]["type"], "number");
    }

    #[test]
    fn test_resolve_snippet_wins() {
        let object = as_object(json!({"type": "circle", "coordinates": [0, 0], "radius": 5}));
        let mut inferred = BTreeMap::new();
        inferred.insert("radius".to_string(), SchemaNode::scalar());
        inferred.insert("label".to_string(), SchemaNode::scalar());

        let node = resolve(&object, &inferred).unwrap();
        assert_eq!(node.node_type, Some(NodeType::GeoSpatial));
        assert_eq!(node.sub_type, Some(GeoKind::Circle));
        assert!(node.property("label").unwrap().is_scalar());
        assert_eq!(
            node.property("radius").unwrap().node_type,
            Some(NodeType::Number)
        );
    }
}
