//! Inferred schema node types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// JSON Schema dialect marker written on every container schema
pub const SCHEMA_DIALECT: &str = "http://json-schema.org/draft-04/schema#";

/// Structural type of a schema node
///
/// Inferred nodes only ever use `Object`, `Array` and `GeoSpatial`; scalars are
/// left untyped. The primitive variants appear in geospatial snippet fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    Object,
    Array,
    GeoSpatial,
    String,
    Number,
    Boolean,
    Null,
}

impl NodeType {
    /// Get the type name as written in the schema
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeType::Object => "object",
            NodeType::Array => "array",
            NodeType::GeoSpatial => "geoSpatial",
            NodeType::String => "string",
            NodeType::Number => "number",
            NodeType::Boolean => "boolean",
            NodeType::Null => "null",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Geometry kinds recognised by the geospatial snippet resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoKind {
    Box,
    Circle,
    LineString,
    MultiLineString,
    MultiPoint,
    MultiPolygon,
    Point,
    Polygon,
}

impl GeoKind {
    /// All geometry kinds, in vocabulary order
    pub const ALL: [GeoKind; 8] = [
        GeoKind::Box,
        GeoKind::Circle,
        GeoKind::LineString,
        GeoKind::MultiLineString,
        GeoKind::MultiPoint,
        GeoKind::MultiPolygon,
        GeoKind::Point,
        GeoKind::Polygon,
    ];

    /// Lower-case vocabulary name
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoKind::Box => "box",
            GeoKind::Circle => "circle",
            GeoKind::LineString => "linestring",
            GeoKind::MultiLineString => "multilinestring",
            GeoKind::MultiPoint => "multipoint",
            GeoKind::MultiPolygon => "multipolygon",
            GeoKind::Point => "point",
            GeoKind::Polygon => "polygon",
        }
    }

    /// Match a geometry `type` value, ignoring case
    pub fn from_type_value(value: &str) -> Option<GeoKind> {
        let lowered = value.to_lowercase();
        GeoKind::ALL.into_iter().find(|kind| kind.as_str() == lowered)
    }
}

impl std::fmt::Display for GeoKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Array item schema
///
/// Homogeneous arrays collapse to a single node; heterogeneous arrays keep one
/// node per position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Items {
    Tuple(Vec<SchemaNode>),
    Single(Box<SchemaNode>),
}

/// A node of an inferred schema tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// Dialect marker (container envelope only)
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Structural type; absent for unconstrained scalars
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeType>,
    /// Geometry kind for `geoSpatial` nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<GeoKind>,
    /// Closed-object marker (container envelope only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,
    /// Sample literal carried over from a snippet field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<String>,
    /// Nearest ancestor container under directory organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_collection: Option<String>,
}

impl SchemaNode {
    /// Unconstrained scalar node
    pub fn scalar() -> Self {
        Self::default()
    }

    /// Node of the given type with nothing else set
    pub fn typed(node_type: NodeType) -> Self {
        Self {
            node_type: Some(node_type),
            ..Self::default()
        }
    }

    /// Object node with the given properties
    pub fn object(properties: BTreeMap<String, SchemaNode>) -> Self {
        Self {
            node_type: Some(NodeType::Object),
            properties: Some(properties),
            ..Self::default()
        }
    }

    /// Array node with optional items
    pub fn array(items: Option<Items>) -> Self {
        Self {
            node_type: Some(NodeType::Array),
            items,
            ..Self::default()
        }
    }

    /// True for nodes with no structural constraint
    pub fn is_scalar(&self) -> bool {
        self.node_type.is_none() && self.properties.is_none() && self.items.is_none()
    }

    /// Look up a direct child property
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.as_ref().and_then(|p| p.get(name))
    }

    /// Convert to a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
