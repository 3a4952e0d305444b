//! Typed index definitions
//!
//! Each family has its own record; records are grouped into three tagged unions
//! keyed by `idxType`, one per configuration sequence. Text attributes are
//! `Option<String>`: `None` means the admin response did not carry the element,
//! `Some("")` means it was present but empty.

use serde::{Deserialize, Serialize};

use super::kinds::{IndexGroup, IndexKind};

/// Range index on an element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementRangeIndex {
    pub idx_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scalar_type: Option<String>,
    #[serde(rename = "namespaceURI", skip_serializing_if = "Option::is_none")]
    pub namespace_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    pub range_value_positions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_values: Option<String>,
}

/// Range index on an element attribute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeRangeIndex {
    pub idx_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scalar_type: Option<String>,
    #[serde(rename = "parentNamespaceURI", skip_serializing_if = "Option::is_none")]
    pub parent_namespace_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_localname: Option<String>,
    #[serde(rename = "namespaceURI", skip_serializing_if = "Option::is_none")]
    pub namespace_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    pub range_value_positions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_values: Option<String>,
}

/// Range index on a path expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathRangeIndex {
    pub idx_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scalar_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    pub range_value_positions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_values: Option<String>,
}

/// Range index on a field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldRangeIndex {
    pub idx_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scalar_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    pub range_value_positions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_values: Option<String>,
}

/// Geospatial point index on an element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoElementIndex {
    pub idx_name: String,
    #[serde(rename = "namespaceURI", skip_serializing_if = "Option::is_none")]
    pub namespace_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_format: Option<String>,
    pub range_value_positions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_values: Option<String>,
}

/// Geospatial point index on a child of an element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoElementChildIndex {
    pub idx_name: String,
    #[serde(rename = "namespaceURI", skip_serializing_if = "Option::is_none")]
    pub namespace_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localname: Option<String>,
    #[serde(rename = "parentNamespaceURI", skip_serializing_if = "Option::is_none")]
    pub parent_namespace_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_localname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_format: Option<String>,
    pub range_value_positions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_values: Option<String>,
}

/// Geospatial point index on a latitude/longitude pair
///
/// Shared by the element-pair and attribute-pair families.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoPairIndex {
    pub idx_name: String,
    #[serde(rename = "latitudeNamespaceURI", skip_serializing_if = "Option::is_none")]
    pub latitude_namespace_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude_localname: Option<String>,
    #[serde(rename = "longitudeNamespaceURI", skip_serializing_if = "Option::is_none")]
    pub longitude_namespace_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude_localname: Option<String>,
    #[serde(rename = "parentNamespaceURI", skip_serializing_if = "Option::is_none")]
    pub parent_namespace_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_localname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate_system: Option<String>,
    pub range_value_positions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_values: Option<String>,
}

/// Geospatial point index on a path expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoPathIndex {
    pub idx_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate_system: Option<String>,
    pub range_value_positions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_values: Option<String>,
}

/// Geospatial region index on a path expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoRegionPathIndex {
    pub idx_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate_system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    /// Kept as text; rendered as an integer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geohash_precision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_values: Option<String>,
}

/// Range index definition, tagged by `idxType`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "idxType")]
pub enum RangeIndex {
    Element(ElementRangeIndex),
    Attribute(AttributeRangeIndex),
    Path(PathRangeIndex),
    Field(FieldRangeIndex),
}

/// Geospatial point index definition, tagged by `idxType`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "idxType")]
pub enum GeoPointIndex {
    Element(GeoElementIndex),
    #[serde(rename = "Element child")]
    ElementChild(GeoElementChildIndex),
    #[serde(rename = "Element pair")]
    ElementPair(GeoPairIndex),
    #[serde(rename = "Attribute pair")]
    AttributePair(GeoPairIndex),
    Path(GeoPathIndex),
}

/// Geospatial region index definition, tagged by `idxType`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "idxType")]
pub enum GeoRegionIndex {
    Path(GeoRegionPathIndex),
}

/// Common view over the three definition unions
pub trait IndexRecord {
    /// Family of this definition
    fn kind(&self) -> IndexKind;

    /// Display name, also the source of the script identifier
    fn idx_name(&self) -> &str;
}

impl IndexRecord for RangeIndex {
    fn kind(&self) -> IndexKind {
        match self {
            RangeIndex::Element(_) => IndexKind::ElementRange,
            RangeIndex::Attribute(_) => IndexKind::AttributeRange,
            RangeIndex::Path(_) => IndexKind::PathRange,
            RangeIndex::Field(_) => IndexKind::FieldRange,
        }
    }

    fn idx_name(&self) -> &str {
        match self {
            RangeIndex::Element(i) => &i.idx_name,
            RangeIndex::Attribute(i) => &i.idx_name,
            RangeIndex::Path(i) => &i.idx_name,
            RangeIndex::Field(i) => &i.idx_name,
        }
    }
}

impl IndexRecord for GeoPointIndex {
    fn kind(&self) -> IndexKind {
        match self {
            GeoPointIndex::Element(_) => IndexKind::GeoElement,
            GeoPointIndex::ElementChild(_) => IndexKind::GeoElementChild,
            GeoPointIndex::ElementPair(_) => IndexKind::GeoElementPair,
            GeoPointIndex::AttributePair(_) => IndexKind::GeoAttributePair,
            GeoPointIndex::Path(_) => IndexKind::GeoPath,
        }
    }

    fn idx_name(&self) -> &str {
        match self {
            GeoPointIndex::Element(i) => &i.idx_name,
            GeoPointIndex::ElementChild(i) => &i.idx_name,
            GeoPointIndex::ElementPair(i) | GeoPointIndex::AttributePair(i) => &i.idx_name,
            GeoPointIndex::Path(i) => &i.idx_name,
        }
    }
}

impl IndexRecord for GeoRegionIndex {
    fn kind(&self) -> IndexKind {
        match self {
            GeoRegionIndex::Path(_) => IndexKind::GeoRegionPath,
        }
    }

    fn idx_name(&self) -> &str {
        match self {
            GeoRegionIndex::Path(i) => &i.idx_name,
        }
    }
}

/// Any index definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IndexDefinition {
    Range(RangeIndex),
    GeoPoint(GeoPointIndex),
    GeoRegion(GeoRegionIndex),
}

impl IndexDefinition {
    pub fn group(&self) -> IndexGroup {
        match self {
            IndexDefinition::Range(_) => IndexGroup::Range,
            IndexDefinition::GeoPoint(_) => IndexGroup::GeoPoint,
            IndexDefinition::GeoRegion(_) => IndexGroup::GeoRegion,
        }
    }
}

impl IndexRecord for IndexDefinition {
    fn kind(&self) -> IndexKind {
        match self {
            IndexDefinition::Range(i) => i.kind(),
            IndexDefinition::GeoPoint(i) => i.kind(),
            IndexDefinition::GeoRegion(i) => i.kind(),
        }
    }

    fn idx_name(&self) -> &str {
        match self {
            IndexDefinition::Range(i) => i.idx_name(),
            IndexDefinition::GeoPoint(i) => i.idx_name(),
            IndexDefinition::GeoRegion(i) => i.idx_name(),
        }
    }
}

/// Index configuration of one container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexConfiguration {
    pub range_indexes: Vec<RangeIndex>,
    pub geo_point_indexes: Vec<GeoPointIndex>,
    pub geo_region_indexes: Vec<GeoRegionIndex>,
}

impl IndexConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a definition to the sequence of its group
    pub fn push(&mut self, definition: IndexDefinition) {
        match definition {
            IndexDefinition::Range(i) => self.range_indexes.push(i),
            IndexDefinition::GeoPoint(i) => self.geo_point_indexes.push(i),
            IndexDefinition::GeoRegion(i) => self.geo_region_indexes.push(i),
        }
    }

    /// Total number of definitions
    pub fn len(&self) -> usize {
        self.range_indexes.len() + self.geo_point_indexes.len() + self.geo_region_indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of definitions of one family
    pub fn count_of(&self, kind: IndexKind) -> usize {
        match kind.group() {
            IndexGroup::Range => count_kind(&self.range_indexes, kind),
            IndexGroup::GeoPoint => count_kind(&self.geo_point_indexes, kind),
            IndexGroup::GeoRegion => count_kind(&self.geo_region_indexes, kind),
        }
    }
}

fn count_kind<T: IndexRecord>(items: &[T], kind: IndexKind) -> usize {
    items.iter().filter(|i| i.kind() == kind).count()
}

/// One element of an admin query response
///
/// `value` carries the XML text of a single definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    pub value: serde_json::Value,
}

impl RawResponse {
    /// Response element holding XML text
    pub fn xml(value: impl Into<String>) -> Self {
        Self {
            format: Some("xml".to_string()),
            datatype: Some("node()".to_string()),
            value: serde_json::Value::String(value.into()),
        }
    }
}
