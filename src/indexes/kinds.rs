//! Index families known to the database admin API
//!
//! Every family is a closed table entry: the admin getter used to list it, the
//! XML root of one listed definition, its human label and the admin functions
//! that rebuild it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which configuration sequence a family belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexGroup {
    Range,
    GeoPoint,
    GeoRegion,
}

impl IndexGroup {
    /// Name of the sequence in an index configuration
    pub fn config_key(&self) -> &'static str {
        match self {
            IndexGroup::Range => "rangeIndexes",
            IndexGroup::GeoPoint => "geoPointIndexes",
            IndexGroup::GeoRegion => "geoRegionIndexes",
        }
    }
}

/// One index family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexKind {
    ElementRange,
    AttributeRange,
    PathRange,
    FieldRange,
    GeoElement,
    GeoElementChild,
    GeoElementPair,
    GeoAttributePair,
    GeoPath,
    GeoRegionPath,
}

impl IndexKind {
    /// All families, in script rendering order
    pub const ALL: [IndexKind; 10] = [
        IndexKind::ElementRange,
        IndexKind::AttributeRange,
        IndexKind::PathRange,
        IndexKind::FieldRange,
        IndexKind::GeoElement,
        IndexKind::GeoElementChild,
        IndexKind::GeoElementPair,
        IndexKind::GeoAttributePair,
        IndexKind::GeoPath,
        IndexKind::GeoRegionPath,
    ];

    pub fn group(&self) -> IndexGroup {
        match self {
            IndexKind::ElementRange
            | IndexKind::AttributeRange
            | IndexKind::PathRange
            | IndexKind::FieldRange => IndexGroup::Range,
            IndexKind::GeoElement
            | IndexKind::GeoElementChild
            | IndexKind::GeoElementPair
            | IndexKind::GeoAttributePair
            | IndexKind::GeoPath => IndexGroup::GeoPoint,
            IndexKind::GeoRegionPath => IndexGroup::GeoRegion,
        }
    }

    /// `idxType` tag; unique within a group only
    pub fn idx_type(&self) -> &'static str {
        match self {
            IndexKind::ElementRange | IndexKind::GeoElement => "Element",
            IndexKind::AttributeRange => "Attribute",
            IndexKind::PathRange | IndexKind::GeoPath | IndexKind::GeoRegionPath => "Path",
            IndexKind::FieldRange => "Field",
            IndexKind::GeoElementChild => "Element child",
            IndexKind::GeoElementPair => "Element pair",
            IndexKind::GeoAttributePair => "Attribute pair",
        }
    }

    /// Label used for generated index names
    pub fn label(&self) -> &'static str {
        match self {
            IndexKind::ElementRange => "Element index",
            IndexKind::AttributeRange => "Attribute index",
            IndexKind::PathRange => "Path index",
            IndexKind::FieldRange => "Field index",
            IndexKind::GeoElement => "Geospatial element index",
            IndexKind::GeoElementChild => "Geospatial element child index",
            IndexKind::GeoElementPair => "Geospatial element pair index",
            IndexKind::GeoAttributePair => "Geospatial attribute pair index",
            IndexKind::GeoPath => "Geospatial path index",
            IndexKind::GeoRegionPath => "Geospatial region index",
        }
    }

    /// Admin XQuery function listing the family
    pub fn admin_getter(&self) -> &'static str {
        match self {
            IndexKind::ElementRange => "database-get-range-element-indexes",
            IndexKind::AttributeRange => "database-get-range-element-attribute-indexes",
            IndexKind::PathRange => "database-get-range-path-indexes",
            IndexKind::FieldRange => "database-get-range-field-indexes",
            IndexKind::GeoElement => "database-get-geospatial-element-indexes",
            IndexKind::GeoElementChild => "database-get-geospatial-element-child-indexes",
            IndexKind::GeoElementPair => "database-get-geospatial-element-pair-indexes",
            IndexKind::GeoAttributePair => {
                "database-get-geospatial-element-attribute-pair-indexes"
            }
            IndexKind::GeoPath => "database-get-geospatial-path-indexes",
            IndexKind::GeoRegionPath => "database-get-geospatial-region-path-indexes",
        }
    }

    /// Root element of one listed definition
    pub fn xml_root(&self) -> &'static str {
        match self {
            IndexKind::ElementRange => "range-element-index",
            IndexKind::AttributeRange => "range-element-attribute-index",
            IndexKind::PathRange => "range-path-index",
            IndexKind::FieldRange => "range-field-index",
            IndexKind::GeoElement => "geospatial-element-index",
            IndexKind::GeoElementChild => "geospatial-element-child-index",
            IndexKind::GeoElementPair => "geospatial-element-pair-index",
            IndexKind::GeoAttributePair => "geospatial-element-attribute-pair-index",
            IndexKind::GeoPath => "geospatial-path-index",
            IndexKind::GeoRegionPath => "geospatial-region-path-index",
        }
    }

    /// Admin constructor building one definition
    pub fn constructor(&self) -> &'static str {
        match self {
            IndexKind::ElementRange => "databaseRangeElementIndex",
            IndexKind::AttributeRange => "databaseRangeElementAttributeIndex",
            IndexKind::PathRange => "databaseRangePathIndex",
            IndexKind::FieldRange => "databaseRangeFieldIndex",
            IndexKind::GeoElement => "databaseGeospatialElementIndex",
            IndexKind::GeoElementChild => "databaseGeospatialElementChildIndex",
            IndexKind::GeoElementPair => "databaseGeospatialElementPairIndex",
            IndexKind::GeoAttributePair => "databaseGeospatialElementAttributePairIndex",
            IndexKind::GeoPath => "databaseGeospatialPathIndex",
            IndexKind::GeoRegionPath => "databaseGeospatialRegionPathIndex",
        }
    }

    /// Admin function installing a batch of definitions
    pub fn install_fn(&self) -> &'static str {
        match self {
            IndexKind::ElementRange => "databaseAddRangeElementIndex",
            IndexKind::AttributeRange => "databaseAddRangeElementAttributeIndex",
            IndexKind::PathRange => "databaseAddRangePathIndex",
            IndexKind::FieldRange => "databaseAddRangeFieldIndex",
            IndexKind::GeoElement => "databaseAddGeospatialElementIndex",
            IndexKind::GeoElementChild => "databaseAddGeospatialElementChildIndex",
            IndexKind::GeoElementPair => "databaseAddGeospatialElementPairIndex",
            IndexKind::GeoAttributePair => "databaseAddGeospatialElementAttributePairIndex",
            IndexKind::GeoPath => "databaseAddGeospatialPathIndex",
            IndexKind::GeoRegionPath => "databaseAddGeospatialRegionPathIndex",
        }
    }

    /// Families of one group, in rendering order
    pub fn in_group(group: IndexGroup) -> impl Iterator<Item = IndexKind> {
        IndexKind::ALL.into_iter().filter(move |k| k.group() == group)
    }

    /// Resolve a family from its group and `idxType` tag
    pub fn from_tag(group: IndexGroup, idx_type: &str) -> Option<IndexKind> {
        IndexKind::in_group(group).find(|k| k.idx_type() == idx_type)
    }

    /// XQuery listing this family's definitions for a database
    pub fn admin_query(&self, db_name: &str) -> String {
        admin_call(self.admin_getter(), db_name)
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// XQuery invoking an admin getter against the database configuration
fn admin_call(getter: &str, db_name: &str) -> String {
    format!(
        "xquery version \"1.0-ml\"; import module namespace admin = \"http://marklogic.com/xdmp/admin\" at \"/MarkLogic/admin.xqy\"; let $config := admin:get-configuration() return admin:{}($config, xdmp:database(\"{}\"));",
        getter, db_name
    )
}
