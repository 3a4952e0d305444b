//! Index configuration extraction
//!
//! Turns the per-family admin responses of one container into a typed
//! [`IndexConfiguration`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::kinds::IndexKind;
use super::parser::parse_family;
use super::types::{IndexConfiguration, RawResponse};

/// Raw admin responses keyed by family
///
/// A family without an entry was not queried (or its query failed) and
/// contributes no definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexResponses {
    families: BTreeMap<IndexKind, Vec<RawResponse>>,
}

impl IndexResponses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the response of one family, replacing any earlier one
    pub fn insert(&mut self, kind: IndexKind, responses: Vec<RawResponse>) {
        self.families.insert(kind, responses);
    }

    /// Builder-style [`IndexResponses::insert`]
    pub fn with(mut self, kind: IndexKind, responses: Vec<RawResponse>) -> Self {
        self.insert(kind, responses);
        self
    }

    pub fn get(&self, kind: IndexKind) -> Option<&[RawResponse]> {
        self.families.get(&kind).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

/// Build a fresh index configuration from admin responses
///
/// Families are parsed in rendering order, so each sequence lists its
/// definitions grouped by family.
pub fn extract_indexes(responses: &IndexResponses) -> IndexConfiguration {
    let mut config = IndexConfiguration::new();

    for kind in IndexKind::ALL {
        let Some(family) = responses.get(kind) else {
            continue;
        };
        let definitions = parse_family(family, kind);
        debug!("Extracted {} {} definitions", definitions.len(), kind);
        for definition in definitions {
            config.push(definition);
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_responses_is_empty() {
        let config = extract_indexes(&IndexResponses::new());
        assert!(config.is_empty());
    }

    #[test]
    fn test_families_land_in_their_group() {
        let responses = IndexResponses::new()
            .with(
                IndexKind::GeoPath,
                vec![RawResponse::xml(
                    "<geospatial-path-index><path-expression>/loc</path-expression></geospatial-path-index>",
                )],
            )
            .with(
                IndexKind::FieldRange,
                vec![RawResponse::xml(
                    "<range-field-index><field-name>f</field-name></range-field-index>",
                )],
            );
        let config = extract_indexes(&responses);
        assert_eq!(config.range_indexes.len(), 1);
        assert_eq!(config.geo_point_indexes.len(), 1);
        assert_eq!(config.count_of(IndexKind::GeoPath), 1);
    }

    #[test]
    fn test_responses_deserialize_by_family_name() {
        let responses: IndexResponses = serde_json::from_value(json!({
            "elementRange": [{"format": "xml", "value": "<range-element-index/>"}],
            "geoRegionPath": []
        }))
        .unwrap();
        assert_eq!(responses.get(IndexKind::ElementRange).map(<[_]>::len), Some(1));
        assert_eq!(responses.get(IndexKind::GeoRegionPath).map(<[_]>::len), Some(0));
        assert!(responses.get(IndexKind::PathRange).is_none());
    }
}
