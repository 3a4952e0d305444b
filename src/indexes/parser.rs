//! Admin response parsing
//!
//! Each response element carries the XML of one index definition. The child
//! elements of the root are read as text attributes and mapped onto the
//! family's record. Undecodable XML never fails the family: the record is built
//! from whatever was read before the error.

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, warn};

use super::kinds::IndexKind;
use super::types::{
    AttributeRangeIndex, ElementRangeIndex, FieldRangeIndex, GeoElementChildIndex,
    GeoElementIndex, GeoPairIndex, GeoPathIndex, GeoPointIndex, GeoRegionIndex,
    GeoRegionPathIndex, IndexDefinition, PathRangeIndex, RangeIndex, RawResponse,
};

/// Text of the direct children of a definition's root element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    values: BTreeMap<String, String>,
}

impl AttributeSet {
    /// Read the children of `root` from an XML document
    ///
    /// Returns the attributes collected so far when the document is malformed
    /// or the root does not match.
    pub fn from_xml(xml: &str, root: &str) -> AttributeSet {
        let mut set = AttributeSet::default();
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut depth = 0usize;
        let mut in_root = false;
        let mut current: Option<String> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                    depth += 1;
                    if depth == 1 {
                        in_root = name == root;
                        if !in_root {
                            debug!("Unexpected root element '{}', expected '{}'", name, root);
                        }
                    } else if depth == 2 && in_root {
                        set.values.entry(name.clone()).or_default();
                        current = Some(name);
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    if depth == 1 && in_root {
                        let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                        set.values.entry(name).or_default();
                    }
                }
                Ok(Event::Text(ref e)) => {
                    if depth == 2 {
                        if let Some(name) = &current {
                            match e.unescape() {
                                Ok(text) => set.append(name, &text),
                                Err(err) => {
                                    warn!("Undecodable text in '{}': {}", name, err);
                                }
                            }
                        }
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if depth == 2 {
                        if let Some(name) = &current {
                            let text = String::from_utf8_lossy(e).to_string();
                            set.append(name, &text);
                        }
                    }
                }
                Ok(Event::End(_)) => {
                    if depth == 2 {
                        current = None;
                    }
                    depth = depth.saturating_sub(1);
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    warn!("Malformed index definition XML: {}", e);
                    break;
                }
                _ => {}
            }
        }

        set
    }

    fn append(&mut self, name: &str, text: &str) {
        self.values.entry(name.to_string()).or_default().push_str(text);
    }

    /// Text of a child element; `None` when it was absent
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// Boolean child element; only the literal `true` is true
    pub fn flag(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(|v| v == "true")
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Build one family's record from its attributes
pub fn definition_from_attributes(
    kind: IndexKind,
    idx_name: String,
    attrs: &AttributeSet,
) -> IndexDefinition {
    match kind {
        IndexKind::ElementRange => IndexDefinition::Range(RangeIndex::Element(ElementRangeIndex {
            idx_name,
            scalar_type: attrs.get("scalar-type"),
            namespace_uri: attrs.get("namespace-uri"),
            localname: attrs.get("localname"),
            collation: attrs.get("collation"),
            range_value_positions: attrs.flag("range-value-positions"),
            invalid_values: attrs.get("invalid-values"),
        })),
        IndexKind::AttributeRange => {
            IndexDefinition::Range(RangeIndex::Attribute(AttributeRangeIndex {
                idx_name,
                scalar_type: attrs.get("scalar-type"),
                parent_namespace_uri: attrs.get("parent-namespace-uri"),
                parent_localname: attrs.get("parent-localname"),
                namespace_uri: attrs.get("namespace-uri"),
                localname: attrs.get("localname"),
                collation: attrs.get("collation"),
                range_value_positions: attrs.flag("range-value-positions"),
                invalid_values: attrs.get("invalid-values"),
            }))
        }
        IndexKind::PathRange => IndexDefinition::Range(RangeIndex::Path(PathRangeIndex {
            idx_name,
            scalar_type: attrs.get("scalar-type"),
            path_expression: attrs.get("path-expression"),
            collation: attrs.get("collation"),
            range_value_positions: attrs.flag("range-value-positions"),
            invalid_values: attrs.get("invalid-values"),
        })),
        IndexKind::FieldRange => IndexDefinition::Range(RangeIndex::Field(FieldRangeIndex {
            idx_name,
            scalar_type: attrs.get("scalar-type"),
            field_name: attrs.get("field-name"),
            collation: attrs.get("collation"),
            range_value_positions: attrs.flag("range-value-positions"),
            invalid_values: attrs.get("invalid-values"),
        })),
        IndexKind::GeoElement => IndexDefinition::GeoPoint(GeoPointIndex::Element(GeoElementIndex {
            idx_name,
            namespace_uri: attrs.get("namespace-uri"),
            localname: attrs.get("localname"),
            coordinate_system: attrs.get("coordinate-system"),
            point_format: attrs.get("point-format"),
            range_value_positions: attrs.flag("range-value-positions"),
            invalid_values: attrs.get("invalid-values"),
        })),
        IndexKind::GeoElementChild => {
            IndexDefinition::GeoPoint(GeoPointIndex::ElementChild(GeoElementChildIndex {
                idx_name,
                namespace_uri: attrs.get("namespace-uri"),
                localname: attrs.get("localname"),
                parent_namespace_uri: attrs.get("parent-namespace-uri"),
                parent_localname: attrs.get("parent-localname"),
                coordinate_system: attrs.get("coordinate-system"),
                point_format: attrs.get("point-format"),
                range_value_positions: attrs.flag("range-value-positions"),
                invalid_values: attrs.get("invalid-values"),
            }))
        }
        IndexKind::GeoElementPair => IndexDefinition::GeoPoint(GeoPointIndex::ElementPair(
            pair_from_attributes(idx_name, attrs),
        )),
        IndexKind::GeoAttributePair => IndexDefinition::GeoPoint(GeoPointIndex::AttributePair(
            pair_from_attributes(idx_name, attrs),
        )),
        IndexKind::GeoPath => IndexDefinition::GeoPoint(GeoPointIndex::Path(GeoPathIndex {
            idx_name,
            path_expression: attrs.get("path-expression"),
            point_format: attrs.get("point-format"),
            coordinate_system: attrs.get("coordinate-system"),
            range_value_positions: attrs.flag("range-value-positions"),
            invalid_values: attrs.get("invalid-values"),
        })),
        IndexKind::GeoRegionPath => {
            IndexDefinition::GeoRegion(GeoRegionIndex::Path(GeoRegionPathIndex {
                idx_name,
                path_expression: attrs.get("path-expression"),
                coordinate_system: attrs.get("coordinate-system"),
                units: attrs.get("units"),
                geohash_precision: attrs.get("geohash-precision"),
                invalid_values: attrs.get("invalid-values"),
            }))
        }
    }
}

fn pair_from_attributes(idx_name: String, attrs: &AttributeSet) -> GeoPairIndex {
    GeoPairIndex {
        idx_name,
        latitude_namespace_uri: attrs.get("latitude-namespace-uri"),
        latitude_localname: attrs.get("latitude-localname"),
        longitude_namespace_uri: attrs.get("longitude-namespace-uri"),
        longitude_localname: attrs.get("longitude-localname"),
        parent_namespace_uri: attrs.get("parent-namespace-uri"),
        parent_localname: attrs.get("parent-localname"),
        coordinate_system: attrs.get("coordinate-system"),
        range_value_positions: attrs.flag("range-value-positions"),
        invalid_values: attrs.get("invalid-values"),
    }
}

/// Parse every response element of one family
///
/// Definitions are named `"<label> (<n>)"` with `n` counting from 1 in
/// response order. A non-string `value` yields a record with defaults.
pub fn parse_family(responses: &[RawResponse], kind: IndexKind) -> Vec<IndexDefinition> {
    responses
        .iter()
        .enumerate()
        .map(|(i, response)| {
            let attrs = match response.value.as_str() {
                Some(xml) => AttributeSet::from_xml(xml, kind.xml_root()),
                None => {
                    warn!("{} response {} is not XML text", kind, i + 1);
                    AttributeSet::default()
                }
            };
            let idx_name = format!("{} ({})", kind.label(), i + 1);
            definition_from_attributes(kind, idx_name, &attrs)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexes::types::IndexRecord;

    const ELEMENT_RANGE: &str = r#"<range-element-index xmlns="http://marklogic.com/xdmp/database">
  <scalar-type>string</scalar-type>
  <namespace-uri/>
  <localname>title</localname>
  <collation>http://marklogic.com/collation/</collation>
  <range-value-positions>false</range-value-positions>
  <invalid-values>reject</invalid-values>
</range-element-index>"#;

    #[test]
    fn test_attribute_set_reads_children() {
        let attrs = AttributeSet::from_xml(ELEMENT_RANGE, "range-element-index");
        assert_eq!(attrs.get("scalar-type").as_deref(), Some("string"));
        assert_eq!(attrs.get("namespace-uri").as_deref(), Some(""));
        assert_eq!(attrs.get("field-name"), None);
        assert!(!attrs.flag("range-value-positions"));
    }

    #[test]
    fn test_attribute_set_unescapes_text() {
        let xml = "<range-path-index><path-expression>/a[@b=&quot;c&quot;]</path-expression></range-path-index>";
        let attrs = AttributeSet::from_xml(xml, "range-path-index");
        assert_eq!(attrs.get("path-expression").as_deref(), Some("/a[@b=\"c\"]"));
    }

    #[test]
    fn test_nested_elements_are_ignored() {
        let xml = "<range-field-index><field-name>f</field-name><extra><field-name>x</field-name></extra></range-field-index>";
        let attrs = AttributeSet::from_xml(xml, "range-field-index");
        assert_eq!(attrs.get("field-name").as_deref(), Some("f"));
        assert_eq!(attrs.get("extra").as_deref(), Some(""));
    }

    #[test]
    fn test_wrong_root_yields_defaults() {
        let attrs = AttributeSet::from_xml(ELEMENT_RANGE, "range-path-index");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_parse_family_names_and_flags() {
        let true_xml = ELEMENT_RANGE.replace(
            "<range-value-positions>false",
            "<range-value-positions>true",
        );
        let responses = vec![RawResponse::xml(ELEMENT_RANGE), RawResponse::xml(true_xml)];
        let defs = parse_family(&responses, IndexKind::ElementRange);
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].idx_name(), "Element index (1)");
        assert_eq!(defs[1].idx_name(), "Element index (2)");
        match &defs[1] {
            IndexDefinition::Range(RangeIndex::Element(e)) => {
                assert!(e.range_value_positions);
                assert_eq!(e.localname.as_deref(), Some("title"));
            }
            other => panic!("Unexpected definition {other:?}"),
        }
    }

    #[test]
    fn test_malformed_xml_is_best_effort() {
        let responses = vec![
            RawResponse::xml("<geospatial-region-path-index><units>miles</units><broken"),
            RawResponse {
                value: serde_json::json!(42),
                ..RawResponse::default()
            },
        ];
        let defs = parse_family(&responses, IndexKind::GeoRegionPath);
        assert_eq!(defs.len(), 2);
        match &defs[0] {
            IndexDefinition::GeoRegion(GeoRegionIndex::Path(r)) => {
                assert_eq!(r.units.as_deref(), Some("miles"));
                assert_eq!(r.path_expression, None);
            }
            other => panic!("Unexpected definition {other:?}"),
        }
        assert_eq!(defs[1].idx_name(), "Geospatial region index (2)");
    }
}
