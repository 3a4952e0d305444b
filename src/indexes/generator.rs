//! Index installation script generation
//!
//! Renders an [`IndexConfiguration`] as a server-side JavaScript program that
//! builds every definition with the admin module and installs them into the
//! container's database.

use tracing::debug;

use super::identifiers::IdentifierAllocator;
use super::kinds::{IndexGroup, IndexKind};
use super::types::{GeoPointIndex, GeoRegionIndex, IndexConfiguration, IndexRecord, RangeIndex};

/// One constructor argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptArg<'a> {
    /// Quoted string; absent renders as `""`
    Str(Option<&'a str>),
    Bool(bool),
    Int(i64),
    /// Bare identifier bound by the preamble
    Ident(&'static str),
}

impl ScriptArg<'_> {
    fn render(&self) -> String {
        match self {
            ScriptArg::Str(value) => quote(value.unwrap_or("")),
            ScriptArg::Bool(true) => "fn.true()".to_string(),
            ScriptArg::Bool(false) => "fn.false()".to_string(),
            ScriptArg::Int(value) => value.to_string(),
            ScriptArg::Ident(name) => name.to_string(),
        }
    }
}

/// Quote a string as a JavaScript literal
fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value))
}

/// Collation only applies to string range indexes
fn collation<'a>(scalar_type: &Option<String>, collation: &'a Option<String>) -> Option<&'a str> {
    if scalar_type.as_deref() == Some("string") {
        collation.as_deref()
    } else {
        Some("")
    }
}

/// Integer prefix of `text`, ignoring leading whitespace; 0 when there is none
pub fn parse_leading_int(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else {
            break;
        };
        value = value.saturating_mul(10).saturating_add(i64::from(d));
    }

    if negative { -value } else { value }
}

impl RangeIndex {
    fn script_args(&self) -> Vec<ScriptArg<'_>> {
        match self {
            RangeIndex::Element(i) => vec![
                ScriptArg::Str(i.scalar_type.as_deref()),
                ScriptArg::Str(i.namespace_uri.as_deref()),
                ScriptArg::Str(i.localname.as_deref()),
                ScriptArg::Str(collation(&i.scalar_type, &i.collation)),
                ScriptArg::Bool(i.range_value_positions),
                ScriptArg::Str(i.invalid_values.as_deref()),
            ],
            RangeIndex::Attribute(i) => vec![
                ScriptArg::Str(i.scalar_type.as_deref()),
                ScriptArg::Str(i.parent_namespace_uri.as_deref()),
                ScriptArg::Str(i.parent_localname.as_deref()),
                ScriptArg::Str(i.namespace_uri.as_deref()),
                ScriptArg::Str(i.localname.as_deref()),
                ScriptArg::Str(collation(&i.scalar_type, &i.collation)),
                ScriptArg::Bool(i.range_value_positions),
                ScriptArg::Str(i.invalid_values.as_deref()),
            ],
            RangeIndex::Path(i) => vec![
                ScriptArg::Ident("dbId"),
                ScriptArg::Str(i.scalar_type.as_deref()),
                ScriptArg::Str(i.path_expression.as_deref()),
                ScriptArg::Str(collation(&i.scalar_type, &i.collation)),
                ScriptArg::Bool(i.range_value_positions),
                ScriptArg::Str(i.invalid_values.as_deref()),
            ],
            RangeIndex::Field(i) => vec![
                ScriptArg::Str(i.scalar_type.as_deref()),
                ScriptArg::Str(i.field_name.as_deref()),
                ScriptArg::Str(collation(&i.scalar_type, &i.collation)),
                ScriptArg::Bool(i.range_value_positions),
                ScriptArg::Str(i.invalid_values.as_deref()),
            ],
        }
    }
}

impl GeoPointIndex {
    fn script_args(&self) -> Vec<ScriptArg<'_>> {
        match self {
            GeoPointIndex::Element(i) => vec![
                ScriptArg::Str(i.namespace_uri.as_deref()),
                ScriptArg::Str(i.localname.as_deref()),
                ScriptArg::Str(i.coordinate_system.as_deref()),
                ScriptArg::Bool(i.range_value_positions),
                ScriptArg::Str(i.point_format.as_deref()),
                ScriptArg::Str(i.invalid_values.as_deref()),
            ],
            GeoPointIndex::ElementChild(i) => vec![
                ScriptArg::Str(i.parent_namespace_uri.as_deref()),
                ScriptArg::Str(i.parent_localname.as_deref()),
                ScriptArg::Str(i.namespace_uri.as_deref()),
                ScriptArg::Str(i.localname.as_deref()),
                ScriptArg::Str(i.coordinate_system.as_deref()),
                ScriptArg::Bool(i.range_value_positions),
                ScriptArg::Str(i.point_format.as_deref()),
                ScriptArg::Str(i.invalid_values.as_deref()),
            ],
            GeoPointIndex::ElementPair(i) | GeoPointIndex::AttributePair(i) => vec![
                ScriptArg::Str(i.parent_namespace_uri.as_deref()),
                ScriptArg::Str(i.parent_localname.as_deref()),
                ScriptArg::Str(i.latitude_namespace_uri.as_deref()),
                ScriptArg::Str(i.latitude_localname.as_deref()),
                ScriptArg::Str(i.longitude_namespace_uri.as_deref()),
                ScriptArg::Str(i.longitude_localname.as_deref()),
                ScriptArg::Str(i.coordinate_system.as_deref()),
                ScriptArg::Bool(i.range_value_positions),
                ScriptArg::Str(i.invalid_values.as_deref()),
            ],
            GeoPointIndex::Path(i) => vec![
                ScriptArg::Str(i.path_expression.as_deref()),
                ScriptArg::Str(i.coordinate_system.as_deref()),
                ScriptArg::Bool(i.range_value_positions),
                ScriptArg::Str(i.point_format.as_deref()),
                ScriptArg::Str(i.invalid_values.as_deref()),
            ],
        }
    }
}

impl GeoRegionIndex {
    fn script_args(&self) -> Vec<ScriptArg<'_>> {
        match self {
            GeoRegionIndex::Path(i) => vec![
                ScriptArg::Str(i.path_expression.as_deref()),
                ScriptArg::Str(i.coordinate_system.as_deref()),
                ScriptArg::Int(i.geohash_precision.as_deref().map_or(0, parse_leading_int)),
                ScriptArg::Str(i.invalid_values.as_deref()),
                ScriptArg::Str(i.units.as_deref()),
            ],
        }
    }
}

fn constructor_statement(identifier: &str, kind: IndexKind, args: &[ScriptArg<'_>]) -> String {
    let rendered: Vec<String> = args.iter().map(ScriptArg::render).collect();
    format!(
        "const {} = admin.{}({});",
        identifier,
        kind.constructor(),
        rendered.join(", ")
    )
}

fn install_statement(kind: IndexKind, identifiers: &[String]) -> String {
    format!(
        "config = admin.{}(config, dbId, [{}]);",
        kind.install_fn(),
        identifiers.join(", ")
    )
}

/// Constructor statements and identifiers of one family
fn family_statements<'a, T, F>(
    items: &'a [T],
    kind: IndexKind,
    ids: &mut IdentifierAllocator,
    args: F,
) -> Vec<String>
where
    T: IndexRecord,
    F: Fn(&'a T) -> Vec<ScriptArg<'a>>,
{
    let mut statements = Vec::new();
    let mut identifiers = Vec::new();

    for item in items.iter().filter(|i| i.kind() == kind) {
        let identifier = ids.allocate(item.idx_name());
        statements.push(constructor_statement(&identifier, kind, &args(item)));
        identifiers.push(identifier);
    }

    if !identifiers.is_empty() {
        // Trailing newline leaves a blank line between families
        statements.push(format!("{}\n", install_statement(kind, &identifiers)));
    }

    statements
}

/// Fixed script preamble binding `admin`, `config` and `dbId`
pub fn script_preamble(container: &str) -> String {
    let lines = [
        "const admin = require(\"/MarkLogic/admin.xqy\");".to_string(),
        "let config = admin.getConfiguration();".to_string(),
        format!("const dbId = xdmp.database({});", quote(container)),
    ];
    lines.join("\n")
}

/// Fixed script epilogue
pub const SCRIPT_EPILOGUE: &str = "admin.saveConfiguration(config);";

/// Render the index installation script for a container
///
/// Families are rendered in [`IndexKind::ALL`] order, definitions in input
/// order. Identifiers are unique across the whole script. Returns an empty
/// string when there is nothing to install.
pub fn render_index_script(config: &IndexConfiguration, container: &str) -> String {
    let mut ids = IdentifierAllocator::new();
    let mut statements: Vec<String> = Vec::new();

    for kind in IndexKind::ALL {
        let family = match kind.group() {
            IndexGroup::Range => {
                family_statements(&config.range_indexes, kind, &mut ids, RangeIndex::script_args)
            }
            IndexGroup::GeoPoint => family_statements(
                &config.geo_point_indexes,
                kind,
                &mut ids,
                GeoPointIndex::script_args,
            ),
            IndexGroup::GeoRegion => family_statements(
                &config.geo_region_indexes,
                kind,
                &mut ids,
                GeoRegionIndex::script_args,
            ),
        };
        statements.extend(family);
    }

    if statements.is_empty() {
        return String::new();
    }

    debug!(
        "Rendered {} index definitions for '{}'",
        config.len(),
        container
    );

    format!(
        "{}\n\n{}\n\n{}",
        script_preamble(container),
        statements.join("\n"),
        SCRIPT_EPILOGUE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexes::types::{ElementRangeIndex, GeoRegionPathIndex, PathRangeIndex};

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("12"), 12);
        assert_eq!(parse_leading_int("  7 bits"), 7);
        assert_eq!(parse_leading_int("-3"), -3);
        assert_eq!(parse_leading_int("abc"), 0);
        assert_eq!(parse_leading_int(""), 0);
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }

    #[test]
    fn test_empty_configuration_renders_nothing() {
        assert_eq!(render_index_script(&IndexConfiguration::new(), "Documents"), "");
    }

    #[test]
    fn test_collation_dropped_for_non_string() {
        let index = RangeIndex::Element(ElementRangeIndex {
            idx_name: "n".to_string(),
            scalar_type: Some("int".to_string()),
            collation: Some("http://marklogic.com/collation/".to_string()),
            ..Default::default()
        });
        let args: Vec<String> = index.script_args().iter().map(ScriptArg::render).collect();
        assert_eq!(args, vec!["\"int\"", "\"\"", "\"\"", "\"\"", "fn.false()", "\"\""]);
    }

    #[test]
    fn test_path_range_takes_db_id() {
        let index = RangeIndex::Path(PathRangeIndex {
            idx_name: "p".to_string(),
            scalar_type: Some("string".to_string()),
            path_expression: Some("/a/b".to_string()),
            collation: Some("c".to_string()),
            range_value_positions: true,
            invalid_values: Some("ignore".to_string()),
        });
        let args: Vec<String> = index.script_args().iter().map(ScriptArg::render).collect();
        assert_eq!(
            args.join(", "),
            "dbId, \"string\", \"/a/b\", \"c\", fn.true(), \"ignore\""
        );
    }

    #[test]
    fn test_region_geohash_is_integer() {
        let index = GeoRegionIndex::Path(GeoRegionPathIndex {
            idx_name: "r".to_string(),
            geohash_precision: Some("3".to_string()),
            units: Some("miles".to_string()),
            ..Default::default()
        });
        let args: Vec<String> = index.script_args().iter().map(ScriptArg::render).collect();
        assert_eq!(args, vec!["\"\"", "\"\"", "3", "\"\"", "\"miles\""]);
    }

    #[test]
    fn test_preamble() {
        assert_eq!(
            script_preamble("Documents"),
            "const admin = require(\"/MarkLogic/admin.xqy\");\nlet config = admin.getConfiguration();\nconst dbId = xdmp.database(\"Documents\");"
        );
    }
}
