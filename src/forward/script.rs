//! Schema insert script generation

use tracing::debug;

use super::error::ForwardResult;
use super::schema::ValidationSchemaData;

/// Fixed schema script preamble
pub const SCHEMA_SCRIPT_PREAMBLE: &str = "'use strict';\n\ndeclareUpdate();";

/// Statement inserting one schema document
pub fn insert_statement(data: &ValidationSchemaData) -> String {
    let uri = serde_json::to_string(&data.uri).unwrap_or_else(|_| format!("\"{}\"", data.uri));
    let body = serde_json::to_string_pretty(&data.schema).unwrap_or_else(|_| "{}".to_string());
    format!("xdmp.documentInsert({}, {});", uri, body)
}

/// Render the script inserting every schema
///
/// Returns an empty string when there are no schemas.
pub fn render_schema_script(schemas: &[ValidationSchemaData]) -> String {
    if schemas.is_empty() {
        return String::new();
    }

    debug!("Rendering insert script for {} schemas", schemas.len());

    let mut script = SCHEMA_SCRIPT_PREAMBLE.to_string();
    for data in schemas {
        script.push_str("\n\n");
        script.push_str(&insert_statement(data));
    }
    script
}

/// Parse container schema texts and render their insert script
pub fn generate_container_script<S: AsRef<str>>(collections: &[S]) -> ForwardResult<String> {
    let schemas = collections
        .iter()
        .map(|text| ValidationSchemaData::from_json(text.as_ref()))
        .collect::<ForwardResult<Vec<_>>>()?;
    Ok(render_schema_script(&schemas))
}
