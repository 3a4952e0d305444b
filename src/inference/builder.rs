//! Container schema builder
//!
//! Folds a container's sample documents into one template, infers its structure and
//! wraps the result in the container envelope.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::error::{InferenceError, InferenceResult};
use super::merge::merge_document;
use super::types::{NodeType, SCHEMA_DIALECT, SchemaNode};
use super::unifier;

/// Envelope every container schema starts from
pub fn schema_envelope() -> SchemaNode {
    SchemaNode {
        schema: Some(SCHEMA_DIALECT.to_string()),
        node_type: Some(NodeType::Object),
        additional_properties: Some(false),
        properties: Some(BTreeMap::new()),
        ..SchemaNode::default()
    }
}

/// Build the schema of one container
///
/// Documents are merged left to right, the merged template is inferred and the
/// inferred keys override the envelope. `parent` becomes `parentCollection`.
/// Never fails; no documents yields the bare envelope.
pub fn build_schema<'a, I>(documents: I, parent: Option<&str>) -> SchemaNode
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut builder = SchemaBuilder::new();
    for document in documents {
        builder.add_value(document);
    }
    if let Some(parent) = parent {
        builder = builder.parent(parent);
    }
    builder.finalize()
}

/// Incremental container schema builder
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    template: Map<String, Value>,
    parent: Option<String>,
    document_count: usize,
    skipped_count: usize,
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            template: Map::new(),
            parent: None,
            document_count: 0,
            skipped_count: 0,
        }
    }

    /// Set the parent container recorded on the schema
    pub fn parent(mut self, name: impl Into<String>) -> Self {
        self.parent = Some(name.into());
        self
    }

    /// Merge a parsed document into the template
    pub fn add_value(&mut self, document: &Value) {
        merge_document(&mut self.template, document);
        self.document_count += 1;
    }

    /// Parse and merge a single JSON document
    pub fn add_json(&mut self, json: &str) -> Result<(), InferenceError> {
        let value: Value = serde_json::from_str(json)?;
        self.add_value(&value);
        Ok(())
    }

    /// Merge newline-delimited JSON, skipping blank and unparseable lines
    ///
    /// Returns the number of documents merged.
    pub fn add_json_lines(&mut self, text: &str) -> usize {
        let mut added = 0;
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(line) {
                Ok(value) => {
                    self.add_value(&value);
                    added += 1;
                }
                Err(e) => {
                    warn!("Skipping document on line {}: {}", line_no + 1, e);
                    self.skipped_count += 1;
                }
            }
        }
        added
    }

    /// Load documents from a file holding either a JSON array or JSON lines
    ///
    /// Returns the number of documents merged.
    pub fn add_json_file(&mut self, path: &Path) -> InferenceResult<usize> {
        let text = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(documents)) => {
                for document in &documents {
                    self.add_value(document);
                }
                Ok(documents.len())
            }
            Ok(document) => {
                self.add_value(&document);
                Ok(1)
            }
            Err(_) => Ok(self.add_json_lines(&text)),
        }
    }

    /// Number of documents merged so far
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Number of lines rejected by [`SchemaBuilder::add_json_lines`]
    pub fn skipped_count(&self) -> usize {
        self.skipped_count
    }

    /// Current merged template
    pub fn template(&self) -> &Map<String, Value> {
        &self.template
    }

    /// Infer the template and wrap it in the envelope
    pub fn finalize(self) -> SchemaNode {
        debug!(
            "Building schema from {} documents ({} skipped)",
            self.document_count, self.skipped_count
        );

        let body = unifier::infer(&Value::Object(self.template));
        let mut schema = schema_envelope();

        if body.node_type.is_some() {
            schema.node_type = body.node_type;
        }
        if body.sub_type.is_some() {
            schema.sub_type = body.sub_type;
        }
        if body.properties.is_some() {
            schema.properties = body.properties;
        }
        if body.items.is_some() {
            schema.items = body.items;
        }

        schema.parent_collection = self.parent;
        schema
    }
}

/// Find the nearest ancestor directory of `path` that is itself a container
///
/// Walks up one segment at a time (`/a/b/c/` checks `/a/b/`, then `/a/`). The root
/// directory is never returned, and the walk is bounded by the path's segment
/// count.
pub fn find_parent_directory<S: AsRef<str>>(path: &str, siblings: &[S]) -> Option<String> {
    let max_steps = path.split('/').filter(|s| !s.is_empty()).count();
    let mut current = path.to_string();

    for _ in 0..max_steps {
        let parent = parent_path(&current)?;
        if parent == "/" {
            return None;
        }
        if siblings.iter().any(|s| s.as_ref() == parent) {
            return Some(parent);
        }
        current = parent;
    }

    None
}

fn parent_path(path: &str) -> Option<String> {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    let cut = trimmed.rfind('/')?;
    Some(trimmed[..=cut].to_string())
}
