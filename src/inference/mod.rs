//! Schema inference for document containers
//!
//! Derives one structural JSON schema per container from a sample of its documents.
//!
//! ## Pipeline
//!
//! - **Merge** - fold the sample into a single document template
//! - **Unify** - infer a schema node per value; homogeneous arrays collapse to one item
//! - **Geospatial** - geometry-shaped objects are replaced by predefined snippets
//! - **Envelope** - wrap the body in the draft-04 container envelope
//!
//! ## Example
//!
//! ```rust
//! use docdb_modelling_sdk::inference::build_schema;
//! use serde_json::json;
//!
//! let docs = vec![
//!     json!({"name": "x", "tags": ["a"]}),
//!     json!({"name": "y", "tags": ["b"]}),
//! ];
//! let schema = build_schema(&docs, None);
//! assert!(schema.property("tags").is_some());
//! ```

mod builder;
mod error;
pub mod geospatial;
mod merge;
mod types;
mod unifier;

pub use builder::{SchemaBuilder, build_schema, find_parent_directory, schema_envelope};
pub use error::{InferenceError, InferenceResult};
pub use geospatial::{Snippet, SnippetField, detect_geometry, snippet_for};
pub use merge::{merge, merge_document, merge_documents, merge_into};
pub use types::{GeoKind, Items, NodeType, SCHEMA_DIALECT, SchemaNode};
pub use unifier::{ValueKind, infer, infer_array, infer_object};
