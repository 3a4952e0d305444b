//! DocDB Modelling SDK - Reverse- and forward-engineering for document databases
//!
//! Provides:
//! - JSON Schema inference from sampled documents, with GeoJSON detection
//! - Index definition parsing and index script generation
//! - Database property collection
//! - Schema insert script generation
//! - An asynchronous reverse-engineering pipeline over a pluggable client

pub mod client;
pub mod config;
pub mod forward;
pub mod indexes;
pub mod inference;
pub mod pipeline;
pub mod properties;

pub use client::{AdminClient, ClientError, ClientResult, ContainerRef};
pub use config::{
    ConnectorConfig, ConnectorConfigBuilder, DocumentsOrganizing, Organization,
    RecordSamplingSettings, SamplingMode,
};
pub use forward::{
    ApplyTarget, ForwardError, ForwardResult, ValidationSchemaData, adopt_schema,
    generate_container_script, render_schema_script,
};
pub use indexes::{
    IndexConfiguration, IndexDefinition, IndexKind, IndexResponses, RawResponse, extract_indexes,
    render_index_script,
};
pub use inference::{
    InferenceError, InferenceResult, SchemaBuilder, SchemaNode, build_schema,
    find_parent_directory,
};
pub use pipeline::{
    EntityPackage, PipelineError, PipelineResult, ReverseSession, build_entity_packages,
    reverse_engineer,
};
