//! Reverse-engineering pipeline
//!
//! The synchronous half ([`build_entity_package`], [`build_entity_packages`])
//! turns already-sampled documents into packages. The asynchronous half drives
//! an [`AdminClient`](crate::client::AdminClient) to list containers, sample
//! them and collect database settings and indexes.

mod error;
mod orchestrator;
mod package;
pub mod queries;
mod session;

pub use error::{PipelineError, PipelineResult};
pub use orchestrator::{
    apply_script, collect_indexes, collect_properties, list_containers, resolve_session,
    reverse_engineer, sample_container, sampling_count,
};
pub use package::{
    ContainerLevelKeys, ContainerSample, EntityLevel, EntityPackage, Validation,
    build_entity_package, build_entity_packages,
};
pub use session::ReverseSession;
