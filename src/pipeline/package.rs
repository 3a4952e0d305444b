//! Entity packages handed back to the modelling tool

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::session::ReverseSession;
use crate::inference::{SchemaNode, build_schema, find_parent_directory};

/// Documents sampled from one container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerSample {
    pub name: String,
    pub documents: Vec<Value>,
}

impl ContainerSample {
    pub fn new(name: impl Into<String>, documents: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            documents,
        }
    }
}

/// Entity-level settings of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityLevel {
    /// `collection` or `directory`
    pub store_as_coll_dir: String,
}

/// Mapping of document envelope keys, identical for every package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerLevelKeys {
    pub uri: String,
    #[serde(rename = "_format")]
    pub format: String,
    pub content_type: String,
    pub content: String,
}

impl Default for ContainerLevelKeys {
    fn default() -> Self {
        Self {
            uri: "uri".to_string(),
            format: "format".to_string(),
            content_type: "contentType".to_string(),
            content: "content".to_string(),
        }
    }
}

/// Inferred validation data of a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub json_schema: SchemaNode,
}

/// Reverse-engineered description of one container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityPackage {
    pub db_name: String,
    pub collection_name: String,
    pub documents: Vec<Value>,
    pub entity_level: EntityLevel,
    pub container_level_keys: ContainerLevelKeys,
    pub bucket_info: Map<String, Value>,
    pub validation: Validation,
}

/// Build the package of one container
///
/// `siblings` lists every container of the session; under directory
/// organization the nearest listed ancestor becomes the schema's parent.
pub fn build_entity_package<S: AsRef<str>>(
    session: &ReverseSession,
    sample: &ContainerSample,
    siblings: &[S],
    bucket_info: &Map<String, Value>,
) -> EntityPackage {
    let parent = if session.uses_directories() {
        find_parent_directory(&sample.name, siblings)
    } else {
        None
    };

    debug!(
        "Building package for '{}' from {} documents",
        sample.name,
        sample.documents.len()
    );

    EntityPackage {
        db_name: session.db_name.clone(),
        collection_name: sample.name.clone(),
        documents: sample.documents.clone(),
        entity_level: EntityLevel {
            store_as_coll_dir: session.organization.store_as().to_string(),
        },
        container_level_keys: ContainerLevelKeys::default(),
        bucket_info: bucket_info.clone(),
        validation: Validation {
            json_schema: build_schema(&sample.documents, parent.as_deref()),
        },
    }
}

/// Build packages for every sampled container of a session
pub fn build_entity_packages(
    session: &ReverseSession,
    samples: &[ContainerSample],
    bucket_info: &Map<String, Value>,
) -> Vec<EntityPackage> {
    let names: Vec<&str> = samples.iter().map(|s| s.name.as_str()).collect();
    samples
        .iter()
        .map(|sample| build_entity_package(session, sample, &names, bucket_info))
        .collect()
}
