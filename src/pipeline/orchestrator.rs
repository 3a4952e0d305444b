//! Asynchronous reverse-engineering orchestration over an [`AdminClient`]
//!
//! Collaborator calls run one after another within a session. Index and
//! property queries degrade: a failed query is logged and its result omitted.
//! Container listing, estimates and sampling abort the run.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{info, warn};

use super::error::{PipelineError, PipelineResult};
use super::package::{ContainerSample, EntityPackage, build_entity_packages};
use super::queries::{
    COLLECTIONS_QUERY, DIRECTORIES_QUERY, collection_estimate_query, directory_estimate_query,
    response_count, response_strings,
};
use super::session::ReverseSession;
use crate::client::{AdminClient, ContainerRef};
use crate::config::{ConnectorConfig, DocumentsOrganizing, Organization};
use crate::forward::ApplyTarget;
use crate::indexes::{IndexConfiguration, IndexKind, IndexResponses, extract_indexes};
use crate::properties::{DATABASE_PROPERTIES, collect_properties as fold_properties};

async fn list_collections(client: &dyn AdminClient) -> PipelineResult<Vec<String>> {
    let responses = client
        .eval_xquery(COLLECTIONS_QUERY)
        .await
        .map_err(|e| PipelineError::client("Listing collections", e))?;
    Ok(response_strings(&responses))
}

async fn list_directories(client: &dyn AdminClient) -> PipelineResult<Vec<String>> {
    let responses = client
        .eval_xquery(DIRECTORIES_QUERY)
        .await
        .map_err(|e| PipelineError::client("Listing directories", e))?;
    Ok(response_strings(&responses))
}

/// Resolve the organization of the configured database into a session
///
/// `auto` detects collections first and falls back to directories.
pub async fn resolve_session(
    client: &dyn AdminClient,
    config: &ConnectorConfig,
) -> PipelineResult<ReverseSession> {
    let organization = match config.documents_organizing.fixed() {
        Some(organization) => organization,
        None => Organization::detect(list_collections(client).await?.len()),
    };
    info!(
        "Database '{}' organizes documents by {:?}",
        config.db_name, organization
    );
    Ok(ReverseSession::from_config(config, organization))
}

/// List container names for the given organization setting
pub async fn list_containers(
    client: &dyn AdminClient,
    organizing: DocumentsOrganizing,
) -> PipelineResult<Vec<String>> {
    match organizing {
        DocumentsOrganizing::Collections => list_collections(client).await,
        DocumentsOrganizing::Directories => list_directories(client).await,
        DocumentsOrganizing::Auto => {
            let collections = list_collections(client).await?;
            if collections.is_empty() {
                list_directories(client).await
            } else {
                Ok(collections)
            }
        }
    }
}

/// Read the database settings that make up `bucketInfo`
pub async fn collect_properties(client: &dyn AdminClient, db_name: &str) -> Map<String, Value> {
    let mut responses = BTreeMap::new();

    for prop in DATABASE_PROPERTIES.iter() {
        match client.eval_xquery(&prop.admin_query(db_name)).await {
            Ok(response) => {
                responses.insert(prop.keyword.to_string(), response);
            }
            Err(e) => warn!("Retrieving database property {}: {}", prop.keyword, e),
        }
    }

    fold_properties(&responses)
}

/// Read and parse every index family of a database
pub async fn collect_indexes(client: &dyn AdminClient, db_name: &str) -> IndexConfiguration {
    info!("Retrieving indexes of '{}'", db_name);
    let mut responses = IndexResponses::new();

    for kind in IndexKind::ALL {
        match client.eval_xquery(&kind.admin_query(db_name)).await {
            Ok(family) => responses.insert(kind, family),
            Err(e) => warn!("Retrieving {} definitions: {}", kind, e),
        }
    }

    extract_indexes(&responses)
}

/// Number of documents to sample from a container
pub async fn sampling_count(
    client: &dyn AdminClient,
    session: &ReverseSession,
    container: &ContainerRef,
) -> PipelineResult<u64> {
    if !session.sampling.needs_estimate() {
        return Ok(session.sampling.sampling_count(0));
    }

    let query = match container {
        ContainerRef::Collection(name) => collection_estimate_query(name),
        ContainerRef::Directory(name) => directory_estimate_query(name, false),
    };
    let responses = client
        .eval_xquery(&query)
        .await
        .map_err(|e| PipelineError::client(format!("Estimating '{}'", container.name()), e))?;

    Ok(session.sampling.sampling_count(response_count(&responses)))
}

/// Sample the documents of one container
pub async fn sample_container(
    client: &dyn AdminClient,
    session: &ReverseSession,
    name: &str,
) -> PipelineResult<ContainerSample> {
    let container = session.container(name);
    let limit = sampling_count(client, session, &container).await?;
    let documents = client
        .sample_documents(&container, limit)
        .await
        .map_err(|e| PipelineError::client(format!("Sampling '{}'", name), e))?;
    info!("Loaded {} documents from '{}'", documents.len(), name);
    Ok(ContainerSample::new(name, documents))
}

/// Reverse-engineer the named containers of a session
///
/// `bucketInfo` carries the database settings plus the index configuration
/// under `rangeIndexes`, `geoPointIndexes` and `geoRegionIndexes`.
pub async fn reverse_engineer(
    client: &dyn AdminClient,
    session: &ReverseSession,
    containers: &[String],
) -> PipelineResult<Vec<EntityPackage>> {
    let mut bucket_info = collect_properties(client, &session.db_name).await;

    let indexes = collect_indexes(client, &session.db_name).await;
    match serde_json::to_value(&indexes) {
        Ok(Value::Object(sequences)) => bucket_info.extend(sequences),
        Ok(_) => {}
        Err(e) => warn!("Serializing index configuration: {}", e),
    }

    let mut samples = Vec::with_capacity(containers.len());
    for name in containers {
        samples.push(sample_container(client, session, name).await?);
    }

    let packages = build_entity_packages(session, &samples, &bucket_info);
    info!("Reverse-engineering of '{}' complete", session.db_name);
    Ok(packages)
}

/// Run a validated script against its schema database
pub async fn apply_script(client: &dyn AdminClient, target: &ApplyTarget) -> PipelineResult<()> {
    client
        .eval_javascript(&target.schema_db, &target.script)
        .await
        .map_err(|e| PipelineError::client("Applying script", e))
}
