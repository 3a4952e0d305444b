//! Database client abstraction
//!
//! The connector never talks to the network itself. Transport, credentials and
//! TLS belong to an [`AdminClient`] implementation supplied by the host.

use async_trait::async_trait;
use serde_json::Value;

use crate::indexes::RawResponse;

/// Error type for client operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Query failed: {0}")]
    Query(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Response decode error: {0}")]
    Decode(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// A container to sample documents from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainerRef {
    Collection(String),
    /// Documents directly inside a directory
    Directory(String),
}

impl ContainerRef {
    pub fn name(&self) -> &str {
        match self {
            ContainerRef::Collection(name) | ContainerRef::Directory(name) => name,
        }
    }
}

/// Trait for database clients
#[async_trait]
pub trait AdminClient: Send + Sync {
    /// Evaluate an XQuery expression and return its result items
    async fn eval_xquery(&self, query: &str) -> ClientResult<Vec<RawResponse>>;

    /// Fetch the content of at most `limit` documents of a container
    async fn sample_documents(&self, container: &ContainerRef, limit: u64)
    -> ClientResult<Vec<Value>>;

    /// Evaluate a JavaScript program against a database
    async fn eval_javascript(&self, database: &str, script: &str) -> ClientResult<()>;
}
