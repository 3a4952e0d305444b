//! Error types for the reverse-engineering pipeline

use thiserror::Error;

use crate::client::ClientError;

/// Errors that abort a pipeline run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// A collaborator call failed during the named step
    #[error("{step} failed: {source}")]
    Client {
        step: String,
        #[source]
        source: ClientError,
    },
}

impl PipelineError {
    pub fn client(step: impl Into<String>, source: ClientError) -> Self {
        PipelineError::Client {
            step: step.into(),
            source,
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
