//! Error types for forward engineering

use thiserror::Error;

/// Errors raised while turning schemas into scripts or preparing to apply them
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForwardError {
    /// Schema text is not valid JSON
    #[error("Invalid schema JSON: {0}")]
    InvalidSchema(String),

    /// Schema has neither `schemaURI` nor a code/collection name
    #[error("Schema has no URI, code or collection name")]
    MissingSchemaName,

    #[error("Empty script")]
    EmptyScript,

    #[error("Empty container data")]
    EmptyContainerData,

    #[error("Schema database wasn't specified")]
    MissingSchemaDatabase,
}

impl From<serde_json::Error> for ForwardError {
    fn from(e: serde_json::Error) -> Self {
        ForwardError::InvalidSchema(e.to_string())
    }
}

/// Result type for forward engineering operations
pub type ForwardResult<T> = Result<T, ForwardError>;
