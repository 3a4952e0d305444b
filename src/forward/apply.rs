//! Script application request validation

use serde_json::Value;

use super::error::{ForwardError, ForwardResult};

/// A validated request to run a generated script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyTarget {
    pub script: String,
    /// Database the script runs against
    pub schema_db: String,
}

impl ApplyTarget {
    /// Validate a script and the container data it applies to
    ///
    /// The first container entry must name a `schemaDB`.
    pub fn from_request(script: &str, container_data: Option<&[Value]>) -> ForwardResult<Self> {
        if script.is_empty() {
            return Err(ForwardError::EmptyScript);
        }
        let container_data = container_data.ok_or(ForwardError::EmptyContainerData)?;

        let schema_db = container_data
            .first()
            .and_then(|props| props.get("schemaDB"))
            .and_then(Value::as_str)
            .filter(|db| !db.is_empty())
            .ok_or(ForwardError::MissingSchemaDatabase)?;

        Ok(Self {
            script: script.to_string(),
            schema_db: schema_db.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_request() {
        let data = vec![json!({"schemaDB": "Schemas"})];
        let target = ApplyTarget::from_request("declareUpdate();", Some(data.as_slice())).unwrap();
        assert_eq!(target.schema_db, "Schemas");
    }

    #[test]
    fn test_rejections() {
        let data = vec![json!({"schemaDB": "Schemas"})];
        assert_eq!(
            ApplyTarget::from_request("", Some(data.as_slice())),
            Err(ForwardError::EmptyScript)
        );
        assert_eq!(
            ApplyTarget::from_request("x", None),
            Err(ForwardError::EmptyContainerData)
        );
        assert_eq!(
            ApplyTarget::from_request("x", Some(&[][..])),
            Err(ForwardError::MissingSchemaDatabase)
        );
        let unnamed = vec![json!({"schemaDB": ""})];
        assert_eq!(
            ApplyTarget::from_request("x", Some(unnamed.as_slice())),
            Err(ForwardError::MissingSchemaDatabase)
        );
    }
}
