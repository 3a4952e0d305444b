//! Per-session reverse-engineering context

use crate::client::ContainerRef;
use crate::config::{ConnectorConfig, Organization, RecordSamplingSettings};

/// Everything one reverse-engineering run needs to know about its database
///
/// The organization is resolved once per session and passed explicitly to every
/// step that depends on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseSession {
    pub db_name: String,
    pub organization: Organization,
    pub sampling: RecordSamplingSettings,
}

impl ReverseSession {
    pub fn new(
        db_name: impl Into<String>,
        organization: Organization,
        sampling: RecordSamplingSettings,
    ) -> Self {
        Self {
            db_name: db_name.into(),
            organization,
            sampling,
        }
    }

    /// Session for a configuration whose organization has been resolved
    pub fn from_config(config: &ConnectorConfig, organization: Organization) -> Self {
        Self::new(
            config.db_name.clone(),
            organization,
            config.record_sampling_settings,
        )
    }

    /// Whether containers are directories
    pub fn uses_directories(&self) -> bool {
        self.organization == Organization::Directories
    }

    /// Reference to a named container under this session's organization
    pub fn container(&self, name: &str) -> ContainerRef {
        match self.organization {
            Organization::Collections => ContainerRef::Collection(name.to_string()),
            Organization::Directories => ContainerRef::Directory(name.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_ref_follows_organization() {
        let sampling = RecordSamplingSettings::default();
        let dirs = ReverseSession::new("Documents", Organization::Directories, sampling);
        assert!(dirs.uses_directories());
        assert_eq!(dirs.container("/a/"), ContainerRef::Directory("/a/".to_string()));

        let colls = ReverseSession::from_config(&ConnectorConfig::default(), Organization::Collections);
        assert_eq!(colls.db_name, "Documents");
        assert_eq!(colls.container("users").name(), "users");
    }
}
