//! Connector configuration

use serde::{Deserialize, Deserializer, Serialize, de};

/// How documents are grouped into containers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentsOrganizing {
    /// Collections when the database has any, directories otherwise
    #[default]
    Auto,
    Collections,
    Directories,
}

/// Resolved container organization of a database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Organization {
    Collections,
    Directories,
}

impl Organization {
    /// Organization implied by the database's collection list
    pub fn detect(collection_count: usize) -> Organization {
        if collection_count > 0 {
            Organization::Collections
        } else {
            Organization::Directories
        }
    }

    /// Value of `entityLevel.storeAsCollDir`
    pub fn store_as(&self) -> &'static str {
        match self {
            Organization::Collections => "collection",
            Organization::Directories => "directory",
        }
    }
}

impl DocumentsOrganizing {
    /// Fixed organization, if the setting does not require detection
    pub fn fixed(&self) -> Option<Organization> {
        match self {
            DocumentsOrganizing::Auto => None,
            DocumentsOrganizing::Collections => Some(Organization::Collections),
            DocumentsOrganizing::Directories => Some(Organization::Directories),
        }
    }
}

/// Which sampling rule is in effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMode {
    #[default]
    Absolute,
    Relative,
}

/// Sampling value as sent by the host, either a number or numeric text
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    /// Blank text counts as 0
    fn to_f64<E: de::Error>(&self) -> Result<f64, E> {
        match self {
            NumberOrText::Number(n) => Ok(*n),
            NumberOrText::Text(text) if text.trim().is_empty() => Ok(0.0),
            NumberOrText::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid sampling value '{}'", text))),
        }
    }
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = NumberOrText::deserialize(deserializer)?.to_f64()?;
    Ok(value.max(0.0).round() as u64)
}

fn lenient_percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    NumberOrText::deserialize(deserializer)?.to_f64()
}

/// Fixed number of documents per container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsoluteSampling {
    #[serde(deserialize_with = "lenient_count")]
    pub value: u64,
}

impl Default for AbsoluteSampling {
    fn default() -> Self {
        Self { value: 1000 }
    }
}

/// Percentage of a container's documents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeSampling {
    #[serde(deserialize_with = "lenient_percent")]
    pub value: f64,
}

impl Default for RelativeSampling {
    fn default() -> Self {
        Self { value: 1.0 }
    }
}

/// Document sampling settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordSamplingSettings {
    pub active: SamplingMode,
    pub absolute: AbsoluteSampling,
    pub relative: RelativeSampling,
}

impl RecordSamplingSettings {
    /// Sample a fixed number of documents
    pub fn absolute(count: u64) -> Self {
        Self {
            active: SamplingMode::Absolute,
            absolute: AbsoluteSampling { value: count },
            ..Self::default()
        }
    }

    /// Sample a percentage of each container
    pub fn relative(percent: f64) -> Self {
        Self {
            active: SamplingMode::Relative,
            relative: RelativeSampling {
                value: percent.clamp(0.0, 100.0),
            },
            ..Self::default()
        }
    }

    /// True when the container's document count is needed
    pub fn needs_estimate(&self) -> bool {
        self.active == SamplingMode::Relative
    }

    /// Number of documents to sample from a container of `total` documents
    pub fn sampling_count(&self, total: u64) -> u64 {
        match self.active {
            SamplingMode::Absolute => self.absolute.value,
            SamplingMode::Relative => (total as f64 * self.relative.value / 100.0).round() as u64,
        }
    }
}

/// Connector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectorConfig {
    /// Database to reverse-engineer
    pub db_name: String,
    pub documents_organizing: DocumentsOrganizing,
    pub record_sampling_settings: RecordSamplingSettings,
}

/// Default database name
pub const DEFAULT_DB_NAME: &str = "Documents";

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            db_name: DEFAULT_DB_NAME.to_string(),
            documents_organizing: DocumentsOrganizing::default(),
            record_sampling_settings: RecordSamplingSettings::default(),
        }
    }
}

impl ConnectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ConnectorConfigBuilder {
        ConnectorConfigBuilder::default()
    }

    /// Parse a TOML configuration
    #[cfg(feature = "cli")]
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Builder for ConnectorConfig
#[derive(Debug, Default)]
pub struct ConnectorConfigBuilder {
    config: ConnectorConfig,
}

impl ConnectorConfigBuilder {
    /// Set the database name
    pub fn db_name(mut self, name: impl Into<String>) -> Self {
        self.config.db_name = name.into();
        self
    }

    /// Set how documents are grouped into containers
    pub fn documents_organizing(mut self, organizing: DocumentsOrganizing) -> Self {
        self.config.documents_organizing = organizing;
        self
    }

    /// Set the sampling settings
    pub fn sampling(mut self, settings: RecordSamplingSettings) -> Self {
        self.config.record_sampling_settings = settings;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ConnectorConfig {
        self.config
    }
}
