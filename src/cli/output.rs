//! Output formatting for CLI

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use docdb_modelling_sdk::{IndexConfiguration, IndexKind};

/// Serialization format of command output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        Ok(match self {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
        })
    }
}

/// One-line summary of parsed index definitions per family
pub fn format_index_summary(config: &IndexConfiguration) -> String {
    if config.is_empty() {
        return "No index definitions found".to_string();
    }

    let counts: Vec<String> = IndexKind::ALL
        .iter()
        .filter_map(|kind| {
            let count = config.count_of(*kind);
            (count > 0).then(|| format!("{}: {}", kind, count))
        })
        .collect();
    format!("Parsed {} index definition(s) ({})", config.len(), counts.join(", "))
}
