//! Command handlers

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use docdb_modelling_sdk::{
    ConnectorConfig, IndexResponses, SchemaBuilder, extract_indexes, generate_container_script,
    render_index_script,
};

use crate::output::{OutputFormat, format_index_summary};

pub fn infer(files: &[PathBuf], parent: Option<String>, format: OutputFormat) -> Result<String> {
    if files.is_empty() {
        bail!("No input files given");
    }

    let mut builder = SchemaBuilder::new();
    if let Some(parent) = parent {
        builder = builder.parent(parent);
    }
    for file in files {
        let added = builder
            .add_json_file(file)
            .with_context(|| format!("Failed to read documents from {}", file.display()))?;
        info!("Read {} document(s) from {}", added, file.display());
    }
    if builder.skipped_count() > 0 {
        warn!("Skipped {} unparseable line(s)", builder.skipped_count());
    }

    let schema = builder.finalize();
    format.render(&schema)
}

pub fn indexes(responses: &Path, container: Option<&str>, format: OutputFormat) -> Result<String> {
    let text = fs::read_to_string(responses)
        .with_context(|| format!("Failed to read {}", responses.display()))?;
    let responses: IndexResponses = serde_json::from_str(&text)
        .with_context(|| format!("Invalid index responses in {}", responses.display()))?;

    let config = extract_indexes(&responses);
    info!("{}", format_index_summary(&config));

    match container {
        Some(container) => Ok(render_index_script(&config, container)),
        None => format.render(&config),
    }
}

pub fn schema_script(files: &[PathBuf]) -> Result<String> {
    let texts = files
        .iter()
        .map(|file| {
            fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(generate_container_script(&texts)?)
}

pub fn show_config(path: Option<&Path>, format: OutputFormat) -> Result<String> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            ConnectorConfig::from_toml_str(&text)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?
        }
        None => ConnectorConfig::default(),
    };
    format.render(&config)
}
