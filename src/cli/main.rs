//! DocDB modelling CLI binary.
//!
//! Offline access to the modelling SDK:
//! - Infer a JSON Schema from document files
//! - Parse captured index responses and render index scripts
//! - Render schema insert scripts
//! - Show the resolved connector configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "docdb-modelling", version, about = "Document database modelling tools")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Infer a JSON Schema from JSON, JSON array or JSON lines files
    Infer {
        files: Vec<PathBuf>,

        /// Parent collection recorded in the schema
        #[arg(long)]
        parent: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Parse captured index responses
    Indexes {
        /// JSON file mapping index kinds to raw responses
        responses: PathBuf,

        /// Render the index script for this container instead of the configuration
        #[arg(long)]
        script: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Render the insert script for container schema files
    SchemaScript { files: Vec<PathBuf> },

    /// Print the resolved connector configuration
    ShowConfig {
        /// Connector configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let rendered = match cli.command {
        Commands::Infer {
            files,
            parent,
            format,
        } => commands::infer(&files, parent, format)?,
        Commands::Indexes {
            responses,
            script,
            format,
        } => commands::indexes(&responses, script.as_deref(), format)?,
        Commands::SchemaScript { files } => commands::schema_script(&files)?,
        Commands::ShowConfig { config, format } => {
            commands::show_config(config.as_deref(), format)?
        }
    };

    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_belongs_to_show_config() {
        let cli = Cli::try_parse_from(["docdb-modelling", "show-config", "--config", "conn.toml"])
            .unwrap();
        match cli.command {
            Commands::ShowConfig { config, .. } => {
                assert_eq!(config, Some(PathBuf::from("conn.toml")));
            }
            _ => panic!("expected show-config"),
        }

        assert!(
            Cli::try_parse_from(["docdb-modelling", "infer", "--config", "conn.toml", "docs.json"])
                .is_err()
        );
    }
}
