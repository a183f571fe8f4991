use crate::interface::config::GenerateConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tag-builder")]
#[command(version, about = "Extract tag metadata and generate tag classes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the model from declarations and generate tag classes
    Generate {
        /// Configuration file path; command-line values take precedence
        #[arg(short = 'c', long = "config")]
        config_file: Option<PathBuf>,

        /// Declarations file or directory
        #[arg(short = 's', long = "source")]
        source_path: Option<PathBuf>,

        /// Output root for generated sources
        #[arg(short = 'o', long = "output")]
        output_path: Option<PathBuf>,

        /// Id of the module being built
        #[arg(short = 'm', long = "model-id")]
        model_id: Option<String>,

        /// Tag format version (1.1 or 1.2)
        #[arg(short = 't', long = "target-version")]
        target_version: Option<String>,

        /// Keep generating after a descriptor fails
        #[arg(long, action = clap::ArgAction::SetTrue)]
        force: bool,

        /// Verbose output
        #[arg(long, action = clap::ArgAction::SetTrue)]
        verbose: bool,
    },
    /// Build, flatten and save the model without generating sources
    BuildMetadata {
        /// Declarations file or directory
        #[arg(short = 's', long = "source")]
        source_path: PathBuf,

        /// Id of the module being built
        #[arg(short = 'm', long = "model-id", default_value = "main")]
        model_id: String,

        /// Metadata file to write
        #[arg(short = 'o', long = "output")]
        output_path: PathBuf,

        /// Verbose output
        #[arg(long, action = clap::ArgAction::SetTrue)]
        verbose: bool,
    },
}

impl Commands {
    pub fn config_file(&self) -> Option<&PathBuf> {
        match self {
            Commands::Generate { config_file, .. } => config_file.as_ref(),
            Commands::BuildMetadata { .. } => None,
        }
    }
}

impl From<&Commands> for GenerateConfig {
    fn from(cmd: &Commands) -> Self {
        match cmd {
            Commands::Generate {
                source_path,
                output_path,
                model_id,
                target_version,
                force,
                verbose,
                ..
            } => {
                let mut config = GenerateConfig {
                    target_version: target_version.clone(),
                    force: force.then_some(true),
                    verbose: verbose.then_some(true),
                    ..Default::default()
                };
                if let Some(path) = source_path {
                    config.source_path = path.to_string_lossy().to_string();
                }
                if let Some(path) = output_path {
                    config.generated_source_directory = path.to_string_lossy().to_string();
                }
                if let Some(id) = model_id {
                    config.model_id = id.clone();
                }
                config
            }
            Commands::BuildMetadata {
                source_path,
                model_id,
                output_path,
                verbose,
            } => GenerateConfig {
                source_path: source_path.to_string_lossy().to_string(),
                model_id: model_id.clone(),
                metadata_file: Some(output_path.to_string_lossy().to_string()),
                verbose: verbose.then_some(true),
                ..Default::default()
            },
        }
    }
}
