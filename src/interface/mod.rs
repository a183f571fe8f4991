pub mod cli;
pub mod config;
pub mod output;

use crate::build::BuildSystem;
use crate::generators::GenerationReport;
use crate::model::Model;

pub use cli::*;
pub use config::*;
pub use output::*;

/// Build the model described by `config` and generate its sources
pub fn generate_from_config(
    config: &config::GenerateConfig,
) -> Result<GenerationReport, Box<dyn std::error::Error>> {
    let build_system = BuildSystem::new(config.is_verbose(), false);
    let logger = build_system.logger();

    if config.is_verbose() {
        logger.info(&format!("Reading declarations from {}", config.source_path));
        logger.verbose(&format!("  model id: {}", config.model_id));
        logger.verbose(&format!("  selected models: {}", config.allowed_model_ids().join(", ")));
        logger.verbose(&format!("  targets: {}", config.targets.join(", ")));
    }

    let report = build_system.run_generation(config)?;

    if config.is_verbose() {
        for path in report.generated_paths() {
            logger.verbose(&format!("  wrote {}", path.display()));
        }
    }

    Ok(report)
}

/// Build, flatten and save the model described by `config` without generating
pub fn build_metadata_from_config(
    config: &config::GenerateConfig,
) -> Result<Model, Box<dyn std::error::Error>> {
    if config.metadata_file.is_none() {
        return Err(Box::new(ConfigError::InvalidConfig(
            "metadata_file is required to build metadata".to_string(),
        )));
    }
    BuildSystem::new(config.is_verbose(), false).run_metadata(config)
}
