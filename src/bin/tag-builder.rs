use clap::Parser;
use std::path::Path;
use tag_builder::build::BuildSystem;
use tag_builder::interface::{
    build_metadata_from_config, generate_from_config, print_generation_summary, Cli, Commands,
};
use tag_builder::GenerateConfig;

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Generate { .. } => run_generate(&cli.command),
        Commands::BuildMetadata { .. } => run_build_metadata(&cli.command),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_generate(command: &Commands) -> Result<(), Box<dyn std::error::Error>> {
    let cli_config = GenerateConfig::from(command);
    let build_system = BuildSystem::new(cli_config.is_verbose(), false);

    let mut config =
        build_system.load_configuration(command.config_file().map(|p| p.as_path()), Path::new("."))?;
    config.merge(&cli_config);

    let report = generate_from_config(&config)?;
    print_generation_summary(&config.generated_source_directory, &report);

    if !report.is_success() {
        return Err(format!("{} descriptor(s) failed to generate", report.failed.len()).into());
    }
    Ok(())
}

fn run_build_metadata(command: &Commands) -> Result<(), Box<dyn std::error::Error>> {
    let config = GenerateConfig::from(command);
    let model = build_metadata_from_config(&config)?;
    println!(
        "Metadata for '{}' ({} descriptors) written to {}",
        model.model_id,
        model.len(),
        config.metadata_file.as_deref().unwrap_or_default()
    );
    Ok(())
}
