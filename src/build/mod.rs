use crate::analysis::source::DeclarationSet;
use crate::analysis::MetadataAnalyzer;
use crate::generators::{
    create_renderer, GenerationOptions, GenerationReport, GenerationSelector, SelectionFilter,
    SourceWriter, TagGenerator,
};
use crate::interface::config::{ConfigError, GenerateConfig};
use crate::interface::output::{print_ambiguities, BuildPhase, Logger, PhaseReporter, Verbosity};
use crate::model::Model;
use std::fmt::Display;
use std::path::Path;

/// Standalone configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "tag-builder.json";

/// Orchestrates extraction, flattening and generation
pub struct BuildSystem {
    logger: Logger,
}

impl BuildSystem {
    pub fn new(verbose: bool, debug: bool) -> Self {
        Self {
            logger: Logger::new(Verbosity::from_flags(verbose, debug)),
        }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Load the explicit config file, else `tag-builder.json` below `root`,
    /// else the defaults
    pub fn load_configuration(
        &self,
        explicit: Option<&Path>,
        root: &Path,
    ) -> Result<GenerateConfig, ConfigError> {
        if let Some(path) = explicit {
            let config = GenerateConfig::from_file(path)?;
            self.logger
                .debug(&format!("Loaded configuration from {}", path.display()));
            return Ok(config);
        }

        let standalone_config = root.join(CONFIG_FILE_NAME);
        if standalone_config.exists() {
            match GenerateConfig::from_file(&standalone_config) {
                Ok(config) => {
                    self.logger
                        .debug(&format!("Loaded configuration from {}", CONFIG_FILE_NAME));
                    return Ok(config);
                }
                Err(e) => {
                    self.logger.warning(&format!(
                        "Failed to load config from {}: {}. Using defaults.",
                        CONFIG_FILE_NAME, e
                    ));
                }
            }
        }

        self.logger.debug("Using default configuration");
        Ok(GenerateConfig::default())
    }

    /// Build, flatten and save the model, then generate sources
    pub fn run_generation(
        &self,
        config: &GenerateConfig,
    ) -> Result<GenerationReport, Box<dyn std::error::Error>> {
        config.validate()?;
        let mut reporter = PhaseReporter::new(self.logger.clone(), &BuildPhase::GENERATION);

        let model = self.build_model(config, &mut reporter)?;

        reporter.begin(BuildPhase::Generate);
        let report = attempt(&mut reporter, self.generate_sources(config, &model))?;
        reporter.done(Some(format!(
            "{} generated, {} skipped, {} failed",
            report.generated.len(),
            report.skipped.len(),
            report.failed.len()
        )));

        reporter.finish(&format!(
            "Generated {} source files for model '{}'",
            report.generated.len(),
            model.model_id
        ));
        Ok(report)
    }

    /// Build, flatten and save the model only
    pub fn run_metadata(&self, config: &GenerateConfig) -> Result<Model, Box<dyn std::error::Error>> {
        config.validate()?;
        let mut reporter = PhaseReporter::new(self.logger.clone(), &BuildPhase::METADATA);
        let model = self.build_model(config, &mut reporter)?;
        reporter.finish(&format!(
            "Built metadata for model '{}' with {} descriptors",
            model.model_id,
            model.len()
        ));
        Ok(model)
    }

    fn build_model(
        &self,
        config: &GenerateConfig,
        reporter: &mut PhaseReporter,
    ) -> Result<Model, Box<dyn std::error::Error>> {
        reporter.begin(BuildPhase::LoadDeclarations);
        let declarations = attempt(reporter, DeclarationSet::load(&config.source_path))?;
        reporter.done(Some(format!("{} classes", declarations.len())));

        reporter.begin(BuildPhase::Analyze);
        let mut analyzer = MetadataAnalyzer::new(config.model_id.clone());
        let mut model = attempt(reporter, analyzer.analyze(&declarations))?;
        print_ambiguities(&self.logger, analyzer.ambiguities());
        reporter.done(Some(format!("{} descriptors", model.len())));

        reporter.begin(BuildPhase::MergeDependencies);
        for path in config.dependency_models.iter().flatten() {
            let dependency = attempt(reporter, Model::load(path))?;
            reporter.note(&format!("model '{}' from {}", dependency.model_id, path));
            model.merge(dependency);
        }
        reporter.done(None);

        reporter.begin(BuildPhase::Flatten);
        model.flatten();
        reporter.done(None);

        reporter.begin(BuildPhase::SaveMetadata);
        match &config.metadata_file {
            Some(path) => {
                attempt(reporter, model.save(path))?;
                reporter.done(Some(format!("written to {}", path)));
            }
            None => reporter.done(Some("no metadata file configured".to_string())),
        }

        Ok(model)
    }

    fn generate_sources(
        &self,
        config: &GenerateConfig,
        model: &Model,
    ) -> Result<GenerationReport, Box<dyn std::error::Error>> {
        let renderer = create_renderer(config.template_source_directory.as_deref().map(Path::new))?;
        let generator = TagGenerator::new(renderer, generation_options(config)?, self.logger.clone());
        let mut writer = SourceWriter::new(&config.generated_source_directory)?;
        Ok(generator.generate(model, &selector_for(config), &mut writer)?)
    }
}

/// Selector built from the configured filters and hand-written roots
pub fn selector_for(config: &GenerateConfig) -> GenerationSelector {
    let filter = SelectionFilter::new(config.allowed_model_ids())
        .with_package_prefix(config.package_contains.clone())
        .with_id_prefix(config.type_prefix.clone());

    config
        .hand_written_roots()
        .into_iter()
        .fold(
            GenerationSelector::new(filter, &config.file_extension),
            |selector, root| selector.with_hand_written_root(root),
        )
}

pub fn generation_options(config: &GenerateConfig) -> Result<GenerationOptions, ConfigError> {
    Ok(GenerationOptions {
        targets: config.target_kinds()?,
        template_name: config.template_name.clone(),
        target_version: config.target_version.clone(),
        continue_on_error: config.should_continue_on_error(),
    })
}

fn attempt<T, E: Display>(reporter: &mut PhaseReporter, result: Result<T, E>) -> Result<T, E> {
    if let Err(e) = &result {
        reporter.fail(e);
    }
    result
}
