use crate::error::{Error, Result};
use crate::generators::file_writer::SourceWriter;
use crate::generators::selector::{GenerationSelector, Selection, SkipReason};
use crate::generators::template_context::{Bindings, TemplateUtils};
use crate::generators::templates::{default_template_name, TemplateRenderer};
use crate::interface::output::Logger;
use crate::model::Model;
use crate::models::{DescriptorKind, DescriptorRef};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What to generate and how to react to failures
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Kinds to generate, in this order
    pub targets: Vec<DescriptorKind>,
    /// Template used for every target instead of the version default
    pub template_name: Option<String>,
    pub target_version: Option<String>,
    /// Log and record failures instead of aborting the run
    pub continue_on_error: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            targets: vec![DescriptorKind::Converter],
            template_name: None,
            target_version: None,
            continue_on_error: false,
        }
    }
}

impl GenerationOptions {
    pub fn template_for(&self, kind: DescriptorKind) -> Option<String> {
        self.template_name
            .clone()
            .filter(|name| !name.is_empty())
            .or_else(|| default_template_name(kind, self.target_version.as_deref()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSource {
    pub kind: DescriptorKind,
    pub key: String,
    pub class_name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedDescriptor {
    pub kind: DescriptorKind,
    pub key: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedDescriptor {
    pub kind: DescriptorKind,
    pub key: String,
    pub error: String,
}

/// Outcome of one generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub generated: Vec<GeneratedSource>,
    pub skipped: Vec<SkippedDescriptor>,
    pub failed: Vec<FailedDescriptor>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn generated_paths(&self) -> Vec<&Path> {
        self.generated.iter().map(|g| g.path.as_path()).collect()
    }
}

/// Renders and writes one source file per selected descriptor
pub struct TagGenerator {
    renderer: Box<dyn TemplateRenderer>,
    options: GenerationOptions,
    utils: TemplateUtils,
    logger: Logger,
}

impl TagGenerator {
    pub fn new(renderer: Box<dyn TemplateRenderer>, options: GenerationOptions, logger: Logger) -> Self {
        let utils = TemplateUtils::new(options.target_version.as_deref());
        Self {
            renderer,
            options,
            utils,
            logger,
        }
    }

    /// Run selection, rendering and writing over every target kind.
    ///
    /// In fail-fast mode the first failure is returned as an error; files
    /// written before it stay in place.
    pub fn generate(
        &self,
        model: &Model,
        selector: &GenerationSelector,
        writer: &mut SourceWriter,
    ) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();

        for selection in selector.select_all(model, &self.options.targets) {
            match selection {
                Selection::Skip { descriptor, reason } => {
                    self.record_skip(&mut report, descriptor, reason);
                }
                Selection::Generate {
                    descriptor,
                    class_name,
                    relative_path,
                } => {
                    self.logger.info(&format!("Generating {}", class_name));
                    match self.generate_one(descriptor, &relative_path, writer) {
                        Ok(path) => report.generated.push(GeneratedSource {
                            kind: descriptor.kind(),
                            key: descriptor.key(),
                            class_name: class_name.to_string(),
                            path,
                        }),
                        Err(e) if self.options.continue_on_error => {
                            self.logger.error(&e.to_string());
                            report.failed.push(FailedDescriptor {
                                kind: descriptor.kind(),
                                key: descriptor.key(),
                                error: e.to_string(),
                            });
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        Ok(report)
    }

    fn record_skip(&self, report: &mut GenerationReport, descriptor: DescriptorRef<'_>, reason: SkipReason) {
        self.logger.verbose(&format!(
            "Skipping {} {}: {}",
            descriptor.kind(),
            descriptor.key(),
            reason
        ));
        report.skipped.push(SkippedDescriptor {
            kind: descriptor.kind(),
            key: descriptor.key(),
            reason: reason.to_string(),
        });
    }

    fn generate_one(
        &self,
        descriptor: DescriptorRef<'_>,
        relative_path: &Path,
        writer: &mut SourceWriter,
    ) -> Result<PathBuf> {
        let failure = |message: String| Error::Generation {
            descriptor: format!("{} {}", descriptor.kind(), descriptor.key()),
            message,
        };

        let template_name = self
            .options
            .template_for(descriptor.kind())
            .ok_or_else(|| failure(format!("no template for {} descriptors", descriptor.kind())))?;
        if !self.renderer.has_template(&template_name) {
            return Err(failure(format!("template '{}' not found", template_name)));
        }

        let bindings =
            Bindings::for_descriptor(&self.utils, descriptor).map_err(|e| failure(e.to_string()))?;
        let content = self
            .renderer
            .render(&template_name, &bindings)
            .map_err(|e| failure(e.to_string()))?;

        writer
            .write_source(relative_path, &content)
            .map_err(|e| failure(e.to_string()))
    }
}
