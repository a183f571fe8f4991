//! # tag-builder
//!
//! Build-time metadata extraction and code generation for UI tag descriptors.
//!
//! Classes are read from declaration files (see [`analysis::source::DeclarationSet`]).
//! Each class may declare any of four descriptor kinds, either with annotations or
//! with comment tags:
//!
//! - **Converter**: a value converter plus the properties it exposes
//! - **TemplateTag**: a component tag usable in view templates
//! - **TemplateFunction**: a static function callable from view templates
//! - **GenericTag**: a plain tag handler with attributes
//!
//! The descriptors are collected into a [`Model`], records are inherited down the
//! class hierarchy, and one tag class is generated per selected descriptor from
//! Tera templates. Classes that already exist as hand-written sources are skipped.
//!
//! ## As a CLI Tool
//!
//! ```bash
//! # Generate tag classes for the current module
//! tag-builder generate --source target/declarations --target-version 1.2
//!
//! # Only build and save the flattened model, e.g. for a dependent module
//! tag-builder build-metadata --source target/declarations --model-id api --output meta/api.json
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,no_run
//! use tag_builder::{generate_from_config, GenerateConfig};
//!
//! let config = GenerateConfig {
//!     source_path: "./target/declarations".to_string(),
//!     target_version: Some("1.2".to_string()),
//!     targets: vec!["converter".to_string(), "generic-tag".to_string()],
//!     verbose: Some(true),
//!     ..Default::default()
//! };
//!
//! let report = generate_from_config(&config)?;
//! println!("{} files generated", report.generated.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Configuration
//!
//! `tag-builder.json` in the working directory is picked up automatically:
//!
//! ```json
//! {
//!   "source_path": "target/declarations",
//!   "model_id": "core",
//!   "dependency_models": ["../api/target/meta/api.json"],
//!   "metadata_file": "target/meta/core.json",
//!   "package_contains": "org.example",
//!   "targets": ["converter", "template-tag", "generic-tag"],
//!   "target_version": "1.2"
//! }
//! ```

pub mod analysis;
pub mod build;
mod error;
pub mod generators;
pub mod interface;
pub mod model;
pub mod models;

pub use error::{Error, Result};
pub use model::Model;
pub use models::*;

pub use analysis::source::{DeclarationSet, SourceIndex};
pub use analysis::MetadataAnalyzer;
pub use generators::{GenerationReport, TemplateRenderer, TeraRenderer};

pub use interface::config::GenerateConfig;
pub use interface::generate_from_config;
pub use interface::output::{BuildPhase, Logger, PhaseReporter, Verbosity};

pub use build::BuildSystem;
