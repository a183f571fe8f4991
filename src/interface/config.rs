use crate::models::DescriptorKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenerateConfig {
    /// Declarations file, or a directory of `*.json` declaration files
    #[serde(default = "default_source_path")]
    pub source_path: String,

    /// Id stamped on every descriptor extracted from `source_path`
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Model ids whose descriptors are generated (defaults to `[model_id]`)
    #[serde(default)]
    pub model_ids: Option<Vec<String>>,

    /// Metadata files of other modules merged into the model before flattening
    #[serde(default)]
    pub dependency_models: Option<Vec<String>>,

    /// Where the flattened model is saved as JSON
    #[serde(default)]
    pub metadata_file: Option<String>,

    /// Output root for generated sources
    #[serde(default = "default_generated_source_directory")]
    pub generated_source_directory: String,

    /// Hand-written sources; a file there suppresses generation of the same class
    #[serde(default = "default_main_source_directory")]
    pub main_source_directory: String,

    #[serde(default)]
    pub main_source_directory2: Option<String>,

    /// Directory of `*.tera` files replacing built-in templates
    #[serde(default)]
    pub template_source_directory: Option<String>,

    /// Template used for every target instead of the version default
    #[serde(default)]
    pub template_name: Option<String>,

    /// Tag format version; "1.2" selects the current templates
    #[serde(default)]
    pub target_version: Option<String>,

    /// Only generate classes whose package starts with this prefix
    #[serde(default)]
    pub package_contains: Option<String>,

    /// Only generate descriptors whose id starts with this prefix
    #[serde(default)]
    pub type_prefix: Option<String>,

    /// Keep generating after a descriptor fails
    #[serde(default)]
    pub force: Option<bool>,

    /// Descriptor kinds to generate
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,

    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: Option<bool>,
}

fn default_source_path() -> String {
    "./target/declarations".to_string()
}

fn default_model_id() -> String {
    "main".to_string()
}

fn default_generated_source_directory() -> String {
    "./target/generated-sources/tag-builder".to_string()
}

fn default_main_source_directory() -> String {
    "src/main/java".to_string()
}

fn default_targets() -> Vec<String> {
    vec![DescriptorKind::Converter.to_string()]
}

fn default_file_extension() -> String {
    "java".to_string()
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            model_id: default_model_id(),
            model_ids: None,
            dependency_models: None,
            metadata_file: None,
            generated_source_directory: default_generated_source_directory(),
            main_source_directory: default_main_source_directory(),
            main_source_directory2: None,
            template_source_directory: None,
            template_name: None,
            target_version: None,
            package_contains: None,
            type_prefix: None,
            force: Some(false),
            targets: default_targets(),
            file_extension: default_file_extension(),
            verbose: Some(false),
        }
    }
}

impl GenerateConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file.
    ///
    /// The result is not validated: command line values are merged over it
    /// first and the merged configuration is validated before a build.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model_id.trim().is_empty() {
            return Err(ConfigError::InvalidConfig("model_id must not be empty".to_string()));
        }

        if self.file_extension.trim().is_empty() || self.file_extension.contains('.') {
            return Err(ConfigError::InvalidConfig(format!(
                "Invalid file extension: '{}'",
                self.file_extension
            )));
        }

        self.target_kinds()?;

        let source_path = Path::new(&self.source_path);
        if !source_path.exists() {
            return Err(ConfigError::InvalidConfig(format!(
                "Source path does not exist: {}",
                self.source_path
            )));
        }

        if let Some(dir) = &self.template_source_directory {
            if !Path::new(dir).is_dir() {
                return Err(ConfigError::InvalidConfig(format!(
                    "Template source directory does not exist: {}",
                    dir
                )));
            }
        }

        Ok(())
    }

    /// Merge with another configuration, with other taking precedence
    pub fn merge(&mut self, other: &GenerateConfig) {
        if other.source_path != default_source_path() {
            self.source_path = other.source_path.clone();
        }
        if other.model_id != default_model_id() {
            self.model_id = other.model_id.clone();
        }
        if other.generated_source_directory != default_generated_source_directory() {
            self.generated_source_directory = other.generated_source_directory.clone();
        }
        if other.main_source_directory != default_main_source_directory() {
            self.main_source_directory = other.main_source_directory.clone();
        }
        if other.targets != default_targets() {
            self.targets = other.targets.clone();
        }
        if other.file_extension != default_file_extension() {
            self.file_extension = other.file_extension.clone();
        }

        macro_rules! merge_option {
            ($($field:ident),* $(,)?) => {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field.clone();
                    }
                )*
            };
        }

        merge_option!(
            model_ids,
            dependency_models,
            metadata_file,
            main_source_directory2,
            template_source_directory,
            template_name,
            target_version,
            package_contains,
            type_prefix,
            force,
            verbose,
        );
    }

    /// Get effective verbose setting
    pub fn is_verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    /// Get effective force setting
    pub fn should_continue_on_error(&self) -> bool {
        self.force.unwrap_or(false)
    }

    /// Model ids selected for generation
    pub fn allowed_model_ids(&self) -> Vec<String> {
        match &self.model_ids {
            Some(ids) if !ids.is_empty() => ids.clone(),
            _ => vec![self.model_id.clone()],
        }
    }

    /// Parsed `targets`, in configured order without duplicates
    pub fn target_kinds(&self) -> Result<Vec<DescriptorKind>, ConfigError> {
        let mut kinds = Vec::new();
        for target in &self.targets {
            let kind: DescriptorKind = target.parse().map_err(ConfigError::InvalidConfig)?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Ok(kinds)
    }

    /// Configured hand-written source roots, primary first
    pub fn hand_written_roots(&self) -> Vec<&str> {
        std::iter::once(self.main_source_directory.as_str())
            .chain(self.main_source_directory2.as_deref())
            .filter(|dir| !dir.is_empty())
            .collect()
    }
}
