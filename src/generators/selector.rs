//! Decides which descriptors reach the renderer.
//!
//! A descriptor is eligible when its model id is allowed, the package of its
//! generated class starts with the configured package prefix (if any) and its
//! id starts with the configured id prefix (if any). Eligible descriptors are
//! still skipped when a hand-written source file already exists for the
//! generated class. Skips carry a reason and are never errors.

use crate::model::Model;
use crate::models::{package_of, DescriptorKind, DescriptorRef};
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a descriptor was not generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoGeneratedClass,
    ModelNotSelected { model_id: String },
    PackageMismatch { package: String, prefix: String },
    IdMismatch { id: Option<String>, prefix: String },
    AlreadyExists { path: PathBuf },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoGeneratedClass => write!(f, "no generated class name"),
            SkipReason::ModelNotSelected { model_id } => {
                write!(f, "model '{}' is not selected", model_id)
            }
            SkipReason::PackageMismatch { package, prefix } => {
                write!(f, "package '{}' does not start with '{}'", package, prefix)
            }
            SkipReason::IdMismatch { id: Some(id), prefix } => {
                write!(f, "id '{}' does not start with '{}'", id, prefix)
            }
            SkipReason::IdMismatch { id: None, prefix } => {
                write!(f, "no id to match against '{}'", prefix)
            }
            SkipReason::AlreadyExists { path } => {
                write!(f, "hand-written source exists at {}", path.display())
            }
        }
    }
}

/// Model, package and id filters
#[derive(Debug, Clone, Default)]
pub struct SelectionFilter {
    pub model_ids: Vec<String>,
    pub package_prefix: Option<String>,
    pub id_prefix: Option<String>,
}

impl SelectionFilter {
    pub fn new(model_ids: Vec<String>) -> Self {
        Self {
            model_ids,
            package_prefix: None,
            id_prefix: None,
        }
    }

    pub fn with_package_prefix(mut self, prefix: Option<String>) -> Self {
        self.package_prefix = prefix.filter(|p| !p.is_empty());
        self
    }

    pub fn with_id_prefix(mut self, prefix: Option<String>) -> Self {
        self.id_prefix = prefix.filter(|p| !p.is_empty());
        self
    }

    /// The generated class name when `descriptor` passes every filter
    pub fn check<'a>(&self, descriptor: &DescriptorRef<'a>) -> Result<&'a str, SkipReason> {
        let class_name = descriptor
            .generated_class()
            .ok_or(SkipReason::NoGeneratedClass)?;

        let model_id = descriptor.model_id();
        if !self.model_ids.iter().any(|id| id == model_id) {
            return Err(SkipReason::ModelNotSelected {
                model_id: model_id.to_string(),
            });
        }

        if let Some(prefix) = &self.package_prefix {
            let package = package_of(class_name);
            if !package.starts_with(prefix.as_str()) {
                return Err(SkipReason::PackageMismatch {
                    package: package.to_string(),
                    prefix: prefix.clone(),
                });
            }
        }

        if let Some(prefix) = &self.id_prefix {
            let id = descriptor.generated_id();
            if !id.is_some_and(|id| id.starts_with(prefix.as_str())) {
                return Err(SkipReason::IdMismatch {
                    id: id.map(str::to_string),
                    prefix: prefix.clone(),
                });
            }
        }

        Ok(class_name)
    }
}

/// `org.example.DateTag` becomes `org/example/DateTag.<extension>`
pub fn class_to_relative_path(class_name: &str, extension: &str) -> PathBuf {
    let mut path: PathBuf = class_name.split('.').collect();
    path.set_extension(extension);
    path
}

/// Outcome of selecting one descriptor
#[derive(Debug, Clone)]
pub enum Selection<'a> {
    Generate {
        descriptor: DescriptorRef<'a>,
        class_name: &'a str,
        relative_path: PathBuf,
    },
    Skip {
        descriptor: DescriptorRef<'a>,
        reason: SkipReason,
    },
}

impl<'a> Selection<'a> {
    pub fn descriptor(&self) -> &DescriptorRef<'a> {
        match self {
            Selection::Generate { descriptor, .. } | Selection::Skip { descriptor, .. } => {
                descriptor
            }
        }
    }

    pub fn is_generate(&self) -> bool {
        matches!(self, Selection::Generate { .. })
    }
}

/// Filters plus the existence check against hand-written source roots
#[derive(Debug, Clone)]
pub struct GenerationSelector {
    filter: SelectionFilter,
    hand_written_roots: Vec<PathBuf>,
    extension: String,
}

impl GenerationSelector {
    pub fn new(filter: SelectionFilter, extension: &str) -> Self {
        Self {
            filter,
            hand_written_roots: Vec::new(),
            extension: extension.to_string(),
        }
    }

    /// Add a root that holds hand-written sources; missing roots are allowed
    pub fn with_hand_written_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.hand_written_roots.push(root.as_ref().to_path_buf());
        self
    }

    pub fn filter(&self) -> &SelectionFilter {
        &self.filter
    }

    pub fn select<'a>(&self, descriptor: DescriptorRef<'a>) -> Selection<'a> {
        let class_name = match self.filter.check(&descriptor) {
            Ok(class_name) => class_name,
            Err(reason) => return Selection::Skip { descriptor, reason },
        };

        let relative_path = class_to_relative_path(class_name, &self.extension);
        if let Some(existing) = self
            .hand_written_roots
            .iter()
            .map(|root| root.join(&relative_path))
            .find(|candidate| candidate.exists())
        {
            return Selection::Skip {
                descriptor,
                reason: SkipReason::AlreadyExists { path: existing },
            };
        }

        Selection::Generate {
            descriptor,
            class_name,
            relative_path,
        }
    }

    /// Select every descriptor of `kinds`, in kind order then insertion order
    pub fn select_all<'a>(&self, model: &'a Model, kinds: &[DescriptorKind]) -> Vec<Selection<'a>> {
        kinds
            .iter()
            .flat_map(|kind| model.descriptors_of(*kind))
            .map(|descriptor| self.select(descriptor))
            .collect()
    }
}
