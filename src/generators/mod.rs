pub mod file_writer;
pub mod generator;
pub mod selector;
pub mod template_context;
pub mod templates;

use crate::error::Result;
use std::path::Path;

pub use file_writer::SourceWriter;
pub use generator::{GenerationOptions, GenerationReport, TagGenerator};
pub use selector::{GenerationSelector, Selection, SelectionFilter, SkipReason};
pub use template_context::{Bindings, TemplateUtils};
pub use templates::{TemplateRenderer, TeraRenderer};

/// Factory for the renderer: built-in templates, optionally overridden from a directory
pub fn create_renderer(template_dir: Option<&Path>) -> Result<Box<dyn TemplateRenderer>> {
    match template_dir {
        Some(dir) => Ok(Box::new(TeraRenderer::with_template_dir(dir)?)),
        None => Ok(Box::new(TeraRenderer::new()?)),
    }
}
