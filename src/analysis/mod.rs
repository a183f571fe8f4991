pub mod collector;
pub mod converter_parser;
pub mod declaration;
pub mod function_parser;
pub mod generic_tag_parser;
pub mod property_parser;
pub mod source;
pub mod strategy;
pub mod template_tag_parser;
pub mod type_resolver;

use crate::error::Result;
use crate::model::Model;
use crate::models::DescriptorKind;

use collector::ParseContext;
use declaration::{Ambiguity, Diagnostics};
use source::SourceIndex;
use type_resolver::TypeResolver;

/// Runs every descriptor strategy over a source index and builds the model
pub struct MetadataAnalyzer {
    /// Stamped on every descriptor produced by this analyzer
    model_id: String,
    /// Qualifies member types against each class's imports
    type_resolver: TypeResolver,
    /// Encoding conflicts found by the last analysis
    ambiguities: Vec<Ambiguity>,
}

impl MetadataAnalyzer {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            type_resolver: TypeResolver::new(),
            ambiguities: Vec::new(),
        }
    }

    /// Build an unflattened model from every class in `index`.
    ///
    /// Classes are visited in index order and each kind's strategy runs in
    /// [`DescriptorKind::ALL`] order, so the resulting collections are stable.
    pub fn analyze(&mut self, index: &dyn SourceIndex) -> Result<Model> {
        let mut model = Model::new(self.model_id.clone());
        let mut diagnostics = Diagnostics::new();
        let mut cx = ParseContext {
            index,
            types: &self.type_resolver,
            diagnostics: &mut diagnostics,
            model_id: &self.model_id,
        };

        for class in index.classes() {
            for kind in DescriptorKind::ALL {
                if !kind.is_declared_on(class) {
                    continue;
                }
                for descriptor in kind.parse_class(&mut cx, class)? {
                    model.add_descriptor(descriptor);
                }
            }
        }

        self.ambiguities = diagnostics.into_ambiguities();
        Ok(model)
    }

    /// Elements that declared a tag in both encodings during the last analysis
    pub fn ambiguities(&self) -> &[Ambiguity] {
        &self.ambiguities
    }
}
