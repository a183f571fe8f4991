use crate::analysis::collector::ParseContext;
use crate::analysis::converter_parser::{parse_converter, CONVERTER};
use crate::analysis::function_parser::{parse_functions, FACELET_FUNCTION};
use crate::analysis::generic_tag_parser::{parse_generic_tag, JSP_TAG};
use crate::analysis::source::{Annotated, ClassDecl};
use crate::analysis::template_tag_parser::{parse_template_tags, FACELET_TAG, FACELET_TAGS};
use crate::error::Result;
use crate::models::{Descriptor, DescriptorKind};

impl DescriptorKind {
    /// Run this kind's parsing strategy over one class
    pub fn parse_class(self, cx: &mut ParseContext<'_>, class: &ClassDecl) -> Result<Vec<Descriptor>> {
        match self {
            DescriptorKind::Converter => parse_converter(cx, class),
            DescriptorKind::TemplateTag => parse_template_tags(cx, class),
            DescriptorKind::TemplateFunction => parse_functions(cx, class),
            DescriptorKind::GenericTag => parse_generic_tag(cx, class),
        }
    }

    /// Cheap check whether `class` carries this kind's declaration at all
    pub fn is_declared_on(self, class: &ClassDecl) -> bool {
        match self {
            DescriptorKind::Converter => class.is_declared(CONVERTER),
            DescriptorKind::TemplateTag => {
                class.is_declared(FACELET_TAG) || class.is_declared(FACELET_TAGS)
            }
            DescriptorKind::TemplateFunction => class
                .methods
                .iter()
                .any(|method| method.is_declared(FACELET_FUNCTION)),
            DescriptorKind::GenericTag => class.is_declared(JSP_TAG),
        }
    }
}
