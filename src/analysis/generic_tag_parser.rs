use crate::analysis::collector::{collect_attributes, AttributeTags, ParseContext};
use crate::analysis::declaration::{first_sentence, resolve_one, short_description};
use crate::analysis::source::{Annotated, ClassDecl};
use crate::error::Result;
use crate::models::{Descriptor, DescriptorKind, GenericTagDescriptor};

pub const JSP_TAG: &str = "JSFJspTag";

pub const JSP_ATTRIBUTES: AttributeTags = AttributeTags {
    single: "JSFJspAttribute",
    group: None,
    include_fields: false,
};

pub fn parse_generic_tag(cx: &mut ParseContext<'_>, class: &ClassDecl) -> Result<Vec<Descriptor>> {
    let Some(declaration) = resolve_one(class, &class.name, JSP_TAG, cx.diagnostics) else {
        return Ok(Vec::new());
    };

    let long_description = class.comment().map(str::to_string);
    let tag = GenericTagDescriptor {
        class: cx.class_meta(class, declaration.get_string_any(&["class", "clazz"])),
        name: declaration.get_string("name"),
        body_content: Some(
            declaration
                .get_string("bodyContent")
                .unwrap_or_else(|| "JSP".to_string()),
        ),
        tag_handler: declaration.get_string("tagHandler"),
        description: short_description(
            declaration.get_string("desc"),
            first_sentence(long_description.as_deref()),
        ),
        long_description,
        attributes: collect_attributes(cx, DescriptorKind::GenericTag, class, JSP_ATTRIBUTES)?,
    };

    Ok(vec![Descriptor::GenericTag(tag)])
}
