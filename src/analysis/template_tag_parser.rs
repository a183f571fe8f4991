use crate::analysis::collector::{collect_attributes, AttributeTags, ParseContext};
use crate::analysis::declaration::{first_sentence, resolve_grouped, short_description};
use crate::analysis::source::{Annotated, ClassDecl};
use crate::error::Result;
use crate::models::{Descriptor, DescriptorKind, TemplateTagDescriptor};

pub const FACELET_TAG: &str = "JSFFaceletTag";
pub const FACELET_TAGS: &str = "JSFFaceletTags";

pub const FACELET_ATTRIBUTES: AttributeTags = AttributeTags {
    single: "JSFFaceletAttribute",
    group: Some(("JSFFaceletAttributes", "attributes")),
    include_fields: true,
};

const DEFAULT_BODY_CONTENT: &str = "JSP";

/// One descriptor per declared tag; a class may declare several through the group form
pub fn parse_template_tags(
    cx: &mut ParseContext<'_>,
    class: &ClassDecl,
) -> Result<Vec<Descriptor>> {
    let declarations = resolve_grouped(
        class,
        &class.name,
        FACELET_TAG,
        Some((FACELET_TAGS, "tags")),
        cx.diagnostics,
    );
    if declarations.is_empty() {
        return Ok(Vec::new());
    }

    let attributes = collect_attributes(cx, DescriptorKind::TemplateTag, class, FACELET_ATTRIBUTES)?;
    let comment = class.comment().map(str::to_string);

    let tags = declarations
        .iter()
        .map(|declaration| {
            let long_description = declaration
                .get_string("longDescription")
                .or_else(|| comment.clone());
            let tag = TemplateTagDescriptor {
                class: cx.class_meta(class, declaration.get_string_any(&["class", "clazz"])),
                name: declaration.get_string("name"),
                body_content: Some(
                    declaration
                        .get_string("bodyContent")
                        .unwrap_or_else(|| DEFAULT_BODY_CONTENT.to_string()),
                ),
                component_class: declaration.get_string("componentClass"),
                tag_class: declaration.get_string("tagClass"),
                converter_class: declaration.get_string("converterClass"),
                validator_class: declaration.get_string("validatorClass"),
                behavior_class: declaration.get_string("behaviorClass"),
                description: short_description(
                    declaration.get_string("desc"),
                    first_sentence(comment.as_deref()),
                ),
                long_description,
                attributes: attributes.clone(),
            };
            Descriptor::TemplateTag(tag)
        })
        .collect();

    Ok(tags)
}
