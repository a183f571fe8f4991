use crate::analysis::collector::{collect_properties, ParseContext};
use crate::analysis::declaration::{first_sentence, resolve_one, short_description, string_literal_of};
use crate::analysis::source::{Annotated, ClassDecl};
use crate::error::Result;
use crate::models::{ConverterDescriptor, Descriptor, DescriptorKind};

pub const CONVERTER: &str = "JSFConverter";

/// Field whose string initializer supplies the default converter id
const CONVERTER_ID_FIELD: &str = "CONVERTER_ID";

pub fn parse_converter(cx: &mut ParseContext<'_>, class: &ClassDecl) -> Result<Vec<Descriptor>> {
    let Some(declaration) = resolve_one(class, &class.name, CONVERTER, cx.diagnostics) else {
        return Ok(Vec::new());
    };

    let long_description = class.comment().map(str::to_string);
    let converter_id = declaration.get_string("id").or_else(|| {
        class
            .field_by_name(CONVERTER_ID_FIELD)
            .and_then(|field| field.initializer.as_deref())
            .and_then(string_literal_of)
    });

    let converter = ConverterDescriptor {
        class: cx.class_meta(class, declaration.get_string_any(&["class", "clazz"])),
        name: declaration.get_string("name"),
        converter_id,
        body_content: declaration.get_string("bodyContent"),
        tag_class: declaration.get_string("tagClass"),
        tag_superclass: declaration.get_string("tagSuperclass"),
        tag_handler: declaration.get_string("tagHandler"),
        serial_uid_tag: declaration.get_string("serialuidtag"),
        config_excluded: declaration.get_bool("configExcluded"),
        evaluate_el_on_execution: declaration.get_bool("evaluateELOnExecution"),
        description: short_description(
            declaration.get_string("desc"),
            first_sentence(long_description.as_deref()),
        ),
        long_description,
        properties: collect_properties(cx, DescriptorKind::Converter, class)?,
    };

    Ok(vec![Descriptor::Converter(converter)])
}
