use crate::analysis::declaration::{resolve_grouped, resolve_one, Diagnostics};
use crate::analysis::property_parser::{
    attribute_from_bridge, attribute_from_field, attribute_from_method, property_from_bridge,
    property_from_method, MemberContext,
};
use crate::analysis::source::{Annotated, ClassDecl, SourceIndex};
use crate::analysis::type_resolver::TypeResolver;
use crate::error::Result;
use crate::models::{AttributeSet, ClassMeta, DescriptorKind, PropertySet, TriState};

pub const PROPERTY: &str = "JSFProperty";
pub const JSP_PROPERTY: &str = "JSFJspProperty";
pub const JSP_PROPERTIES: &str = "JSFJspProperties";
pub const COMPONENT: &str = "JSFComponent";

/// Shared state threaded through every parsing strategy
pub struct ParseContext<'a> {
    pub index: &'a dyn SourceIndex,
    pub types: &'a TypeResolver,
    pub diagnostics: &'a mut Diagnostics,
    pub model_id: &'a str,
}

impl<'a> ParseContext<'a> {
    /// Identity block for a descriptor declared by `class`
    pub fn class_meta(&self, class: &ClassDecl, class_name_override: Option<String>) -> ClassMeta {
        ClassMeta {
            source_class_name: class.name.clone(),
            class_name_override: class_name_override.filter(|name| !name.is_empty()),
            parent_class_name: class.superclass.clone(),
            interfaces: class.interfaces.clone(),
            model_id: self.model_id.to_string(),
        }
    }
}

/// Where a tag kind declares its attributes
#[derive(Debug, Clone, Copy)]
pub struct AttributeTags {
    pub single: &'static str,
    /// Group annotation name and the parameter holding its members
    pub group: Option<(&'static str, &'static str)>,
    pub include_fields: bool,
}

/// Properties of a converter: own methods, then interface methods, then bridge declarations
pub fn collect_properties(
    cx: &mut ParseContext<'_>,
    kind: DescriptorKind,
    class: &ClassDecl,
) -> Result<PropertySet> {
    let member = MemberContext::new(kind, class, cx.types);
    let mut properties = PropertySet::new();

    for method in &class.methods {
        if let Some(declaration) = resolve_one(method, &class.name, PROPERTY, cx.diagnostics) {
            properties.insert(property_from_method(&member, method, &declaration)?);
        }
    }

    for interface_name in &class.interfaces {
        // Interfaces outside the index carry no metadata we could read
        let Some(interface) = cx.index.class_by_name(interface_name) else {
            continue;
        };
        if interface.is_declared(COMPONENT) {
            continue;
        }

        let in_interface = MemberContext::new(kind, interface, cx.types);
        for method in &interface.methods {
            let Some(declaration) =
                resolve_one(method, &interface.name, PROPERTY, cx.diagnostics)
            else {
                continue;
            };
            let mut record = property_from_method(&in_interface, method, &declaration)?;
            let implemented = cx
                .types
                .find_implementation(class, interface, method)
                .is_some();
            record.generated = TriState::from(!implemented);
            properties.insert(record);
        }
    }

    let bridges = resolve_grouped(
        class,
        &class.name,
        JSP_PROPERTY,
        Some((JSP_PROPERTIES, "properties")),
        cx.diagnostics,
    );
    for declaration in bridges {
        properties.insert(property_from_bridge(&member, &declaration)?);
    }

    Ok(properties)
}

/// Attributes of a tag: own methods, then fields, then class-level declarations
pub fn collect_attributes(
    cx: &mut ParseContext<'_>,
    kind: DescriptorKind,
    class: &ClassDecl,
    tags: AttributeTags,
) -> Result<AttributeSet> {
    let member = MemberContext::new(kind, class, cx.types);
    let mut attributes = AttributeSet::new();

    for method in &class.methods {
        if let Some(declaration) = resolve_one(method, &class.name, tags.single, cx.diagnostics) {
            attributes.insert(attribute_from_method(&member, method, &declaration)?);
        }
    }

    if tags.include_fields {
        for field in &class.fields {
            if let Some(declaration) = resolve_one(field, &class.name, tags.single, cx.diagnostics)
            {
                attributes.insert(attribute_from_field(&member, field, &declaration));
            }
        }
    }

    for declaration in resolve_grouped(class, &class.name, tags.single, tags.group, cx.diagnostics)
    {
        attributes.insert(attribute_from_bridge(&member, &declaration)?);
    }

    Ok(attributes)
}
