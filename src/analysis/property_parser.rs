use crate::analysis::declaration::{first_sentence, short_description, Declaration};
use crate::analysis::source::{Annotated, ClassDecl, FieldDecl, MethodDecl, TypeRef};
use crate::analysis::type_resolver::{is_setter, method_to_prop_name, TypeResolver};
use crate::error::{Error, Result};
use crate::models::{AttributeRecord, DescriptorKind, MethodSignature, PropertyRecord, TriState};

/// The class whose member is being extracted, for type resolution and errors
#[derive(Clone, Copy)]
pub struct MemberContext<'a> {
    pub kind: DescriptorKind,
    pub class: &'a ClassDecl,
    pub types: &'a TypeResolver,
}

impl<'a> MemberContext<'a> {
    pub fn new(kind: DescriptorKind, class: &'a ClassDecl, types: &'a TypeResolver) -> Self {
        Self { kind, class, types }
    }

    fn error(&self, member: &str, reason: &str) -> Error {
        Error::extraction(self.kind, &self.class.name, member, reason)
    }

    /// Setters take their parameter's type, everything else its return type
    fn accessor_type<'m>(&self, method: &'m MethodDecl) -> Result<&'m TypeRef> {
        if is_setter(&method.name) {
            method
                .parameters
                .first()
                .map(|param| &param.type_ref)
                .ok_or_else(|| self.error(&method.name, "setter has no parameter"))
        } else {
            method
                .return_type
                .as_ref()
                .filter(|ty| !ty.is_void())
                .ok_or_else(|| self.error(&method.name, "getter has no return type"))
        }
    }

    fn accessor_class_name(&self, method: &MethodDecl) -> Result<String> {
        let type_ref = self.accessor_type(method)?;
        Ok(self.types.resolve(self.class, type_ref))
    }
}

/// Build a property record from a tagged accessor
pub fn property_from_method(
    ctx: &MemberContext<'_>,
    method: &MethodDecl,
    declaration: &Declaration<'_>,
) -> Result<PropertyRecord> {
    let class_name = ctx.accessor_class_name(method)?;
    let long_description = method.comment().map(str::to_string);

    let method_binding_signature =
        declaration
            .get_string("returnSignature")
            .map(|return_type| MethodSignature {
                return_type,
                parameter_types: declaration
                    .get_string("methodSignature")
                    .map(|signature| {
                        signature
                            .split(',')
                            .map(|part| part.trim().to_string())
                            .filter(|part| !part.is_empty())
                            .collect()
                    })
                    .unwrap_or_default(),
            });

    let generated = if method.is_abstract {
        TriState::True
    } else {
        TriState::Unset
    };

    Ok(PropertyRecord {
        name: method_to_prop_name(&method.name),
        class_name: Some(class_name),
        required: declaration.get_bool("required"),
        transient: declaration
            .get_bool("istransient")
            .or(declaration.get_bool("transient")),
        state_holder: declaration.get_bool("stateHolder"),
        partial_state_holder: declaration.get_bool("partialStateHolder"),
        literal_only: declaration.get_bool("literalOnly"),
        tag_excluded: declaration.get_bool("tagExcluded"),
        inherited_tag: declaration.get_bool("inheritedTag"),
        facelets_only: declaration.get_bool("faceletsOnly"),
        rtexprvalue: declaration.get_bool("rtexprvalue"),
        local_method: declaration.get_bool("localMethod"),
        local_method_scope: declaration.get_string("localMethodScope"),
        set_method: declaration.get_bool("setMethod"),
        set_method_scope: declaration.get_string("setMethodScope"),
        description: short_description(
            declaration.get_string("desc"),
            first_sentence(long_description.as_deref()),
        ),
        long_description,
        default_value: declaration.get_string("defaultValue"),
        jsp_name: declaration.get_string("jspName"),
        client_event: declaration.get_string("clientEvent"),
        deferred_value_type: declaration.get_string("deferredValueType"),
        method_binding_signature,
        generated,
        inherited: false,
    })
}

/// Build a property record from a class-level `JSFJspProperty` bridge declaration
pub fn property_from_bridge(
    ctx: &MemberContext<'_>,
    declaration: &Declaration<'_>,
) -> Result<PropertyRecord> {
    let name = declaration
        .get_string("name")
        .ok_or_else(|| ctx.error("JSFJspProperty", "bridge property has no name"))?;
    let long_description = declaration.get_string("longDesc");

    Ok(PropertyRecord {
        name,
        class_name: declaration.get_string("returnType"),
        required: declaration.get_bool("required"),
        transient: declaration.get_bool("transient"),
        state_holder: declaration.get_bool("stateHolder"),
        literal_only: declaration.get_bool("literalOnly"),
        tag_excluded: declaration.get_bool("tagExcluded"),
        inherited_tag: declaration.get_bool("inheritedTag"),
        description: short_description(declaration.get_string("desc"), long_description.clone()),
        long_description,
        generated: TriState::False,
        ..Default::default()
    })
}

fn attribute_flags(
    declaration: &Declaration<'_>,
    name: String,
    class_name: Option<String>,
) -> AttributeRecord {
    AttributeRecord {
        name,
        class_name,
        required: declaration.get_bool("required"),
        rtexprvalue: declaration.get_bool("rtexprvalue"),
        exclude: declaration.get_bool("exclude"),
        facelets_only: declaration.get_bool("faceletsOnly"),
        deferred_value_type: declaration.get_string("deferredValueType"),
        deferred_method_signature: declaration.get_string("deferredMethodSignature"),
        ..Default::default()
    }
}

/// Build an attribute record from a tagged accessor
pub fn attribute_from_method(
    ctx: &MemberContext<'_>,
    method: &MethodDecl,
    declaration: &Declaration<'_>,
) -> Result<AttributeRecord> {
    let class_name = match declaration.get_string("className") {
        Some(explicit) => explicit,
        None => ctx.accessor_class_name(method)?,
    };
    let long_description = method.comment().map(str::to_string);

    let mut attribute = attribute_flags(
        declaration,
        method_to_prop_name(&method.name),
        Some(class_name),
    );
    attribute.description = short_description(
        declaration.get_string("desc"),
        first_sentence(long_description.as_deref()),
    );
    attribute.long_description = long_description;
    Ok(attribute)
}

/// Build an attribute record from a tagged field
pub fn attribute_from_field(
    ctx: &MemberContext<'_>,
    field: &FieldDecl,
    declaration: &Declaration<'_>,
) -> AttributeRecord {
    let name = declaration
        .get_string("name")
        .unwrap_or_else(|| field.name.clone());
    let class_name = declaration
        .get_string("className")
        .unwrap_or_else(|| ctx.types.resolve(ctx.class, &field.type_ref));
    let long_description = field.comment().map(str::to_string);

    let mut attribute = attribute_flags(declaration, name, Some(class_name));
    attribute.description = short_description(
        declaration.get_string("desc"),
        first_sentence(long_description.as_deref()),
    );
    attribute.long_description = long_description;
    attribute
}

/// Build an attribute record from a class-level bridge declaration
pub fn attribute_from_bridge(
    ctx: &MemberContext<'_>,
    declaration: &Declaration<'_>,
) -> Result<AttributeRecord> {
    let name = declaration
        .get_string("name")
        .ok_or_else(|| ctx.error(&ctx.class.name, "bridge attribute has no name"))?;
    let long_description = declaration.get_string("longDescription");

    let mut attribute = attribute_flags(declaration, name, declaration.get_string("className"));
    attribute.description =
        short_description(declaration.get_string("desc"), long_description.clone());
    attribute.long_description = long_description;
    Ok(attribute)
}
