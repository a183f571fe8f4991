use crate::analysis::collector::ParseContext;
use crate::analysis::declaration::{first_sentence, resolve_one, short_description};
use crate::analysis::source::{Annotated, ClassDecl, MethodDecl};
use crate::error::{Error, Result};
use crate::models::{ClassMeta, Descriptor, DescriptorKind, TemplateFunctionDescriptor};

pub const FACELET_FUNCTION: &str = "JSFFaceletFunction";

/// Every tagged method of `class` becomes a function descriptor
pub fn parse_functions(cx: &mut ParseContext<'_>, class: &ClassDecl) -> Result<Vec<Descriptor>> {
    let mut functions = Vec::new();

    for method in &class.methods {
        let Some(declaration) = resolve_one(method, &class.name, FACELET_FUNCTION, cx.diagnostics)
        else {
            continue;
        };

        let return_type = method.return_type.as_ref().ok_or_else(|| {
            Error::extraction(
                DescriptorKind::TemplateFunction,
                &class.name,
                &method.name,
                "function has no return type",
            )
        })?;
        let return_type = cx.types.resolve(class, return_type);
        let parameter_types = cx.types.parameter_signature(class, method);

        let signature = declaration
            .get_string("signature")
            .unwrap_or_else(|| default_signature(&return_type, method, &parameter_types));
        let declared_signature = declaration
            .get_string("declaredSignature")
            .unwrap_or_else(|| declared_signature(&return_type, method, &parameter_types));

        let long_description = method.comment().map(str::to_string);
        functions.push(Descriptor::TemplateFunction(TemplateFunctionDescriptor {
            class: ClassMeta {
                source_class_name: class.name.clone(),
                class_name_override: declaration
                    .get_string_any(&["class", "clazz"])
                    .filter(|name| !name.is_empty()),
                model_id: cx.model_id.to_string(),
                ..Default::default()
            },
            name: declaration.get_string("name"),
            signature,
            declared_signature,
            description: short_description(
                declaration.get_string("desc"),
                first_sentence(long_description.as_deref()),
            ),
            long_description,
        }));
    }

    Ok(functions)
}

/// `<ret> <name>( <p1>, <p2>)`, the form expected in tag library descriptors
fn default_signature(return_type: &str, method: &MethodDecl, parameter_types: &[String]) -> String {
    format!(
        "{} {}( {})",
        return_type,
        method.name,
        parameter_types.join(", ")
    )
}

/// `<ret> <name>(<type> <param>, ...)`
fn declared_signature(return_type: &str, method: &MethodDecl, parameter_types: &[String]) -> String {
    let params: Vec<String> = method
        .parameters
        .iter()
        .zip(parameter_types)
        .map(|(param, ty)| format!("{} {}", ty, param.name))
        .collect();
    format!("{} {}({})", return_type, method.name, params.join(", "))
}
