use crate::analysis::source::{ClassDecl, MethodDecl, TypeRef};
use std::collections::HashSet;

/// Resolves declared type names against a class's import context
#[derive(Debug)]
pub struct TypeResolver {
    primitives: HashSet<&'static str>,
    java_lang: HashSet<&'static str>,
}

impl TypeResolver {
    pub fn new() -> Self {
        let primitives = [
            "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
        ]
        .into_iter()
        .collect();

        let java_lang = [
            "Object",
            "String",
            "Boolean",
            "Byte",
            "Character",
            "Short",
            "Integer",
            "Long",
            "Float",
            "Double",
            "Number",
            "Class",
            "Void",
            "Enum",
            "Iterable",
            "CharSequence",
            "Runnable",
            "Throwable",
            "Exception",
            "RuntimeException",
        ]
        .into_iter()
        .collect();

        Self {
            primitives,
            java_lang,
        }
    }

    /// Fully qualify `name` as seen from inside `class`
    pub fn qualify(&self, class: &ClassDecl, name: &str) -> String {
        let name = name.trim();
        if name.contains('.') || self.primitives.contains(name) {
            return name.to_string();
        }

        let base = name.split('[').next().unwrap_or(name);
        let suffix = &name[base.len()..];

        if let Some(import) = class
            .imports
            .iter()
            .find(|import| import.rsplit('.').next() == Some(base))
        {
            return format!("{}{}", import, suffix);
        }

        if self.java_lang.contains(base) {
            return format!("java.lang.{}", name);
        }

        match class.package() {
            "" => name.to_string(),
            package => format!("{}.{}", package, name),
        }
    }

    /// Qualified type name with one `[]` per array dimension, never doubled
    pub fn resolve(&self, class: &ClassDecl, type_ref: &TypeRef) -> String {
        let mut qualified = self.qualify(class, &type_ref.name);
        if type_ref.is_array() && !qualified.contains('[') {
            for _ in 0..type_ref.dimensions {
                qualified.push_str("[]");
            }
        }
        qualified
    }

    /// Qualified parameter types of `method` as declared in `class`
    pub fn parameter_signature(&self, class: &ClassDecl, method: &MethodDecl) -> Vec<String> {
        method
            .parameters
            .iter()
            .map(|param| self.resolve(class, &param.type_ref))
            .collect()
    }

    /// Method of `class` with the name and qualified parameter types of
    /// `method`, which is declared in `declaring`
    pub fn find_implementation<'c>(
        &self,
        class: &'c ClassDecl,
        declaring: &ClassDecl,
        method: &MethodDecl,
    ) -> Option<&'c MethodDecl> {
        let wanted = self.parameter_signature(declaring, method);
        class.methods.iter().find(|candidate| {
            candidate.name == method.name && self.parameter_signature(class, candidate) == wanted
        })
    }
}

impl Default for TypeResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// `getFoo`/`setFoo`/`isFoo` become `foo`; other names are returned unchanged
pub fn method_to_prop_name(method_name: &str) -> String {
    let stripped = ["get", "set", "is"]
        .iter()
        .find_map(|prefix| method_name.strip_prefix(prefix))
        .filter(|rest| !rest.is_empty());

    match stripped {
        Some(rest) => {
            let mut chars = rest.chars();
            match chars.next() {
                Some(first) => first.to_lowercase().chain(chars).collect(),
                None => String::new(),
            }
        }
        None => method_name.to_string(),
    }
}

/// Whether the accessor takes the property type from its parameter
pub fn is_setter(method_name: &str) -> bool {
    method_name.starts_with("set")
}
