use crate::error::{Error, Result};
use crate::generators::template_context::Bindings;
use crate::models::{package_of, simple_name_of, DescriptorKind};
use heck::{ToLowerCamelCase, ToUpperCamelCase};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tera::{Tera, Value};
use walkdir::WalkDir;

/// Extension of template files picked up from an override directory
pub const TEMPLATE_EXTENSION: &str = "tera";

/// Turns a template name plus bindings into source text
pub trait TemplateRenderer {
    fn render(&self, template_name: &str, bindings: &Bindings) -> Result<String>;

    fn has_template(&self, template_name: &str) -> bool;
}

/// Template used for `kind` when no name is configured.
///
/// Version `1.2` (or `12`) selects the current tag format, anything else the
/// legacy one. Functions are never rendered and have no default.
pub fn default_template_name(kind: DescriptorKind, target_version: Option<&str>) -> Option<String> {
    let prefix = match kind {
        DescriptorKind::Converter => "converter",
        DescriptorKind::TemplateTag => "template",
        DescriptorKind::GenericTag => "generic",
        DescriptorKind::TemplateFunction => return None,
    };
    let suffix = match target_version.map(str::trim) {
        Some("1.2") | Some("12") => "12",
        _ => "11",
    };
    Some(format!("{}_tag_{}.{}", prefix, suffix, TEMPLATE_EXTENSION))
}

/// Tera-backed renderer with the built-in tag templates
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    /// Renderer with only the built-in templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        register_common_templates(&mut tera).map_err(Error::Template)?;
        register_templates(&mut tera).map_err(Error::Template)?;
        register_common_filters(&mut tera);
        Ok(Self { tera })
    }

    /// Built-in templates, with any `*.tera` file below `dir` replacing the
    /// built-in template of the same relative name
    pub fn with_template_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let mut renderer = Self::new()?;
        renderer.load_overrides(dir.as_ref())?;
        Ok(renderer)
    }

    fn load_overrides(&mut self, dir: &Path) -> Result<()> {
        if !dir.is_dir() {
            return Err(Error::Template(format!(
                "Template directory does not exist: {}",
                dir.display()
            )));
        }

        let mut overrides = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::Template(e.to_string()))?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION)
            {
                continue;
            }
            let Ok(relative) = path.strip_prefix(dir) else {
                continue;
            };
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            overrides.push((name, fs::read_to_string(path)?));
        }

        // Registered as one batch so overrides may include each other
        self.tera
            .add_raw_templates(overrides)
            .map_err(|e| Error::Template(describe_error(&e)))
    }
}

impl TemplateRenderer for TeraRenderer {
    fn render(&self, template_name: &str, bindings: &Bindings) -> Result<String> {
        self.tera
            .render(template_name, bindings.context())
            .map_err(|e| {
                Error::Template(format!(
                    "Failed to render template '{}': {}",
                    template_name,
                    describe_error(&e)
                ))
            })
    }

    fn has_template(&self, template_name: &str) -> bool {
        self.tera.get_template_names().any(|name| name == template_name)
    }
}

fn describe_error(e: &tera::Error) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        message.push_str(&format!("\nSource: {}", cause));
        source = cause.source();
    }
    message
}

/// Register templates shared by every tag template
pub fn register_common_templates(tera: &mut Tera) -> std::result::Result<(), String> {
    tera.add_raw_template("common/header.tera", include_str!("templates/common/header.tera"))
        .map_err(|e| format!("Failed to register common/header.tera: {}", e))?;
    tera.add_raw_template(
        "common/member_doc.tera",
        include_str!("templates/common/member_doc.tera"),
    )
    .map_err(|e| format!("Failed to register common/member_doc.tera: {}", e))?;
    Ok(())
}

/// Register the built-in tag templates
fn register_templates(tera: &mut Tera) -> std::result::Result<(), String> {
    macro_rules! template {
        ($name:expr) => {
            tera.add_raw_template($name, include_str!(concat!("templates/", $name)))
                .map_err(|e| format!("Failed to register {}: {}", $name, e))?;
        };
    }

    template!("converter_tag_11.tera");
    template!("converter_tag_12.tera");
    template!("template_tag_11.tera");
    template!("template_tag_12.tera");
    template!("generic_tag_11.tera");
    template!("generic_tag_12.tera");

    Ok(())
}

/// Register the filters used by the tag templates
pub fn register_common_filters(tera: &mut Tera) {
    tera.register_filter("java_string", java_string_filter);
    tera.register_filter("boxed", boxed_filter);
    tera.register_filter("simple_name", simple_name_filter);
    tera.register_filter("package", package_filter);
    tera.register_filter("upper_camel", upper_camel_filter);
    tera.register_filter("lower_camel", lower_camel_filter);
}

fn expect_str<'v>(value: &'v Value, filter: &str) -> tera::Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| format!("{} filter expects a string", filter).into())
}

fn java_string_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(escape_for_java(expect_str(value, "java_string")?)))
}

fn boxed_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(boxed_type(expect_str(value, "boxed")?).to_string()))
}

fn simple_name_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(
        simple_name_of(expect_str(value, "simple_name")?).to_string(),
    ))
}

fn package_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(package_of(expect_str(value, "package")?).to_string()))
}

fn upper_camel_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(
        expect_str(value, "upper_camel")?.to_upper_camel_case(),
    ))
}

fn lower_camel_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(
        expect_str(value, "lower_camel")?.to_lower_camel_case(),
    ))
}

/// Escape text for use inside a Java string literal
pub fn escape_for_java(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Wrapper class for a primitive type name; other names are returned unchanged
pub fn boxed_type(type_name: &str) -> &str {
    match type_name {
        "boolean" => "java.lang.Boolean",
        "byte" => "java.lang.Byte",
        "char" => "java.lang.Character",
        "short" => "java.lang.Short",
        "int" => "java.lang.Integer",
        "long" => "java.lang.Long",
        "float" => "java.lang.Float",
        "double" => "java.lang.Double",
        other => other,
    }
}
