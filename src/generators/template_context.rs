use crate::error::{Error, Result};
use crate::models::{
    package_of, simple_name_of, AttributeRecord, DescriptorKind, DescriptorRef, PropertyRecord,
};
use heck::{ToLowerCamelCase, ToUpperCamelCase};
use serde::Serialize;
use tera::Context;

/// Fixed helper object bound as `utils` in every template
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateUtils {
    pub generator_name: String,
    pub version: String,
    pub target_version: Option<String>,
}

impl TemplateUtils {
    pub fn new(target_version: Option<&str>) -> Self {
        Self {
            generator_name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            target_version: target_version.map(str::to_string),
        }
    }
}

/// Named values handed to a template
#[derive(Debug, Clone)]
pub struct Bindings {
    context: Context,
}

impl Bindings {
    /// Bindings holding only `utils`
    pub fn new(utils: &TemplateUtils) -> Self {
        let mut context = Context::new();
        context.insert("utils", utils);
        Self { context }
    }

    /// `utils` plus the descriptor under its kind binding
    pub fn for_descriptor(utils: &TemplateUtils, descriptor: DescriptorRef<'_>) -> Result<Self> {
        let mut bindings = Self::new(utils);
        bindings.insert(
            descriptor.kind().binding_name(),
            &DescriptorContext::new(descriptor),
        )?;
        Ok(bindings)
    }

    pub fn insert<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) -> Result<()> {
        self.context
            .try_insert(name, value)
            .map_err(|e| Error::Template(format!("Failed to bind '{}': {}", name, e)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.context.contains_key(name)
    }

    pub fn context(&self) -> &Context {
        &self.context
    }
}

/// Template context wrapper for any descriptor with computed naming fields
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptorContext<'a> {
    #[serde(flatten)]
    pub descriptor: DescriptorRef<'a>,
    pub kind: DescriptorKind,
    pub class_name: &'a str,
    pub generated_class: Option<&'a str>,
    pub generated_package: &'a str,
    pub generated_simple_name: &'a str,
    /// Properties or attributes, depending on the kind
    pub members: Vec<MemberContext<'a>>,
}

impl<'a> DescriptorContext<'a> {
    pub fn new(descriptor: DescriptorRef<'a>) -> Self {
        let generated_class = descriptor.generated_class();
        let members = match descriptor {
            DescriptorRef::Converter(d) => d.properties.iter().map(MemberContext::property).collect(),
            DescriptorRef::TemplateTag(d) => {
                d.attributes.iter().map(MemberContext::attribute).collect()
            }
            DescriptorRef::GenericTag(d) => {
                d.attributes.iter().map(MemberContext::attribute).collect()
            }
            DescriptorRef::TemplateFunction(_) => Vec::new(),
        };

        Self {
            descriptor,
            kind: descriptor.kind(),
            class_name: descriptor.class_meta().class_name(),
            generated_class,
            generated_package: generated_class.map(package_of).unwrap_or_default(),
            generated_simple_name: generated_class.map(simple_name_of).unwrap_or_default(),
            members,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum MemberRecord<'a> {
    Property(&'a PropertyRecord),
    Attribute(&'a AttributeRecord),
}

/// A property or attribute with the accessor and field names templates need
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberContext<'a> {
    #[serde(flatten)]
    pub record: MemberRecord<'a>,
    pub type_name: &'a str,
    pub setter_name: String,
    pub field_name: String,
}

impl<'a> MemberContext<'a> {
    pub fn property(record: &'a PropertyRecord) -> Self {
        Self::new(
            MemberRecord::Property(record),
            &record.name,
            record.class_name.as_deref(),
        )
    }

    pub fn attribute(record: &'a AttributeRecord) -> Self {
        Self::new(
            MemberRecord::Attribute(record),
            &record.name,
            record.class_name.as_deref(),
        )
    }

    fn new(record: MemberRecord<'a>, name: &str, class_name: Option<&'a str>) -> Self {
        Self {
            record,
            type_name: class_name.unwrap_or("java.lang.Object"),
            setter_name: format!("set{}", name.to_upper_camel_case()),
            field_name: format!("_{}", name.to_lower_camel_case()),
        }
    }
}
