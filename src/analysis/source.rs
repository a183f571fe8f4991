//! Declarations handed over by the source-analysis collaborator.
//!
//! Parsing the original source files is not this crate's job. Whatever does it
//! dumps classes, members, comment tags and annotations as JSON, and the
//! analyzer consumes them through the [`SourceIndex`] trait.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Named-parameter map of a comment tag or annotation
pub type ParamMap = BTreeMap<String, ParamValue>;

/// A single named-parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<ParamValue>),
    Nested(Annotation),
}

impl ParamValue {
    /// Scalar value as text, with surrounding quotes removed
    pub fn as_text(&self) -> Option<String> {
        match self {
            ParamValue::Text(text) => Some(clean_literal(text)),
            ParamValue::Flag(flag) => Some(flag.to_string()),
            ParamValue::Number(number) => Some(number.to_string()),
            ParamValue::List(_) | ParamValue::Nested(_) => None,
        }
    }

    /// Nested annotations, whether given as one value or a list
    pub fn as_annotations(&self) -> Vec<&Annotation> {
        match self {
            ParamValue::Nested(annotation) => vec![annotation],
            ParamValue::List(items) => items.iter().flat_map(|v| v.as_annotations()).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Flag(value)
    }
}

impl From<Annotation> for ParamValue {
    fn from(value: Annotation) -> Self {
        ParamValue::Nested(value)
    }
}

impl From<Vec<Annotation>> for ParamValue {
    fn from(value: Vec<Annotation>) -> Self {
        ParamValue::List(value.into_iter().map(ParamValue::Nested).collect())
    }
}

/// Strip one pair of surrounding double quotes and trim whitespace
pub fn clean_literal(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    unquoted.to_string()
}

/// Structured annotation, e.g. `@JSFProperty(required = true)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    #[serde(default)]
    pub params: ParamMap,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: ParamMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Matches both simple and fully qualified annotation names
    pub fn is_named(&self, name: &str) -> bool {
        qualified_name_matches(&self.name, name)
    }
}

/// Free-text comment tag, e.g. `@JSFProperty required="true"` inside a doc comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocTag {
    pub name: String,
    #[serde(default)]
    pub params: ParamMap,
}

impl DocTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: ParamMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

fn qualified_name_matches(actual: &str, wanted: &str) -> bool {
    actual == wanted
        || actual
            .strip_suffix(wanted)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum TypeRefRepr {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        dimensions: usize,
    },
}

/// Type as reported by the source parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TypeRefRepr")]
pub struct TypeRef {
    /// Fully qualified where the parser could resolve it
    pub name: String,
    pub dimensions: usize,
}

impl From<TypeRefRepr> for TypeRef {
    fn from(repr: TypeRefRepr) -> Self {
        match repr {
            TypeRefRepr::Name(name) => TypeRef::new(name),
            TypeRefRepr::Full { name, dimensions } => TypeRef { name, dimensions },
        }
    }
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimensions: 0,
        }
    }

    pub fn array(name: impl Into<String>, dimensions: usize) -> Self {
        Self {
            name: name.into(),
            dimensions,
        }
    }

    pub fn is_array(&self) -> bool {
        self.dimensions > 0
    }

    pub fn is_void(&self) -> bool {
        self.name == "void"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub parameters: Vec<ParamDecl>,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub tags: Vec<DocTag>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: None,
            parameters: Vec::new(),
            is_abstract: false,
            comment: None,
            tags: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn returning(mut self, type_ref: TypeRef) -> Self {
        self.return_type = Some(type_ref);
        self
    }

    pub fn with_param(mut self, name: &str, type_ref: TypeRef) -> Self {
        self.parameters.push(ParamDecl {
            name: name.to_string(),
            type_ref,
        });
        self
    }

    pub fn set_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn with_tag(mut self, tag: DocTag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub initializer: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub tags: Vec<DocTag>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            initializer: None,
            comment: None,
            tags: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn initialized_with(mut self, expression: &str) -> Self {
        self.initializer = Some(expression.to_string());
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn with_tag(mut self, tag: DocTag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDecl {
    /// Fully qualified class name
    pub name: String,
    #[serde(default)]
    pub is_interface: bool,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub tags: Vec<DocTag>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_interface: false,
            superclass: None,
            interfaces: Vec::new(),
            imports: Vec::new(),
            comment: None,
            tags: Vec::new(),
            annotations: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            is_interface: true,
            ..Self::new(name)
        }
    }

    pub fn extending(mut self, superclass: &str) -> Self {
        self.superclass = Some(superclass.to_string());
        self
    }

    pub fn implementing(mut self, interface: &str) -> Self {
        self.interfaces.push(interface.to_string());
        self
    }

    pub fn importing(mut self, import: &str) -> Self {
        self.imports.push(import.to_string());
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn with_tag(mut self, tag: DocTag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn package(&self) -> &str {
        crate::models::package_of(&self.name)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Uniform access to the metadata attached to a class, method or field
pub trait Annotated {
    fn element_name(&self) -> &str;
    fn comment(&self) -> Option<&str>;
    fn doc_tags(&self) -> &[DocTag];
    fn annotations(&self) -> &[Annotation];

    fn doc_tags_named(&self, name: &str) -> Vec<&DocTag> {
        self.doc_tags().iter().filter(|t| t.name == name).collect()
    }

    fn annotation_named(&self, name: &str) -> Option<&Annotation> {
        self.annotations().iter().find(|a| a.is_named(name))
    }

    /// Whether the element carries `name` in either encoding
    fn is_declared(&self, name: &str) -> bool {
        self.annotation_named(name).is_some() || !self.doc_tags_named(name).is_empty()
    }
}

macro_rules! impl_annotated {
    ($ty:ty) => {
        impl Annotated for $ty {
            fn element_name(&self) -> &str {
                &self.name
            }

            fn comment(&self) -> Option<&str> {
                self.comment.as_deref()
            }

            fn doc_tags(&self) -> &[DocTag] {
                &self.tags
            }

            fn annotations(&self) -> &[Annotation] {
                &self.annotations
            }
        }
    };
}

impl_annotated!(ClassDecl);
impl_annotated!(MethodDecl);
impl_annotated!(FieldDecl);

/// Narrow query surface over parsed declarations
pub trait SourceIndex {
    /// All classes in discovery order
    fn classes(&self) -> &[ClassDecl];

    fn class_by_name(&self, name: &str) -> Option<&ClassDecl>;
}

#[derive(Debug, Deserialize)]
struct DeclarationFile {
    classes: Vec<ClassDecl>,
}

/// In-memory [`SourceIndex`] loaded from JSON declaration dumps
#[derive(Debug, Clone, Default)]
pub struct DeclarationSet {
    classes: Vec<ClassDecl>,
    index: HashMap<String, usize>,
}

impl DeclarationSet {
    pub fn new(classes: Vec<ClassDecl>) -> Result<Self> {
        let mut set = Self::default();
        set.extend(classes)?;
        Ok(set)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: DeclarationFile = serde_json::from_str(content)?;
        Self::new(file.classes)
    }

    /// Load a declarations file, or every `*.json` file below a directory
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            return Self::from_json(&fs::read_to_string(path)?);
        }
        if !path.is_dir() {
            return Err(Error::InvalidSource(format!(
                "Declarations path does not exist: {}",
                path.display()
            )));
        }

        let mut set = Self::default();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::InvalidSource(e.to_string()))?;
            let is_json = entry.path().extension().is_some_and(|ext| ext == "json");
            if entry.file_type().is_file() && is_json {
                let content = fs::read_to_string(entry.path())?;
                let file: DeclarationFile = serde_json::from_str(&content)?;
                set.extend(file.classes)?;
            }
        }
        Ok(set)
    }

    fn extend(&mut self, classes: Vec<ClassDecl>) -> Result<()> {
        for class in classes {
            if self.index.contains_key(&class.name) {
                return Err(Error::InvalidSource(format!(
                    "Class declared twice: {}",
                    class.name
                )));
            }
            self.index.insert(class.name.clone(), self.classes.len());
            self.classes.push(class);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl SourceIndex for DeclarationSet {
    fn classes(&self) -> &[ClassDecl] {
        &self.classes
    }

    fn class_by_name(&self, name: &str) -> Option<&ClassDecl> {
        self.index.get(name).map(|&pos| &self.classes[pos])
    }
}
