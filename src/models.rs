use serde::de::Deserializer;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A metadata flag that may be left undeclared.
///
/// `Unset` means "use whatever default the consumer applies", so it must survive
/// extraction, flattening and rendering. It serializes as `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TriState {
    True,
    False,
    #[default]
    Unset,
}

impl TriState {
    pub fn is_set(self) -> bool {
        self != TriState::Unset
    }

    pub fn as_option(self) -> Option<bool> {
        match self {
            TriState::True => Some(true),
            TriState::False => Some(false),
            TriState::Unset => None,
        }
    }

    /// Resolve to a concrete value, falling back to `default` when unset
    pub fn unwrap_or(self, default: bool) -> bool {
        self.as_option().unwrap_or(default)
    }

    /// Keep `self` when set, otherwise take `other`
    pub fn or(self, other: TriState) -> TriState {
        if self.is_set() {
            self
        } else {
            other
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value {
            TriState::True
        } else {
            TriState::False
        }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        value.map(TriState::from).unwrap_or_default()
    }
}

impl Serialize for TriState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TriState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(TriState::from)
    }
}

/// Anything stored in a [`KeyedList`]
pub trait Keyed {
    fn key(&self) -> String;
}

/// Insertion-ordered collection with O(1) lookup by key.
///
/// Inserting an existing key replaces the stored item in place, so the first
/// insertion position is kept.
#[derive(Debug, Clone)]
pub struct KeyedList<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Keyed> KeyedList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert or replace; returns the replaced item
    pub fn insert(&mut self, item: T) -> Option<T> {
        let key = item.key();
        match self.index.get(&key) {
            Some(&pos) => Some(std::mem::replace(&mut self.items[pos], item)),
            None => {
                self.index.insert(key, self.items.len());
                self.items.push(item);
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&pos| &self.items[pos])
    }

    /// Mutable access; callers must not change the item's key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        match self.index.get(key) {
            Some(&pos) => self.items.get_mut(pos),
            None => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.items.iter().map(Keyed::key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Keyed> Default for KeyedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for KeyedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Keyed> FromIterator<T> for KeyedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = KeyedList::new();
        for item in iter {
            list.insert(item);
        }
        list
    }
}

impl<'a, T> IntoIterator for &'a KeyedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for KeyedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl<'de, T: Keyed + Deserialize<'de>> Deserialize<'de> for KeyedList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(|items| items.into_iter().collect())
    }
}

/// Return type and ordered parameter types of a bound method
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSignature {
    pub return_type: String,
    pub parameter_types: Vec<String>,
}

/// A component property declared on a converter (or pulled in from an interface)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyRecord {
    pub name: String,
    pub class_name: Option<String>,
    pub required: TriState,
    pub transient: TriState,
    pub state_holder: TriState,
    pub partial_state_holder: TriState,
    pub literal_only: TriState,
    pub tag_excluded: TriState,
    pub inherited_tag: TriState,
    pub facelets_only: TriState,
    pub rtexprvalue: TriState,
    pub local_method: TriState,
    pub local_method_scope: Option<String>,
    pub set_method: TriState,
    pub set_method_scope: Option<String>,
    pub description: String,
    pub long_description: Option<String>,
    pub default_value: Option<String>,
    pub jsp_name: Option<String>,
    pub client_event: Option<String>,
    pub deferred_value_type: Option<String>,
    pub method_binding_signature: Option<MethodSignature>,
    /// The accessor has to be synthesized
    pub generated: TriState,
    /// Copied down from an ancestor descriptor
    pub inherited: bool,
}

impl Keyed for PropertyRecord {
    fn key(&self) -> String {
        self.name.clone()
    }
}

/// A tag attribute declared on a template tag or generic tag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeRecord {
    pub name: String,
    pub class_name: Option<String>,
    pub required: TriState,
    pub rtexprvalue: TriState,
    pub exclude: TriState,
    pub facelets_only: TriState,
    pub description: String,
    pub long_description: Option<String>,
    pub deferred_value_type: Option<String>,
    pub deferred_method_signature: Option<String>,
    pub inherited: bool,
}

impl Keyed for AttributeRecord {
    fn key(&self) -> String {
        self.name.clone()
    }
}

pub type PropertySet = KeyedList<PropertyRecord>;
pub type AttributeSet = KeyedList<AttributeRecord>;

/// Class-level identity shared by every descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassMeta {
    pub source_class_name: String,
    pub class_name_override: Option<String>,
    pub parent_class_name: Option<String>,
    pub interfaces: Vec<String>,
    pub model_id: String,
}

impl ClassMeta {
    /// The override when present, the declaring class otherwise
    pub fn class_name(&self) -> &str {
        self.class_name_override
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.source_class_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConverterDescriptor {
    #[serde(flatten)]
    pub class: ClassMeta,
    pub name: Option<String>,
    pub converter_id: Option<String>,
    pub body_content: Option<String>,
    pub tag_class: Option<String>,
    pub tag_superclass: Option<String>,
    pub tag_handler: Option<String>,
    pub serial_uid_tag: Option<String>,
    pub config_excluded: TriState,
    pub evaluate_el_on_execution: TriState,
    pub description: String,
    pub long_description: Option<String>,
    pub properties: PropertySet,
}

impl Keyed for ConverterDescriptor {
    fn key(&self) -> String {
        self.class.class_name().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateTagDescriptor {
    #[serde(flatten)]
    pub class: ClassMeta,
    pub name: Option<String>,
    pub body_content: Option<String>,
    pub component_class: Option<String>,
    pub tag_class: Option<String>,
    pub converter_class: Option<String>,
    pub validator_class: Option<String>,
    pub behavior_class: Option<String>,
    pub description: String,
    pub long_description: Option<String>,
    pub attributes: AttributeSet,
}

impl Keyed for TemplateTagDescriptor {
    fn key(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.class.class_name().to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateFunctionDescriptor {
    #[serde(flatten)]
    pub class: ClassMeta,
    pub name: Option<String>,
    pub signature: String,
    pub declared_signature: String,
    pub description: String,
    pub long_description: Option<String>,
}

impl Keyed for TemplateFunctionDescriptor {
    fn key(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.signature.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenericTagDescriptor {
    #[serde(flatten)]
    pub class: ClassMeta,
    pub name: Option<String>,
    pub body_content: Option<String>,
    pub tag_handler: Option<String>,
    pub description: String,
    pub long_description: Option<String>,
    pub attributes: AttributeSet,
}

impl Keyed for GenericTagDescriptor {
    fn key(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.class.class_name().to_string())
    }
}

/// The closed set of descriptor kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DescriptorKind {
    Converter,
    TemplateTag,
    TemplateFunction,
    GenericTag,
}

impl DescriptorKind {
    pub const ALL: [DescriptorKind; 4] = [
        DescriptorKind::Converter,
        DescriptorKind::TemplateTag,
        DescriptorKind::TemplateFunction,
        DescriptorKind::GenericTag,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DescriptorKind::Converter => "converter",
            DescriptorKind::TemplateTag => "template-tag",
            DescriptorKind::TemplateFunction => "template-function",
            DescriptorKind::GenericTag => "generic-tag",
        }
    }

    /// Name under which a descriptor of this kind is bound for templates
    pub fn binding_name(self) -> &'static str {
        match self {
            DescriptorKind::Converter => "converter",
            DescriptorKind::TemplateTag | DescriptorKind::GenericTag => "tag",
            DescriptorKind::TemplateFunction => "function",
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DescriptorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "converter" => Ok(DescriptorKind::Converter),
            "template-tag" | "facelet-tag" => Ok(DescriptorKind::TemplateTag),
            "template-function" | "facelet-function" => Ok(DescriptorKind::TemplateFunction),
            "generic-tag" | "jsp-tag" => Ok(DescriptorKind::GenericTag),
            other => Err(format!("Unknown descriptor kind: {}", other)),
        }
    }
}

/// An owned descriptor as produced by a parsing strategy
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    Converter(ConverterDescriptor),
    TemplateTag(TemplateTagDescriptor),
    TemplateFunction(TemplateFunctionDescriptor),
    GenericTag(GenericTagDescriptor),
}

impl Descriptor {
    pub fn as_ref(&self) -> DescriptorRef<'_> {
        match self {
            Descriptor::Converter(d) => DescriptorRef::Converter(d),
            Descriptor::TemplateTag(d) => DescriptorRef::TemplateTag(d),
            Descriptor::TemplateFunction(d) => DescriptorRef::TemplateFunction(d),
            Descriptor::GenericTag(d) => DescriptorRef::GenericTag(d),
        }
    }

    pub fn kind(&self) -> DescriptorKind {
        self.as_ref().kind()
    }

    pub fn key(&self) -> String {
        self.as_ref().key()
    }
}

/// Borrowed view over any descriptor stored in a model
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DescriptorRef<'a> {
    Converter(&'a ConverterDescriptor),
    TemplateTag(&'a TemplateTagDescriptor),
    TemplateFunction(&'a TemplateFunctionDescriptor),
    GenericTag(&'a GenericTagDescriptor),
}

impl<'a> DescriptorRef<'a> {
    pub fn kind(&self) -> DescriptorKind {
        match self {
            DescriptorRef::Converter(_) => DescriptorKind::Converter,
            DescriptorRef::TemplateTag(_) => DescriptorKind::TemplateTag,
            DescriptorRef::TemplateFunction(_) => DescriptorKind::TemplateFunction,
            DescriptorRef::GenericTag(_) => DescriptorKind::GenericTag,
        }
    }

    pub fn key(&self) -> String {
        match self {
            DescriptorRef::Converter(d) => d.key(),
            DescriptorRef::TemplateTag(d) => d.key(),
            DescriptorRef::TemplateFunction(d) => d.key(),
            DescriptorRef::GenericTag(d) => d.key(),
        }
    }

    pub fn class_meta(&self) -> &'a ClassMeta {
        match self {
            DescriptorRef::Converter(d) => &d.class,
            DescriptorRef::TemplateTag(d) => &d.class,
            DescriptorRef::TemplateFunction(d) => &d.class,
            DescriptorRef::GenericTag(d) => &d.class,
        }
    }

    pub fn model_id(&self) -> &'a str {
        &self.class_meta().model_id
    }

    /// Fully qualified name of the class generated for this descriptor, if any
    pub fn generated_class(&self) -> Option<&'a str> {
        let name = match self {
            DescriptorRef::Converter(d) => d.tag_class.as_deref(),
            DescriptorRef::TemplateTag(d) => d.tag_class.as_deref(),
            DescriptorRef::GenericTag(d) => d.tag_handler.as_deref(),
            DescriptorRef::TemplateFunction(_) => None,
        };
        name.filter(|name| !name.is_empty())
    }

    /// Identifier matched against the id-prefix filter
    pub fn generated_id(&self) -> Option<&'a str> {
        match self {
            DescriptorRef::Converter(d) => d.converter_id.as_deref(),
            DescriptorRef::TemplateTag(d) => d.name.as_deref(),
            DescriptorRef::GenericTag(d) => d.name.as_deref(),
            DescriptorRef::TemplateFunction(d) => d.name.as_deref(),
        }
    }
}

/// Package part of a fully qualified class name (empty for the default package)
pub fn package_of(class_name: &str) -> &str {
    match class_name.rfind('.') {
        Some(pos) => &class_name[..pos],
        None => "",
    }
}

/// Unqualified part of a fully qualified class name
pub fn simple_name_of(class_name: &str) -> &str {
    match class_name.rfind('.') {
        Some(pos) => &class_name[pos + 1..],
        None => class_name,
    }
}
