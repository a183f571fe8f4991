use crate::error::Result;
use crate::models::{
    AttributeRecord, ClassMeta, ConverterDescriptor, Descriptor, DescriptorKind, DescriptorRef,
    GenericTagDescriptor, Keyed, KeyedList, PropertyRecord, TemplateFunctionDescriptor,
    TemplateTagDescriptor,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// All descriptors discovered for one or more modules.
///
/// Collections keep insertion order and are keyed per kind: converters by
/// class name, tags by tag name (or class name), functions by name (or
/// signature). Adding a descriptor under an existing key replaces it in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Model {
    pub model_id: String,
    converters: KeyedList<ConverterDescriptor>,
    template_tags: KeyedList<TemplateTagDescriptor>,
    template_functions: KeyedList<TemplateFunctionDescriptor>,
    generic_tags: KeyedList<GenericTagDescriptor>,
    #[serde(skip)]
    flattened: bool,
}

impl Model {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            ..Default::default()
        }
    }

    /// Register a descriptor, returning the one it replaced
    pub fn add_descriptor(&mut self, descriptor: Descriptor) -> Option<Descriptor> {
        match descriptor {
            Descriptor::Converter(d) => self.converters.insert(d).map(Descriptor::Converter),
            Descriptor::TemplateTag(d) => self.template_tags.insert(d).map(Descriptor::TemplateTag),
            Descriptor::TemplateFunction(d) => self
                .template_functions
                .insert(d)
                .map(Descriptor::TemplateFunction),
            Descriptor::GenericTag(d) => self.generic_tags.insert(d).map(Descriptor::GenericTag),
        }
    }

    pub fn get(&self, kind: DescriptorKind, key: &str) -> Option<DescriptorRef<'_>> {
        match kind {
            DescriptorKind::Converter => self.converters.get(key).map(DescriptorRef::Converter),
            DescriptorKind::TemplateTag => {
                self.template_tags.get(key).map(DescriptorRef::TemplateTag)
            }
            DescriptorKind::TemplateFunction => self
                .template_functions
                .get(key)
                .map(DescriptorRef::TemplateFunction),
            DescriptorKind::GenericTag => self.generic_tags.get(key).map(DescriptorRef::GenericTag),
        }
    }

    pub fn converters(&self) -> &KeyedList<ConverterDescriptor> {
        &self.converters
    }

    pub fn template_tags(&self) -> &KeyedList<TemplateTagDescriptor> {
        &self.template_tags
    }

    pub fn template_functions(&self) -> &KeyedList<TemplateFunctionDescriptor> {
        &self.template_functions
    }

    pub fn generic_tags(&self) -> &KeyedList<GenericTagDescriptor> {
        &self.generic_tags
    }

    /// Descriptors of one kind in insertion order
    pub fn descriptors_of(&self, kind: DescriptorKind) -> Vec<DescriptorRef<'_>> {
        match kind {
            DescriptorKind::Converter => {
                self.converters.iter().map(DescriptorRef::Converter).collect()
            }
            DescriptorKind::TemplateTag => self
                .template_tags
                .iter()
                .map(DescriptorRef::TemplateTag)
                .collect(),
            DescriptorKind::TemplateFunction => self
                .template_functions
                .iter()
                .map(DescriptorRef::TemplateFunction)
                .collect(),
            DescriptorKind::GenericTag => self
                .generic_tags
                .iter()
                .map(DescriptorRef::GenericTag)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.converters.len()
            + self.template_tags.len()
            + self.template_functions.len()
            + self.generic_tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_flattened(&self) -> bool {
        self.flattened
    }

    /// Add another model's descriptors, keeping their model ids.
    ///
    /// Descriptors already present under the same key are kept. The merged
    /// model has to be flattened again.
    pub fn merge(&mut self, other: Model) {
        merge_missing(&mut self.converters, other.converters);
        merge_missing(&mut self.template_tags, other.template_tags);
        merge_missing(&mut self.template_functions, other.template_functions);
        merge_missing(&mut self.generic_tags, other.generic_tags);
        self.flattened = false;
    }

    /// Pull records down from ancestor descriptors of the same kind.
    ///
    /// Runs once per model; later calls are no-ops until the next merge.
    pub fn flatten(&mut self) {
        if self.flattened {
            return;
        }
        flatten_hierarchy(&mut self.converters);
        flatten_hierarchy(&mut self.template_tags);
        flatten_hierarchy(&mut self.generic_tags);
        self.flattened = true;
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

fn merge_missing<T: Keyed>(target: &mut KeyedList<T>, source: KeyedList<T>) {
    let incoming: Vec<T> = source.into_vec();
    for item in incoming {
        if !target.contains(&item.key()) {
            target.insert(item);
        }
    }
}

/// A descriptor whose records can be inherited by subclasses
trait Inheritable: Keyed {
    type Record: Keyed + Clone;

    fn class_meta(&self) -> &ClassMeta;
    fn records(&self) -> &KeyedList<Self::Record>;
    fn records_mut(&mut self) -> &mut KeyedList<Self::Record>;
    fn mark_inherited(record: &mut Self::Record);
}

impl Inheritable for ConverterDescriptor {
    type Record = PropertyRecord;

    fn class_meta(&self) -> &ClassMeta {
        &self.class
    }

    fn records(&self) -> &KeyedList<PropertyRecord> {
        &self.properties
    }

    fn records_mut(&mut self) -> &mut KeyedList<PropertyRecord> {
        &mut self.properties
    }

    fn mark_inherited(record: &mut PropertyRecord) {
        record.inherited = true;
    }
}

macro_rules! impl_inheritable_tag {
    ($ty:ty) => {
        impl Inheritable for $ty {
            type Record = AttributeRecord;

            fn class_meta(&self) -> &ClassMeta {
                &self.class
            }

            fn records(&self) -> &KeyedList<AttributeRecord> {
                &self.attributes
            }

            fn records_mut(&mut self) -> &mut KeyedList<AttributeRecord> {
                &mut self.attributes
            }

            fn mark_inherited(record: &mut AttributeRecord) {
                record.inherited = true;
            }
        }
    };
}

impl_inheritable_tag!(TemplateTagDescriptor);
impl_inheritable_tag!(GenericTagDescriptor);

fn flatten_hierarchy<T: Inheritable>(list: &mut KeyedList<T>) {
    // Parents are referenced by their declaring class, descriptors are keyed otherwise
    let mut by_source: HashMap<String, String> = HashMap::new();
    for descriptor in list.iter() {
        by_source
            .entry(descriptor.class_meta().source_class_name.clone())
            .or_insert_with(|| descriptor.key());
    }

    let keys: Vec<String> = list.keys().collect();
    for key in keys {
        let mut inherited: Vec<T::Record> = Vec::new();
        let mut visited: HashSet<String> = HashSet::from([key.clone()]);
        let mut parent = list
            .get(&key)
            .and_then(|d| d.class_meta().parent_class_name.clone());

        while let Some(parent_name) = parent {
            let Some(parent_key) = by_source.get(&parent_name) else {
                break;
            };
            if !visited.insert(parent_key.clone()) {
                break;
            }
            let Some(ancestor) = list.get(parent_key) else {
                break;
            };
            inherited.extend(ancestor.records().iter().cloned());
            parent = ancestor.class_meta().parent_class_name.clone();
        }

        if let Some(descriptor) = list.get_mut(&key) {
            for mut record in inherited {
                if !descriptor.records().contains(&record.key()) {
                    T::mark_inherited(&mut record);
                    descriptor.records_mut().insert(record);
                }
            }
        }
    }
}
