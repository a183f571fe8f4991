//! Resolution of the two annotation encodings into one canonical declaration.
//!
//! Every element may carry a metadata tag as a structured annotation, as a
//! free-text comment tag, or both. For a given element and tag name exactly one
//! encoding is used: annotations win, comment tags are the fallback. When both
//! are present the comment tags are ignored and an [`Ambiguity`] is recorded.

use crate::analysis::source::{clean_literal, Annotated, Annotation, ParamMap};
use crate::models::TriState;
use regex::Regex;
use std::sync::OnceLock;

pub const NO_DESCRIPTION: &str = "no description";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Annotation,
    CommentTag,
}

/// Both encodings of `tag` were found on the same element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    pub class: String,
    pub element: String,
    pub tag: String,
}

impl std::fmt::Display for Ambiguity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} on {} ({}) is declared both as annotation and comment tag; using the annotation",
            self.tag, self.element, self.class
        )
    }
}

/// Warnings collected while resolving declarations
#[derive(Debug, Default)]
pub struct Diagnostics {
    ambiguities: Vec<Ambiguity>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, class: &str, element: &str, tag: &str) {
        self.ambiguities.push(Ambiguity {
            class: class.to_string(),
            element: element.to_string(),
            tag: tag.to_string(),
        });
    }

    pub fn ambiguities(&self) -> &[Ambiguity] {
        &self.ambiguities
    }

    pub fn into_ambiguities(self) -> Vec<Ambiguity> {
        self.ambiguities
    }
}

/// One resolved declaration and its named parameters
#[derive(Debug, Clone, Copy)]
pub struct Declaration<'a> {
    pub encoding: Encoding,
    params: &'a ParamMap,
}

impl<'a> Declaration<'a> {
    pub fn new(encoding: Encoding, params: &'a ParamMap) -> Self {
        Self { encoding, params }
    }

    pub fn params(&self) -> &'a ParamMap {
        self.params
    }

    /// Text value of a named parameter, unquoted
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.params.get(key).and_then(|value| value.as_text())
    }

    /// The last of `keys` that is present wins, as with `class`/`clazz`
    pub fn get_string_any(&self, keys: &[&str]) -> Option<String> {
        keys.iter().rev().find_map(|key| self.get_string(key))
    }

    /// `true` (case-insensitive) is true, any other value is false, absent is unset
    pub fn get_bool(&self, key: &str) -> TriState {
        match self.get_string(key) {
            Some(text) => TriState::from(text.eq_ignore_ascii_case("true")),
            None => TriState::Unset,
        }
    }

    /// Nested annotations held by a group parameter
    pub fn get_nested(&self, key: &str) -> Vec<&'a Annotation> {
        self.params
            .get(key)
            .map(|value| value.as_annotations())
            .unwrap_or_default()
    }
}

/// Resolve a single-valued tag on `element`
pub fn resolve_one<'a, E: Annotated>(
    element: &'a E,
    class: &str,
    tag: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Declaration<'a>> {
    let comment_tags = element.doc_tags_named(tag);
    match element.annotation_named(tag) {
        Some(annotation) => {
            if !comment_tags.is_empty() {
                diagnostics.record(class, element.element_name(), tag);
            }
            Some(Declaration::new(Encoding::Annotation, &annotation.params))
        }
        None => comment_tags
            .first()
            .map(|doc| Declaration::new(Encoding::CommentTag, &doc.params)),
    }
}

/// Resolve a repeatable tag plus its optional group form `group(field = {...})`
pub fn resolve_grouped<'a, E: Annotated>(
    element: &'a E,
    class: &str,
    single: &str,
    group: Option<(&str, &str)>,
    diagnostics: &mut Diagnostics,
) -> Vec<Declaration<'a>> {
    let annotated = collect(
        element
            .annotations()
            .iter()
            .filter(|a| a.is_named(single))
            .map(|a| &a.params),
        element
            .annotations()
            .iter()
            .filter(|a| group.is_some_and(|(name, _)| a.is_named(name)))
            .map(|a| &a.params),
        group,
        Encoding::Annotation,
    );

    let commented = collect(
        element
            .doc_tags()
            .iter()
            .filter(|t| t.name == single)
            .map(|t| &t.params),
        element
            .doc_tags()
            .iter()
            .filter(|t| group.is_some_and(|(name, _)| t.name == name))
            .map(|t| &t.params),
        group,
        Encoding::CommentTag,
    );

    if annotated.is_empty() {
        return commented;
    }
    if !commented.is_empty() {
        diagnostics.record(class, element.element_name(), single);
    }
    annotated
}

fn collect<'a>(
    singles: impl Iterator<Item = &'a ParamMap>,
    groups: impl Iterator<Item = &'a ParamMap>,
    group: Option<(&str, &str)>,
    encoding: Encoding,
) -> Vec<Declaration<'a>> {
    let mut declarations: Vec<Declaration<'a>> = singles
        .map(|params| Declaration::new(encoding, params))
        .collect();

    if let Some((_, field)) = group {
        for params in groups {
            let holder = Declaration::new(encoding, params);
            declarations.extend(
                holder
                    .get_nested(field)
                    .into_iter()
                    .map(|nested| Declaration::new(encoding, &nested.params)),
            );
        }
    }
    declarations
}

fn sentence_end() -> &'static Regex {
    static SENTENCE_END: OnceLock<Regex> = OnceLock::new();
    SENTENCE_END.get_or_init(|| Regex::new(r"\.(\s|$)").expect("valid sentence pattern"))
}

/// Text up to and including the first period followed by whitespace or end
pub fn first_sentence(text: Option<&str>) -> Option<String> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }
    let sentence = match sentence_end().find(text) {
        Some(found) => &text[..found.start() + 1],
        None => text,
    };
    Some(sentence.trim().to_string())
}

/// The explicit description, else the fallback; anything shorter than two
/// characters becomes [`NO_DESCRIPTION`]
pub fn short_description(explicit: Option<String>, fallback: Option<String>) -> String {
    match explicit.or(fallback) {
        Some(candidate) if candidate.chars().count() >= 2 => candidate,
        _ => NO_DESCRIPTION.to_string(),
    }
}

/// String literal held by a field initializer such as `"javax.faces.DateTime"`
pub fn string_literal_of(initializer: &str) -> Option<String> {
    let start = initializer.find('"')?;
    let literal = clean_literal(initializer[start..].trim_end_matches(';'));
    Some(literal)
}
