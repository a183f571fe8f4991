//! Inheritance of members down the class hierarchy and across models

use crate::common::TestProject;
use crate::fixtures;

use tag_builder::analysis::source::{Annotation, ClassDecl, DocTag, MethodDecl, TypeRef};
use tag_builder::TriState;

fn pattern_holder() -> ClassDecl {
    ClassDecl::interface("org.example.convert.PatternHolder").with_method(
        MethodDecl::new("setPattern")
            .with_param("pattern", TypeRef::new("String"))
            .set_abstract()
            .with_annotation(Annotation::new("JSFProperty")),
    )
}

fn pattern_converter(implemented: bool) -> ClassDecl {
    let class = ClassDecl::new("org.example.convert.PatternConverter")
        .implementing("org.example.convert.PatternHolder")
        .with_tag(DocTag::new("JSFConverter").with("tagClass", "org.example.taglib.PatternTag"));
    if implemented {
        class.with_method(
            MethodDecl::new("setPattern").with_param("pattern", TypeRef::new("String")),
        )
    } else {
        class
    }
}

fn pattern_generated(project: &TestProject) -> TriState {
    let model = project.analyze("main");
    model
        .converters()
        .get("org.example.convert.PatternConverter")
        .and_then(|converter| converter.properties.get("pattern"))
        .map(|property| property.generated)
        .expect("pattern property should be collected from the interface")
}

#[test]
fn test_implemented_interface_member_is_not_generated() {
    let project = TestProject::new();
    project.write_classes("classes.json", &[pattern_holder(), pattern_converter(true)]);
    assert_eq!(pattern_generated(&project), TriState::False);
}

#[test]
fn test_removing_the_implementation_flips_generated() {
    let project = TestProject::new();
    project.write_classes("classes.json", &[pattern_holder(), pattern_converter(true)]);
    assert_eq!(pattern_generated(&project), TriState::False);

    project.write_classes("classes.json", &[pattern_holder(), pattern_converter(false)]);
    assert_eq!(pattern_generated(&project), TriState::True);
}

#[test]
fn test_signature_mismatch_does_not_count_as_implementation() {
    let project = TestProject::new();
    let converter = pattern_converter(false).with_method(
        MethodDecl::new("setPattern").with_param("pattern", TypeRef::new("java.util.regex.Pattern")),
    );
    project.write_classes("classes.json", &[pattern_holder(), converter]);
    assert_eq!(pattern_generated(&project), TriState::True);
}

#[test]
fn test_imported_simple_name_matches_qualified_implementation() {
    let project = TestProject::new();
    let holder = ClassDecl::interface("org.example.convert.PatternHolder")
        .importing("java.util.regex.Pattern")
        .with_method(
            MethodDecl::new("setPattern")
                .with_param("pattern", TypeRef::new("Pattern"))
                .set_abstract()
                .with_annotation(Annotation::new("JSFProperty")),
        );
    let converter = pattern_converter(false).with_method(
        MethodDecl::new("setPattern").with_param("pattern", TypeRef::new("java.util.regex.Pattern")),
    );
    project.write_classes("classes.json", &[holder, converter]);
    assert_eq!(pattern_generated(&project), TriState::False);
}

#[test]
fn test_array_dimensions_take_part_in_the_signature() {
    let project = TestProject::new();
    let holder = ClassDecl::interface("org.example.convert.PatternHolder").with_method(
        MethodDecl::new("setPattern")
            .with_param("pattern", TypeRef::array("String", 1))
            .set_abstract()
            .with_annotation(Annotation::new("JSFProperty")),
    );
    project.write_classes("classes.json", &[holder, pattern_converter(true)]);
    assert_eq!(pattern_generated(&project), TriState::True);
}

#[test]
fn test_parent_properties_are_inherited() {
    let project = TestProject::new();
    project.write_declarations("converters.json", fixtures::CONVERTERS);

    let mut model = project.analyze("core");
    model.flatten();
    assert!(model.is_flattened());

    let converter = model
        .converters()
        .get("org.example.convert.MyConverter")
        .unwrap();
    let names: Vec<String> = converter.properties.keys().collect();
    assert_eq!(names, vec!["locale", "pattern", "for"]);

    let inherited = converter.properties.get("for").unwrap();
    assert!(inherited.inherited);
    assert_eq!(inherited.description, "Id of the target component");
    assert!(!converter.properties.get("locale").unwrap().inherited);

    let parent = model
        .converters()
        .get("org.example.convert.AbstractConverter")
        .unwrap();
    assert_eq!(parent.properties.len(), 1);
    assert!(!parent.properties.get("for").unwrap().inherited);
}

#[test]
fn test_grandparent_attributes_reach_leaf_tags() {
    let project = TestProject::new();
    project.write_classes(
        "tags.json",
        &[
            ClassDecl::new("org.example.tags.BaseTag")
                .with_tag(DocTag::new("JSFJspTag").with("name", "ex:base"))
                .with_method(
                    MethodDecl::new("setId")
                        .with_param("id", TypeRef::new("String"))
                        .with_tag(DocTag::new("JSFJspAttribute")),
                ),
            ClassDecl::new("org.example.tags.OutputTag")
                .extending("org.example.tags.BaseTag")
                .with_tag(DocTag::new("JSFJspTag").with("name", "ex:output"))
                .with_method(
                    MethodDecl::new("setValue")
                        .with_param("value", TypeRef::new("Object"))
                        .with_tag(DocTag::new("JSFJspAttribute")),
                ),
            ClassDecl::new("org.example.tags.FormattedOutputTag")
                .extending("org.example.tags.OutputTag")
                .with_tag(DocTag::new("JSFJspTag").with("name", "ex:formattedOutput"))
                .with_method(
                    MethodDecl::new("setValue")
                        .with_param("value", TypeRef::new("String"))
                        .with_tag(DocTag::new("JSFJspAttribute").with("required", "true")),
                ),
        ],
    );

    let mut model = project.analyze("main");
    model.flatten();

    let leaf = model.generic_tags().get("ex:formattedOutput").unwrap();
    let names: Vec<String> = leaf.attributes.keys().collect();
    assert_eq!(names, vec!["value", "id"]);

    // The leaf's own declaration shadows the parent's record of the same name
    let value = leaf.attributes.get("value").unwrap();
    assert_eq!(value.class_name.as_deref(), Some("java.lang.String"));
    assert_eq!(value.required, TriState::True);
    assert!(!value.inherited);
    assert!(leaf.attributes.get("id").unwrap().inherited);
}

#[test]
fn test_flattening_twice_changes_nothing() {
    let project = TestProject::new();
    project.write_declarations("converters.json", fixtures::CONVERTERS);

    let mut model = project.analyze("core");
    model.flatten();
    let once = model.clone();
    model.flatten();
    assert_eq!(model, once);
}

#[test]
fn test_parents_from_dependency_models_are_inherited() {
    let api = TestProject::new();
    api.write_declarations("api.json", fixtures::API_CONVERTERS);
    let api_model = api.analyze("api");

    let core = TestProject::new();
    core.write_classes(
        "core.json",
        &[ClassDecl::new("org.example.convert.HexColorConverter")
            .extending("org.example.api.ColorConverter")
            .with_tag(DocTag::new("JSFConverter").with("tagClass", "org.example.taglib.HexColorTag"))],
    );

    let mut model = core.analyze("core");
    model.merge(api_model);
    model.flatten();

    let hex = model
        .converters()
        .get("org.example.convert.HexColorConverter")
        .unwrap();
    assert_eq!(hex.class.model_id, "core");
    assert!(hex.properties.get("format").unwrap().inherited);

    let color = model.converters().get("org.example.api.ColorConverter").unwrap();
    assert_eq!(color.class.model_id, "api");
}
