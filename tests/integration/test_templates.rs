//! Built-in templates rendered against extracted descriptors

use crate::common::TestProject;
use crate::fixtures;

use tag_builder::generators::templates::default_template_name;
use tag_builder::generators::{create_renderer, Bindings, TemplateUtils};
use tag_builder::{DescriptorKind, Model, TemplateRenderer, TeraRenderer};

fn flattened_fixture_model() -> Model {
    let project = TestProject::new();
    project
        .write_declarations("converters.json", fixtures::CONVERTERS)
        .write_declarations("tags.json", fixtures::TAGS);
    let mut model = project.analyze("core");
    model.flatten();
    model
}

#[test]
fn test_every_builtin_renders_every_descriptor_of_its_kind() {
    let model = flattened_fixture_model();
    let renderer = TeraRenderer::new().unwrap();

    for version in ["1.1", "1.2"] {
        let utils = TemplateUtils::new(Some(version));
        for kind in [
            DescriptorKind::Converter,
            DescriptorKind::TemplateTag,
            DescriptorKind::GenericTag,
        ] {
            let template = default_template_name(kind, Some(version)).unwrap();
            assert!(renderer.has_template(&template), "missing {}", template);

            for descriptor in model.descriptors_of(kind) {
                let bindings = Bindings::for_descriptor(&utils, descriptor).unwrap();
                let output = renderer
                    .render(&template, &bindings)
                    .unwrap_or_else(|e| panic!("{} failed for {}: {}", template, descriptor.key(), e));
                assert!(output.contains("Generated by tag-builder"));
                assert!(output.contains("public class "));
            }
        }
    }
}

#[test]
fn test_descriptors_without_package_render_without_package_line() {
    let project = TestProject::new();
    project.write_declarations(
        "default_package.json",
        r#"{
          "classes": [
            {
              "name": "LocalTag",
              "tags": [{ "name": "JSFJspTag", "params": { "name": "local", "tagHandler": "LocalTagHandler" } }]
            }
          ]
        }"#,
    );
    let model = project.analyze("main");

    let renderer = create_renderer(None).unwrap();
    let descriptor = model.get(DescriptorKind::GenericTag, "local").unwrap();
    let bindings = Bindings::for_descriptor(&TemplateUtils::new(None), descriptor).unwrap();
    let output = renderer.render("generic_tag_11.tera", &bindings).unwrap();

    assert!(!output.contains("package "));
    assert!(output.contains("public class LocalTagHandler extends TagSupport"));
}

#[test]
fn test_functions_have_no_default_template() {
    assert!(default_template_name(DescriptorKind::TemplateFunction, Some("1.2")).is_none());
}
