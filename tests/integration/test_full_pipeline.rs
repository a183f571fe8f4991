//! Integration tests for complete end-to-end scenarios
//! Declarations in, tag classes and metadata out

use crate::common::{path_string, TestProject};
use crate::fixtures;

use std::fs;
use tag_builder::interface::build_metadata_from_config;
use tag_builder::{generate_from_config, DescriptorKind, GenerateConfig, Model};

const MY_CONV_TAG: &str = "org.example.taglib.ConvertPatternTag";

fn converter_project() -> TestProject {
    let project = TestProject::new();
    project.write_declarations("converters.json", fixtures::CONVERTERS);
    project
}

#[test]
fn test_converter_is_generated_then_skipped_once_hand_written() {
    let project = converter_project();
    let config = project.config("core");

    let report = generate_from_config(&config).unwrap();
    assert!(report.is_success());
    assert_eq!(report.generated.len(), 1);
    assert_eq!(report.generated[0].kind, DescriptorKind::Converter);
    assert_eq!(report.generated[0].class_name, MY_CONV_TAG);
    assert_eq!(
        report.generated[0].path,
        project
            .generated_dir()
            .join("org/example/taglib/ConvertPatternTag.java")
    );
    assert!(report.generated[0].path.exists());

    let content = project.read_generated(MY_CONV_TAG);
    assert!(content.contains("package org.example.taglib;"));
    assert!(content.contains("public class ConvertPatternTag"));
    assert!(content.contains("createConverter(\"myConv\")"));

    // The copy now lives with the hand-written sources
    project.write_hand_written(MY_CONV_TAG, &content);
    let rerun = generate_from_config(&config).unwrap();

    assert!(rerun.generated.is_empty());
    assert!(rerun.failed.is_empty());
    assert!(rerun
        .skipped
        .iter()
        .any(|skip| skip.key == "org.example.convert.MyConverter"
            && skip.reason.starts_with("hand-written source exists")));
}

#[test]
fn test_generated_converter_binds_every_flattened_property() {
    let project = converter_project();
    generate_from_config(&project.config("core")).unwrap();

    let content = project.read_generated(MY_CONV_TAG);
    for setter in ["setLocale", "setPattern", "setFor"] {
        assert!(
            content.contains(&format!("public void {}(ValueExpression", setter)),
            "missing {} in:\n{}",
            setter,
            content
        );
    }
    assert!(content.contains("private ValueExpression _locale;"));
    assert!(content.contains("(java.util.Locale)"));
    assert!(content.contains("accepts only literal values"));
    assert!(content.contains("Id of the target component"));
}

#[test]
fn test_regeneration_is_idempotent() {
    let project = converter_project();
    let config = project.config("core");

    generate_from_config(&config).unwrap();
    let first = project.read_generated(MY_CONV_TAG);
    generate_from_config(&config).unwrap();
    let second = project.read_generated(MY_CONV_TAG);

    assert_eq!(first, second);
}

#[test]
fn test_all_targets_for_version_12() {
    let project = converter_project();
    project.write_declarations("tags.json", fixtures::TAGS);

    let config = GenerateConfig {
        targets: vec![
            "converter".to_string(),
            "template-tag".to_string(),
            "template-function".to_string(),
            "generic-tag".to_string(),
        ],
        target_version: Some("1.2".to_string()),
        ..project.config("core")
    };

    let report = generate_from_config(&config).unwrap();
    assert!(report.is_success());

    let classes: Vec<&str> = report
        .generated
        .iter()
        .map(|generated| generated.class_name.as_str())
        .collect();
    assert_eq!(
        classes,
        vec![
            MY_CONV_TAG,
            "org.example.taglib.IncludeTag",
            "org.example.taglib.VerbatimTagHandler",
        ]
    );

    let include = project.read_generated("org.example.taglib.IncludeTag");
    assert!(include.contains("public class IncludeTag extends UIComponentELTag"));
    assert!(include.contains("component.setValueExpression(\"src\", _src);"));

    let verbatim = project.read_generated("org.example.taglib.VerbatimTagHandler");
    assert!(verbatim.contains("public class VerbatimTagHandler"));
    assert!(verbatim.contains("Renders its body verbatim"));
}

#[test]
fn test_metadata_is_saved_and_reloadable() {
    let project = converter_project();
    let metadata = project.metadata_file("core.json");
    let config = GenerateConfig {
        metadata_file: Some(path_string(&metadata)),
        ..project.config("core")
    };

    generate_from_config(&config).unwrap();

    let saved = Model::load(&metadata).unwrap();
    assert_eq!(saved.model_id, "core");
    assert_eq!(saved.converters().len(), 2);
    let converter = saved
        .converters()
        .get("org.example.convert.MyConverter")
        .unwrap();
    assert!(converter.properties.get("for").unwrap().inherited);
}

#[test]
fn test_dependency_metadata_feeds_generation() {
    let api = TestProject::new();
    api.write_declarations("api.json", fixtures::API_CONVERTERS);
    let api_metadata = api.metadata_file("api.json");
    let api_config = GenerateConfig {
        metadata_file: Some(path_string(&api_metadata)),
        ..api.config("api")
    };
    let api_model = build_metadata_from_config(&api_config).unwrap();
    assert_eq!(api_model.len(), 1);
    assert!(api_metadata.exists());

    let core = TestProject::new();
    core.write_declarations(
        "core.json",
        r#"{
          "classes": [
            {
              "name": "org.example.convert.HexColorConverter",
              "superclass": "org.example.api.ColorConverter",
              "tags": [
                {
                  "name": "JSFConverter",
                  "params": { "id": "core.HexColor", "tagClass": "org.example.taglib.HexColorTag" }
                }
              ]
            }
          ]
        }"#,
    );
    let config = GenerateConfig {
        dependency_models: Some(vec![path_string(&api_metadata)]),
        ..core.config("core")
    };

    let report = generate_from_config(&config).unwrap();
    assert_eq!(report.generated.len(), 1);
    assert_eq!(report.generated[0].class_name, "org.example.taglib.HexColorTag");
    assert!(report
        .skipped
        .iter()
        .any(|skip| skip.key == "org.example.api.ColorConverter"
            && skip.reason == "model 'api' is not selected"));

    let content = core.read_generated("org.example.taglib.HexColorTag");
    assert!(content.contains("public void setFormat(ValueExpression format)"));
}

#[test]
fn test_template_directory_overrides_builtin() {
    let project = converter_project();
    let templates = project.root().join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(
        templates.join("converter_tag_11.tera"),
        "// {{ converter.generatedSimpleName }} for {{ converter.converterId }}\n",
    )
    .unwrap();

    let config = GenerateConfig {
        template_source_directory: Some(path_string(&templates)),
        ..project.config("core")
    };
    generate_from_config(&config).unwrap();

    assert_eq!(
        project.read_generated(MY_CONV_TAG).trim_end(),
        "// ConvertPatternTag for myConv"
    );
}

#[test]
fn test_unknown_template_fails_fast_without_force() {
    let project = converter_project();
    let config = GenerateConfig {
        template_name: Some("missing.tera".to_string()),
        ..project.config("core")
    };

    let err = generate_from_config(&config).unwrap_err();
    assert!(err.to_string().contains("Generation failed"));
}

#[test]
fn test_force_records_failures_and_continues() {
    let project = converter_project();
    let config = GenerateConfig {
        template_name: Some("missing.tera".to_string()),
        force: Some(true),
        ..project.config("core")
    };

    let report = generate_from_config(&config).unwrap();
    assert!(!report.is_success());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].key, "org.example.convert.MyConverter");
    assert!(report.generated.is_empty());
}

#[test]
fn test_missing_declarations_are_rejected() {
    let project = TestProject::new();
    let err = generate_from_config(&project.config("core")).unwrap_err();
    assert!(err.to_string().contains("Source path does not exist"));
}
