//! Descriptor selection driven by the generation config

use crate::common::{path_string, TestProject};
use crate::fixtures;

use tag_builder::build::selector_for;
use tag_builder::generators::{Selection, SkipReason};
use tag_builder::{DescriptorKind, GenerateConfig, Model};

fn fixture_model(project: &TestProject) -> Model {
    project
        .write_declarations("converters.json", fixtures::CONVERTERS)
        .write_declarations("tags.json", fixtures::TAGS);
    let mut model = project.analyze("core");
    model.flatten();
    model
}

fn generated_classes(model: &Model, config: &GenerateConfig) -> Vec<String> {
    selector_for(config)
        .select_all(model, &DescriptorKind::ALL)
        .into_iter()
        .filter_map(|selection| match selection {
            Selection::Generate { class_name, .. } => Some(class_name.to_string()),
            Selection::Skip { .. } => None,
        })
        .collect()
}

fn skip_reasons(model: &Model, config: &GenerateConfig) -> Vec<(String, SkipReason)> {
    selector_for(config)
        .select_all(model, &DescriptorKind::ALL)
        .into_iter()
        .filter_map(|selection| match selection {
            Selection::Skip { descriptor, reason } => Some((descriptor.key(), reason)),
            Selection::Generate { .. } => None,
        })
        .collect()
}

#[test]
fn test_every_descriptor_with_a_class_is_selected_by_default() {
    let project = TestProject::new();
    let model = fixture_model(&project);
    let config = project.config("core");

    assert_eq!(
        generated_classes(&model, &config),
        vec![
            "org.example.taglib.ConvertPatternTag",
            "org.example.taglib.IncludeTag",
            "org.example.taglib.VerbatimTagHandler",
        ]
    );

    let skipped = skip_reasons(&model, &config);
    assert_eq!(skipped.len(), 3);
    assert!(skipped
        .iter()
        .all(|(_, reason)| *reason == SkipReason::NoGeneratedClass));
}

#[test]
fn test_id_prefix_narrows_selection() {
    let project = TestProject::new();
    let model = fixture_model(&project);
    let config = GenerateConfig {
        type_prefix: Some("my".to_string()),
        ..project.config("core")
    };

    assert_eq!(
        generated_classes(&model, &config),
        vec!["org.example.taglib.ConvertPatternTag"]
    );

    let skipped = skip_reasons(&model, &config);
    let include = skipped
        .iter()
        .find(|(key, _)| key == "ex:include")
        .map(|(_, reason)| reason.clone());
    assert_eq!(
        include,
        Some(SkipReason::IdMismatch {
            id: Some("ex:include".to_string()),
            prefix: "my".to_string(),
        })
    );
}

#[test]
fn test_package_prefix_excludes_other_packages() {
    let project = TestProject::new();
    let model = fixture_model(&project);

    let matching = GenerateConfig {
        package_contains: Some("org.example.taglib".to_string()),
        ..project.config("core")
    };
    assert_eq!(generated_classes(&model, &matching).len(), 3);

    let other = GenerateConfig {
        package_contains: Some("org.example.other".to_string()),
        ..project.config("core")
    };
    assert!(generated_classes(&model, &other).is_empty());
    assert!(skip_reasons(&model, &other)
        .iter()
        .any(|(_, reason)| matches!(reason, SkipReason::PackageMismatch { .. })));
}

#[test]
fn test_unselected_models_are_skipped() {
    let project = TestProject::new();
    let model = fixture_model(&project);
    let config = GenerateConfig {
        model_ids: Some(vec!["api".to_string()]),
        ..project.config("core")
    };

    assert!(generated_classes(&model, &config).is_empty());
    assert!(skip_reasons(&model, &config).contains(&(
        "org.example.convert.MyConverter".to_string(),
        SkipReason::ModelNotSelected {
            model_id: "core".to_string()
        }
    )));
}

#[test]
fn test_hand_written_copy_in_secondary_root_wins() {
    let project = TestProject::new();
    let model = fixture_model(&project);

    let secondary = project.root().join("src/extra/java");
    let existing = secondary.join("org/example/taglib/IncludeTag.java");
    std::fs::create_dir_all(existing.parent().unwrap()).unwrap();
    std::fs::write(&existing, "public class IncludeTag {}").unwrap();

    let config = GenerateConfig {
        main_source_directory2: Some(path_string(&secondary)),
        ..project.config("core")
    };

    assert_eq!(
        generated_classes(&model, &config),
        vec![
            "org.example.taglib.ConvertPatternTag",
            "org.example.taglib.VerbatimTagHandler",
        ]
    );
    assert!(skip_reasons(&model, &config).contains(&(
        "ex:include".to_string(),
        SkipReason::AlreadyExists { path: existing }
    )));
}
