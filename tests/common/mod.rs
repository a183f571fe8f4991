#![allow(dead_code)]
/// Common test utilities and helpers
use std::fs;
use std::path::{Path, PathBuf};
use tag_builder::analysis::source::ClassDecl;
use tag_builder::analysis::MetadataAnalyzer;
use tag_builder::{DeclarationSet, GenerateConfig, Model};
use tempfile::TempDir;

/// A throwaway module layout: declarations, hand-written sources, generated
/// sources and metadata each get their own directory
pub struct TestProject {
    pub temp_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn declarations_dir(&self) -> PathBuf {
        self.root().join("declarations")
    }

    pub fn hand_written_dir(&self) -> PathBuf {
        self.root().join("src/main/java")
    }

    pub fn generated_dir(&self) -> PathBuf {
        self.root().join("generated")
    }

    pub fn metadata_file(&self, name: &str) -> PathBuf {
        self.root().join("meta").join(name)
    }

    /// Write a declarations dump below the declarations directory
    pub fn write_declarations(&self, name: &str, json: &str) -> &Self {
        write(&self.declarations_dir().join(name), json);
        self
    }

    /// Serialize `classes` as a declarations dump
    pub fn write_classes(&self, name: &str, classes: &[ClassDecl]) -> &Self {
        let json = serde_json::json!({ "classes": classes });
        self.write_declarations(name, &serde_json::to_string_pretty(&json).unwrap())
    }

    /// Place a hand-written source for `class_name` in the primary source root
    pub fn write_hand_written(&self, class_name: &str, content: &str) -> PathBuf {
        let path = self
            .hand_written_dir()
            .join(format!("{}.java", class_name.replace('.', "/")));
        write(&path, content);
        path
    }

    /// Configuration pointing every directory into this project
    pub fn config(&self, model_id: &str) -> GenerateConfig {
        GenerateConfig {
            source_path: path_string(&self.declarations_dir()),
            model_id: model_id.to_string(),
            generated_source_directory: path_string(&self.generated_dir()),
            main_source_directory: path_string(&self.hand_written_dir()),
            ..Default::default()
        }
    }

    /// Extract an unflattened model from the declarations written so far
    pub fn analyze(&self, model_id: &str) -> Model {
        let declarations = DeclarationSet::load(self.declarations_dir()).unwrap();
        MetadataAnalyzer::new(model_id).analyze(&declarations).unwrap()
    }

    pub fn read_generated(&self, class_name: &str) -> String {
        let path = self
            .generated_dir()
            .join(format!("{}.java", class_name.replace('.', "/")));
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }
}

pub fn path_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
