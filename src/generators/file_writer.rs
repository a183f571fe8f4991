use crate::error::Result;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Writes rendered sources below an output root
pub struct SourceWriter {
    output_root: PathBuf,
    generated_files: Vec<PathBuf>,
}

impl SourceWriter {
    pub fn new<P: AsRef<Path>>(output_root: P) -> Result<Self> {
        let output_root = output_root.as_ref().to_path_buf();
        fs::create_dir_all(&output_root)?;
        Ok(Self {
            output_root,
            generated_files: Vec::new(),
        })
    }

    /// Write `content` to `relative_path`, creating parent directories.
    ///
    /// The content goes to a hidden sibling first and is renamed into place,
    /// so an interrupted write never leaves a truncated source behind.
    pub fn write_source(&mut self, relative_path: &Path, content: &str) -> Result<PathBuf> {
        let file_path = self.output_root.join(relative_path);
        let staging = staging_path(&file_path)?;
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let written = write_synced(&staging, content).and_then(|()| fs::rename(&staging, &file_path));
        if let Err(e) = written {
            // The staging file may not exist if creating it failed
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }

        self.generated_files.push(relative_path.to_path_buf());
        Ok(file_path)
    }

    /// Relative paths written so far, in write order
    pub fn generated_files(&self) -> &[PathBuf] {
        &self.generated_files
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn file_exists(&self, relative_path: &Path) -> bool {
        self.output_root.join(relative_path).exists()
    }
}

/// `.<name>.tmp` next to `file_path`
fn staging_path(file_path: &Path) -> io::Result<PathBuf> {
    let file_name = file_path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a file path: {}", file_path.display()),
        )
    })?;
    Ok(file_path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy())))
}

fn write_synced(path: &Path, content: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}
