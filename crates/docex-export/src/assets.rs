//! Diagram asset copying.
//!
//! [`AssetCopier`] copies each type's class diagram into the figures
//! directory, keeping the file's base name, and hands that name back to the
//! renderer for the `diagram` attribute.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use docex_config::CollisionPolicy;
use docex_model::TypeDecl;
use docex_renderer::AssetPlacer;

use crate::error::ExportError;

/// Copies diagram images into a figures directory.
///
/// The directory is created on the first copy. Copying the same source twice
/// is a no-op; two different sources with the same file name are handled by
/// the [`CollisionPolicy`].
#[derive(Debug)]
pub struct AssetCopier {
    dir: PathBuf,
    policy: CollisionPolicy,
    /// File name -> source path of the diagram currently stored under it.
    placed: HashMap<String, PathBuf>,
    /// File names in first-copy order.
    copied: Vec<String>,
}

impl AssetCopier {
    /// Create a copier writing into `dir`.
    #[must_use]
    pub fn new(dir: PathBuf, policy: CollisionPolicy) -> Self {
        Self {
            dir,
            policy,
            placed: HashMap::new(),
            copied: Vec::new(),
        }
    }

    /// Target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy `source` into the figures directory and return its file name.
    pub fn copy(&mut self, source: &Path) -> Result<String, ExportError> {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ExportError::InvalidDiagramPath(source.to_path_buf()))?;

        if !source.is_file() {
            return Err(ExportError::MissingDiagram(source.to_path_buf()));
        }

        match self.placed.get(&name) {
            Some(previous) if previous == source => {
                tracing::debug!(name = %name, "Diagram already copied");
                return Ok(name);
            }
            Some(previous) => match self.policy {
                CollisionPolicy::Reject => {
                    return Err(ExportError::AssetCollision {
                        name,
                        first: previous.clone(),
                        second: source.to_path_buf(),
                    });
                }
                CollisionPolicy::Overwrite => {
                    tracing::warn!(
                        name = %name,
                        previous = %previous.display(),
                        source = %source.display(),
                        "Diagram file name collision, overwriting"
                    );
                }
            },
            None => {}
        }

        fs::create_dir_all(&self.dir).map_err(|e| ExportError::io(&self.dir, e))?;

        let target = self.dir.join(&name);
        // Copying a file onto itself would truncate it.
        if !is_same_file(source, &target) {
            fs::copy(source, &target).map_err(|e| ExportError::Copy {
                from: source.to_path_buf(),
                to: target.clone(),
                source: e,
            })?;
        }
        tracing::debug!(source = %source.display(), target = %target.display(), "Copied diagram");

        if self
            .placed
            .insert(name.clone(), source.to_path_buf())
            .is_none()
        {
            self.copied.push(name.clone());
        }
        Ok(name)
    }

    /// File names copied so far, in first-copy order.
    #[must_use]
    pub fn copied(&self) -> &[String] {
        &self.copied
    }

    /// Consume the copier and return the copied file names.
    #[must_use]
    pub fn into_copied(self) -> Vec<String> {
        self.copied
    }
}

impl AssetPlacer for AssetCopier {
    type Error = ExportError;

    fn place(&mut self, type_decl: &TypeDecl) -> Result<Option<String>, ExportError> {
        type_decl
            .diagram_path()
            .map(|path| self.copy(path))
            .transpose()
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
