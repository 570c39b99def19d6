//! Export error types.

use std::io;
use std::path::{Path, PathBuf};

/// Error that aborts an export.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExportError {
    /// Creating a directory or writing an artifact failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path being created or written.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// Copying a diagram into the output directory failed.
    #[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        /// Diagram source.
        from: PathBuf,
        /// Copy destination.
        to: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// A type references a diagram file that does not exist.
    #[error("diagram not found: {}", .0.display())]
    MissingDiagram(PathBuf),

    /// A diagram path has no file name component (e.g. `/` or `..`).
    #[error("diagram path has no file name: {}", .0.display())]
    InvalidDiagramPath(PathBuf),

    /// Two different diagrams share a file name under the `reject` policy.
    #[error("diagram file name {name} is used by both {} and {}", .first.display(), .second.display())]
    AssetCollision {
        /// Shared file name.
        name: String,
        /// Diagram copied first.
        first: PathBuf,
        /// Diagram that would overwrite it.
        second: PathBuf,
    },

    /// No exporter is registered under this name.
    #[error("unknown format: {0}. Use xml or latex")]
    UnknownFormat(String),
}

impl ExportError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
