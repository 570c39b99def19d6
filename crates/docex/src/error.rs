//! CLI error types.

use std::path::PathBuf;

use docex_config::ConfigError;
use docex_export::ExportError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("failed to read model {}: {source}", .path.display())]
    ModelIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid model {}: {source}", .path.display())]
    Model {
        path: PathBuf,
        source: serde_json::Error,
    },
}
