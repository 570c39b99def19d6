//! `docex export` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use docex_config::{CliSettings, Config};
use docex_export::{
    CollisionPolicy, EXPORTER_NAMES, ExportCoordinator, ExportEvent, ExportOptions,
};

use crate::error::CliError;
use crate::model::load_model;
use crate::output::Output;

/// Output format selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum FormatArg {
    Xml,
    Latex,
    All,
}

impl FormatArg {
    fn formats(self) -> Vec<String> {
        match self {
            Self::Xml => vec!["xml".to_owned()],
            Self::Latex => vec!["latex".to_owned()],
            Self::All => EXPORTER_NAMES.iter().map(|&name| name.to_owned()).collect(),
        }
    }
}

/// Diagram file name collision handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum CollisionArg {
    /// The diagram copied last wins.
    Overwrite,
    /// Abort the export.
    Reject,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Overwrite => Self::Overwrite,
            CollisionArg::Reject => Self::Reject,
        }
    }
}

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Documentation model (JSON).
    #[arg(short, long)]
    model: PathBuf,

    /// Output directory (overrides config, default: build/docex/).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Format to export (overrides config, default: all).
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Diagram file name collision handling (overrides config).
    #[arg(long, value_enum)]
    collision: Option<CollisionArg>,

    /// Path to configuration file (default: auto-discover docex.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ExportArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output,
            formats: self.format.map(FormatArg::formats),
            collision: self.collision.map(Into::into),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let repository = load_model(&self.model)?;
        let output_dir = &config.output_resolved.dir;

        output.info(&format!("Model: {}", self.model.display()));
        output.info(&format!("Output: {}", output_dir.display()));

        let coordinator = ExportCoordinator::from_formats(
            &config.output_resolved.formats,
            &ExportOptions::from_config(&config),
        )?;

        let mut observer = |event: ExportEvent| match event {
            ExportEvent::Step(message) => output.step(&message),
            ExportEvent::Progress(percent) => tracing::debug!(percent, "Export progress"),
        };
        let reports = coordinator.run(&repository, output_dir, &mut observer)?;

        for report in &reports {
            output.success(&format!(
                "{}: wrote {}",
                report.exporter,
                report.artifact.display()
            ));
            if !report.assets.is_empty() {
                output.highlight(&format!("  {} diagram(s) copied", report.assets.len()));
            }
        }
        Ok(())
    }
}
