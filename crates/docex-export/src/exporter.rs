//! Exporter trait and registry.

use std::path::{Path, PathBuf};

use docex_config::{CollisionPolicy, Config};
use docex_model::Repository;

use crate::error::ExportError;
use crate::event::ExportObserver;
use crate::latex::LatexExporter;
use crate::xml::XmlExporter;

/// Names accepted by [`create_exporter`].
pub const EXPORTER_NAMES: &[&str] = &["xml", "latex"];

/// Renders a repository into an output directory.
pub trait Exporter {
    /// Human-readable exporter name.
    fn name(&self) -> &str;

    /// Export `repository` into `output_dir`.
    ///
    /// Step and progress notifications go to `observer`. Any I/O failure
    /// aborts the export; files copied before the failure stay on disk.
    fn export(
        &self,
        repository: &Repository,
        output_dir: &Path,
        observer: &mut dyn ExportObserver,
    ) -> Result<ExportReport, ExportError>;
}

/// Summary of a finished export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportReport {
    /// Name of the exporter that produced the report.
    pub exporter: String,
    /// Path of the written artifact.
    pub artifact: PathBuf,
    /// Diagram file names copied into the figures directory.
    pub assets: Vec<String>,
    /// Number of namespaces exported.
    pub namespaces: usize,
}

/// Settings shared by the exporters.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    /// Figures subdirectory of the output directory.
    pub figures_dir: String,
    /// Policy for diagrams sharing a file name.
    pub collision: CollisionPolicy,
    /// XML artifact file name.
    pub xml_file_name: String,
    /// Whether the XML artifact starts with an XML declaration.
    pub xml_declaration: bool,
    /// LaTeX artifact file name.
    pub latex_file_name: String,
    /// LaTeX document title.
    pub latex_title: String,
    /// LaTeX document author.
    pub latex_author: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            figures_dir: "figures".to_owned(),
            collision: CollisionPolicy::default(),
            xml_file_name: "project.xml".to_owned(),
            xml_declaration: false,
            latex_file_name: "project.tex".to_owned(),
            latex_title: "API Documentation".to_owned(),
            latex_author: "docex".to_owned(),
        }
    }
}

impl ExportOptions {
    /// Build options from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            figures_dir: config.output_resolved.figures_dir.clone(),
            collision: config.assets.collision,
            xml_file_name: config.xml.file_name.clone(),
            xml_declaration: config.xml.declaration,
            latex_file_name: config.latex.file_name.clone(),
            latex_title: config.latex.title.clone(),
            latex_author: config.latex.author.clone(),
        }
    }
}

/// Create an exporter for the given format name.
///
/// Names are matched case-insensitively; `tex` is accepted for `latex`.
pub fn create_exporter(
    format: &str,
    options: &ExportOptions,
) -> Result<Box<dyn Exporter>, ExportError> {
    match format.to_ascii_lowercase().as_str() {
        "xml" => Ok(Box::new(XmlExporter::new(options.clone()))),
        "latex" | "tex" => Ok(Box::new(LatexExporter::new(options.clone()))),
        _ => Err(ExportError::UnknownFormat(format.to_owned())),
    }
}
