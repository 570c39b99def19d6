//! LaTeX exporter.

use std::path::Path;

use docex_model::Repository;
use docex_renderer::LatexRenderer;

use crate::coordinator::{drive, persist};
use crate::error::ExportError;
use crate::event::ExportObserver;
use crate::exporter::{ExportOptions, ExportReport, Exporter};

/// Writes a LaTeX book listing the repository's namespaces.
///
/// Diagrams are not copied.
#[derive(Clone, Debug, Default)]
pub struct LatexExporter {
    options: ExportOptions,
}

impl LatexExporter {
    /// Create an exporter with the given options.
    #[must_use]
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }
}

impl Exporter for LatexExporter {
    fn name(&self) -> &str {
        "latex"
    }

    fn export(
        &self,
        repository: &Repository,
        output_dir: &Path,
        observer: &mut dyn ExportObserver,
    ) -> Result<ExportReport, ExportError> {
        let renderer = LatexRenderer::new(&self.options.latex_title, &self.options.latex_author);
        let document = match drive(repository, renderer, &mut *observer) {
            Ok(renderer) => renderer.finish(),
            Err(never) => match never {},
        };

        let artifact = output_dir.join(&self.options.latex_file_name);
        observer.step(format!("Writing {}", self.options.latex_file_name));
        persist(&artifact, &document)?;
        observer.progress(100);

        Ok(ExportReport {
            exporter: self.name().to_owned(),
            artifact,
            assets: Vec::new(),
            namespaces: repository.namespaces.len(),
        })
    }
}
