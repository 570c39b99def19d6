//! Export sequencing and progress reporting.

use std::fs;
use std::path::Path;

use docex_model::{Method, Namespace, Parameter, Repository, TypeDecl};
use docex_renderer::{Visitor, walk};

use crate::error::ExportError;
use crate::event::ExportObserver;
use crate::exporter::{ExportOptions, ExportReport, Exporter, create_exporter};

/// Runs exporters one after another over the same repository.
#[derive(Default)]
pub struct ExportCoordinator {
    exporters: Vec<Box<dyn Exporter>>,
}

impl ExportCoordinator {
    /// Create a coordinator without exporters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a coordinator for the named formats, in the given order.
    pub fn from_formats(formats: &[String], options: &ExportOptions) -> Result<Self, ExportError> {
        let exporters = formats
            .iter()
            .map(|format| create_exporter(format, options))
            .collect::<Result<_, _>>()?;
        Ok(Self { exporters })
    }

    /// Add an exporter.
    #[must_use]
    pub fn with_exporter(mut self, exporter: Box<dyn Exporter>) -> Self {
        self.exporters.push(exporter);
        self
    }

    /// Names of the registered exporters.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.exporters.iter().map(|e| e.name())
    }

    /// Run every exporter into `output_dir`.
    ///
    /// Stops at the first failing exporter; artifacts written by earlier
    /// exporters are kept.
    pub fn run(
        &self,
        repository: &Repository,
        output_dir: &Path,
        observer: &mut dyn ExportObserver,
    ) -> Result<Vec<ExportReport>, ExportError> {
        let mut reports = Vec::with_capacity(self.exporters.len());
        for exporter in &self.exporters {
            tracing::info!(
                exporter = exporter.name(),
                output = %output_dir.display(),
                "Starting export"
            );
            let report = exporter.export(repository, output_dir, observer)?;
            tracing::info!(
                exporter = exporter.name(),
                artifact = %report.artifact.display(),
                assets = report.assets.len(),
                "Export finished"
            );
            reports.push(report);
        }
        Ok(reports)
    }
}

/// Walk `repository` with `visitor`, reporting one step and one progress
/// value per namespace, and return the visitor for finishing.
pub(crate) fn drive<V, O>(
    repository: &Repository,
    visitor: V,
    observer: &mut O,
) -> Result<V, V::Error>
where
    V: Visitor,
    O: ExportObserver + ?Sized,
{
    let mut tracked = Tracked {
        inner: visitor,
        observer,
        total: repository.namespaces.len(),
        done: 0,
    };
    walk(repository, &mut tracked)?;
    Ok(tracked.inner)
}

/// Write the final artifact, creating the output directory if needed.
pub(crate) fn persist(path: &Path, contents: &str) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| ExportError::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote artifact");
    Ok(())
}

/// Percentage of `done` out of `total`; an empty total counts as complete.
fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    u8::try_from(done.min(total) * 100 / total).unwrap_or(100)
}

/// Visitor wrapper emitting progress around the wrapped visitor.
struct Tracked<'o, V, O: ?Sized> {
    inner: V,
    observer: &'o mut O,
    total: usize,
    done: usize,
}

impl<V: Visitor, O: ExportObserver + ?Sized> Visitor for Tracked<'_, V, O> {
    type Error = V::Error;

    fn enter_namespace(&mut self, namespace: &Namespace) -> Result<(), V::Error> {
        self.observer
            .step(format!("Exporting namespace {}", namespace.fullname));
        self.inner.enter_namespace(namespace)
    }

    fn leave_namespace(&mut self, namespace: &Namespace) -> Result<(), V::Error> {
        self.inner.leave_namespace(namespace)?;
        self.done += 1;
        self.observer.progress(percent(self.done, self.total));
        Ok(())
    }

    fn enter_type(&mut self, type_decl: &TypeDecl) -> Result<(), V::Error> {
        self.inner.enter_type(type_decl)
    }

    fn leave_type(&mut self, type_decl: &TypeDecl) -> Result<(), V::Error> {
        self.inner.leave_type(type_decl)
    }

    fn enter_method(&mut self, method: &Method) -> Result<(), V::Error> {
        self.inner.enter_method(method)
    }

    fn leave_method(&mut self, method: &Method) -> Result<(), V::Error> {
        self.inner.leave_method(method)
    }

    fn parameter(&mut self, parameter: &Parameter, method: &Method) -> Result<(), V::Error> {
        self.inner.parameter(parameter, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ExportEvent;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[derive(Default)]
    struct CountTypes(usize);

    impl Visitor for CountTypes {
        type Error = ();

        fn enter_type(&mut self, _type_decl: &TypeDecl) -> Result<(), ()> {
            self.0 += 1;
            Ok(())
        }
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 0), 100);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 66);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(5, 3), 100);
    }

    #[test]
    fn test_drive_reports_per_namespace() {
        let repo = Repository::new()
            .with_namespace(Namespace::new("A").with_type(TypeDecl::new("A.X", "X")))
            .with_namespace(Namespace::new("B"))
            .with_namespace(Namespace::new("C").with_type(TypeDecl::new("C.Y", "Y")))
            .with_namespace(Namespace::new("D"));
        let mut events = Vec::new();

        let counted = drive(&repo, CountTypes::default(), &mut |e: ExportEvent| {
            events.push(e);
        })
        .unwrap();

        assert_eq!(counted.0, 2);
        assert_eq!(
            events,
            [
                ExportEvent::Step("Exporting namespace A".to_owned()),
                ExportEvent::Progress(25),
                ExportEvent::Step("Exporting namespace B".to_owned()),
                ExportEvent::Progress(50),
                ExportEvent::Step("Exporting namespace C".to_owned()),
                ExportEvent::Progress(75),
                ExportEvent::Step("Exporting namespace D".to_owned()),
                ExportEvent::Progress(100),
            ]
        );
    }

    #[test]
    fn test_persist_creates_output_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/out/project.xml");

        persist(&path, "<assembly/>").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<assembly/>");
    }

    #[test]
    fn test_persist_error_names_path() {
        let tmp = TempDir::new().unwrap();
        // A regular file where the output directory should be.
        let blocker = tmp.path().join("out");
        fs::write(&blocker, "").unwrap();

        let err = persist(&blocker.join("project.xml"), "x").unwrap_err();
        assert!(matches!(err, ExportError::Io { ref path, .. } if *path == blocker));
    }

    #[test]
    fn test_run_all_formats() {
        let tmp = TempDir::new().unwrap();
        let repo = Repository::new().with_namespace(Namespace::new("Demo"));
        let formats = vec!["xml".to_owned(), "latex".to_owned()];
        let coordinator =
            ExportCoordinator::from_formats(&formats, &ExportOptions::default()).unwrap();

        let reports = coordinator
            .run(&repo, tmp.path(), &mut crate::NullObserver)
            .unwrap();

        assert_eq!(coordinator.names().collect::<Vec<_>>(), ["xml", "latex"]);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].artifact, tmp.path().join("project.xml"));
        assert_eq!(reports[1].artifact, tmp.path().join("project.tex"));
        assert!(tmp.path().join("project.xml").is_file());
        assert!(tmp.path().join("project.tex").is_file());
    }

    #[test]
    fn test_from_formats_unknown() {
        let formats = vec!["xml".to_owned(), "html".to_owned()];
        let result = ExportCoordinator::from_formats(&formats, &ExportOptions::default());
        assert!(matches!(result, Err(ExportError::UnknownFormat(ref f)) if f == "html"));
    }
}
