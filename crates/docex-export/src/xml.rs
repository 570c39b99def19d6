//! XML exporter.

use std::path::Path;

use docex_model::Repository;
use docex_renderer::{TreeRenderer, XmlBuilder, XmlSerializer};

use crate::assets::AssetCopier;
use crate::coordinator::{drive, persist};
use crate::error::ExportError;
use crate::event::ExportObserver;
use crate::exporter::{ExportOptions, ExportReport, Exporter};

/// Writes the `assembly` document and copies class diagrams.
///
/// Diagrams are copied while the tree is built; the document itself is
/// written once after the whole repository was rendered, so a failed copy
/// never leaves a partial `project.xml` behind.
#[derive(Clone, Debug, Default)]
pub struct XmlExporter {
    options: ExportOptions,
}

impl XmlExporter {
    /// Create an exporter with the given options.
    #[must_use]
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }
}

impl Exporter for XmlExporter {
    fn name(&self) -> &str {
        "xml"
    }

    fn export(
        &self,
        repository: &Repository,
        output_dir: &Path,
        observer: &mut dyn ExportObserver,
    ) -> Result<ExportReport, ExportError> {
        let mut copier = AssetCopier::new(
            output_dir.join(&self.options.figures_dir),
            self.options.collision,
        );

        let renderer = TreeRenderer::new(XmlBuilder, &mut copier);
        let tree = drive(repository, renderer, &mut *observer)?.finish();
        let xml = XmlSerializer::new()
            .with_declaration(self.options.xml_declaration)
            .serialize(&tree);

        let artifact = output_dir.join(&self.options.xml_file_name);
        observer.step(format!("Writing {}", self.options.xml_file_name));
        persist(&artifact, &xml)?;
        observer.progress(100);

        Ok(ExportReport {
            exporter: self.name().to_owned(),
            artifact,
            assets: copier.into_copied(),
            namespaces: repository.namespaces.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ExportEvent, NullObserver};
    use docex_config::CollisionPolicy;
    use docex_model::{Method, Namespace, Parameter, TypeDecl};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const WIDGET_XML: &str = concat!(
        r#"<assembly><namespace name="Demo">"#,
        r#"<class fullname="Demo.Widget" name="Widget" diagram="w.png">"#,
        r#"<method name="Resize" returntype="Void">"#,
        "<syntax>void Resize(int x)</syntax>",
        r#"<parameter name="x" type="Int32"/>"#,
        "</method></class></namespace></assembly>",
    );

    fn widget_repo(diagram: &Path) -> Repository {
        Repository::new().with_namespace(
            Namespace::new("Demo").with_type(
                TypeDecl::new("Demo.Widget", "Widget")
                    .with_diagram(diagram)
                    .with_method(
                        Method::new("Resize", "void Resize(int x)")
                            .with_return_type("Void")
                            .with_parameter(Parameter::new("x").with_type("Int32")),
                    ),
            ),
        )
    }

    #[test]
    fn test_widget_export_end_to_end() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let diagram = src.path().join("w.png");
        let image: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
        fs::write(&diagram, image).unwrap();

        let report = XmlExporter::default()
            .export(&widget_repo(&diagram), out.path(), &mut NullObserver)
            .unwrap();

        assert_eq!(
            fs::read_to_string(out.path().join("project.xml")).unwrap(),
            WIDGET_XML
        );
        assert_eq!(fs::read(out.path().join("figures/w.png")).unwrap(), image);
        assert_eq!(
            report,
            ExportReport {
                exporter: "xml".to_owned(),
                artifact: out.path().join("project.xml"),
                assets: vec!["w.png".to_owned()],
                namespaces: 1,
            }
        );
    }

    #[test]
    fn test_events_in_order() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let diagram = src.path().join("w.png");
        fs::write(&diagram, b"img").unwrap();
        let repo = widget_repo(&diagram).with_namespace(Namespace::new("Other"));
        let mut events = Vec::new();

        XmlExporter::default()
            .export(&repo, out.path(), &mut |e: ExportEvent| events.push(e))
            .unwrap();

        assert_eq!(
            events,
            [
                ExportEvent::Step("Exporting namespace Demo".to_owned()),
                ExportEvent::Progress(50),
                ExportEvent::Step("Exporting namespace Other".to_owned()),
                ExportEvent::Progress(100),
                ExportEvent::Step("Writing project.xml".to_owned()),
                ExportEvent::Progress(100),
            ]
        );
    }

    #[test]
    fn test_empty_repository() {
        let out = TempDir::new().unwrap();
        let mut events = Vec::new();

        let report = XmlExporter::default()
            .export(&Repository::new(), out.path(), &mut |e: ExportEvent| {
                events.push(e);
            })
            .unwrap();

        assert_eq!(
            fs::read_to_string(&report.artifact).unwrap(),
            "<assembly/>"
        );
        assert!(report.assets.is_empty());
        assert!(!out.path().join("figures").exists());
        assert_eq!(events.last(), Some(&ExportEvent::Progress(100)));
    }

    #[test]
    fn test_missing_diagram_leaves_no_document() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let present = src.path().join("a.png");
        fs::write(&present, b"a").unwrap();
        let repo = Repository::new().with_namespace(
            Namespace::new("Demo")
                .with_type(TypeDecl::new("Demo.A", "A").with_diagram(&present))
                .with_type(TypeDecl::new("Demo.B", "B").with_diagram(src.path().join("b.png"))),
        );

        let err = XmlExporter::default()
            .export(&repo, out.path(), &mut NullObserver)
            .unwrap_err();

        assert!(matches!(err, ExportError::MissingDiagram(_)));
        assert!(!out.path().join("project.xml").exists());
        // Copies made before the failure are not rolled back.
        assert!(out.path().join("figures/a.png").is_file());
    }

    #[test]
    fn test_collision_reject_aborts() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let first = src.path().join("one/w.png");
        let second = src.path().join("two/w.png");
        for path in [&first, &second] {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"img").unwrap();
        }
        let repo = Repository::new().with_namespace(
            Namespace::new("Demo")
                .with_type(TypeDecl::new("Demo.A", "A").with_diagram(&first))
                .with_type(TypeDecl::new("Demo.B", "B").with_diagram(&second)),
        );
        let options = ExportOptions {
            collision: CollisionPolicy::Reject,
            ..ExportOptions::default()
        };

        let err = XmlExporter::new(options)
            .export(&repo, out.path(), &mut NullObserver)
            .unwrap_err();

        assert!(matches!(err, ExportError::AssetCollision { ref name, .. } if name == "w.png"));
    }

    #[test]
    fn test_declaration_and_custom_names() {
        let out = TempDir::new().unwrap();
        let options = ExportOptions {
            xml_declaration: true,
            xml_file_name: "api.xml".to_owned(),
            ..ExportOptions::default()
        };

        let report = XmlExporter::new(options)
            .export(
                &Repository::new().with_namespace(Namespace::new("Demo")),
                out.path(),
                &mut NullObserver,
            )
            .unwrap();

        assert_eq!(report.artifact, out.path().join("api.xml"));
        assert_eq!(
            fs::read_to_string(&report.artifact).unwrap(),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<assembly><namespace name=\"Demo\"/></assembly>"
        );
    }

    #[test]
    fn test_output_dir_is_created() {
        let out = TempDir::new().unwrap();
        let nested = out.path().join("a/b");

        let report = XmlExporter::default()
            .export(&Repository::new(), &nested, &mut NullObserver)
            .unwrap();

        assert_eq!(report.artifact, nested.join("project.xml"));
        assert!(report.artifact.is_file());
    }
}
