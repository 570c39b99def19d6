//! XML and LaTeX exporters for docex.
//!
//! An [`Exporter`] renders a [`docex_model::Repository`] into an output
//! directory:
//!
//! ```text
//! {output}/
//! +-- figures/           # one copy per type diagram (XML exporter)
//! |   +-- widget.png
//! +-- project.xml        # XmlExporter
//! +-- project.tex        # LatexExporter
//! ```
//!
//! Exporters report what they are doing through an [`ExportObserver`]:
//! step messages and a 0-100 progress value, delivered synchronously on the
//! calling thread. [`ExportCoordinator`] runs several exporters in sequence.
//!
//! Diagram copies happen while the model is walked and are not rolled back on
//! failure. The primary artifact is written once, after rendering succeeded.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use docex_export::{ExportOptions, Exporter, NullObserver, XmlExporter};
//! use docex_model::Repository;
//!
//! let exporter = XmlExporter::new(ExportOptions::default());
//! let report = exporter
//!     .export(&Repository::new(), Path::new("build/docs"), &mut NullObserver)
//!     .unwrap();
//! assert_eq!(report.namespaces, 0);
//! ```

mod assets;
mod coordinator;
mod error;
mod event;
mod exporter;
mod latex;
mod xml;

pub use assets::AssetCopier;
pub use coordinator::ExportCoordinator;
pub use docex_config::CollisionPolicy;
pub use error::ExportError;
pub use event::{ChannelObserver, ExportEvent, ExportObserver, NullObserver};
pub use exporter::{EXPORTER_NAMES, ExportOptions, ExportReport, Exporter, create_exporter};
pub use latex::LatexExporter;
pub use xml::XmlExporter;
