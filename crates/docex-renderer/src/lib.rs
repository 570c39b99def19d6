//! Model walker, node builder and renderers for docex.
//!
//! This crate turns a [`docex_model::Repository`] into output documents
//! without touching the filesystem.
//!
//! # Architecture
//!
//! - [`walk`] visits the model depth-first in model order and drives a
//!   [`Visitor`].
//! - [`NodeBuilder`] is the capability set renderers use to build an output
//!   tree: containers, attributes and literal text blocks. [`XmlBuilder`]
//!   builds [`XmlNode`] trees that [`XmlSerializer`] writes out.
//! - [`TreeRenderer`] is the visitor producing the `assembly` tree.
//! - [`LatexRenderer`] is the visitor producing the LaTeX document.
//!
//! Diagram images are placed by an [`AssetPlacer`]; the renderer only records
//! the name the placer returns. [`BaseNamePlacer`] places nothing and is what
//! in-memory rendering uses.
//!
//! # Example
//!
//! ```
//! use docex_model::{Method, Namespace, Parameter, Repository, TypeDecl};
//! use docex_renderer::render_xml_string;
//!
//! let repo = Repository::new().with_namespace(
//!     Namespace::new("Demo").with_type(
//!         TypeDecl::new("Demo.Widget", "Widget")
//!             .with_diagram("/tmp/w.png")
//!             .with_method(
//!                 Method::new("Resize", "void Resize(int x)")
//!                     .with_return_type("Void")
//!                     .with_parameter(Parameter::new("x").with_type("Int32")),
//!             ),
//!     ),
//! );
//!
//! let xml = render_xml_string(&repo);
//! assert!(xml.starts_with(r#"<assembly><namespace name="Demo">"#));
//! ```

mod builder;
mod latex;
mod tree;
mod walker;
mod xml;

pub use builder::NodeBuilder;
pub use latex::{LatexRenderer, escape_latex};
pub use tree::{AssetPlacer, BaseNamePlacer, TreeRenderer, render_xml, render_xml_string};
pub use walker::{Visitor, walk};
pub use xml::{XmlBuilder, XmlContent, XmlNode, XmlSerializer};
