//! Renderer producing the `assembly` tree.
//!
//! Output schema:
//!
//! ```text
//! assembly
//! +-- namespace[name]
//!     +-- class[fullname, name, diagram]
//!         +-- summary?                          (type documented)
//!         +-- method[name, returntype]
//!             +-- syntax
//!             +-- summary? remarks? example? returns?
//!             +-- parameter[name, type]
//!                 +-- summary*                  (one per token)
//! ```

use std::convert::Infallible;

use docex_model::{Method, Namespace, Parameter, Repository, Section, TypeDecl, join_tokens};

use crate::builder::NodeBuilder;
use crate::walker::{Visitor, walk};
use crate::xml::{XmlBuilder, XmlNode, XmlSerializer};

/// Places a type's diagram image and names it for the `diagram` attribute.
pub trait AssetPlacer {
    /// Error that aborts rendering.
    type Error;

    /// Place the diagram of `type_decl`.
    ///
    /// Returns the name the output should reference, or `None` when the type
    /// has no diagram.
    fn place(&mut self, type_decl: &TypeDecl) -> Result<Option<String>, Self::Error>;
}

/// [`AssetPlacer`] that copies nothing and reports the diagram's base name.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaseNamePlacer;

impl AssetPlacer for BaseNamePlacer {
    type Error = Infallible;

    fn place(&mut self, type_decl: &TypeDecl) -> Result<Option<String>, Infallible> {
        Ok(type_decl
            .diagram_path()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned()))
    }
}

/// [`Visitor`] that builds the `assembly` tree with any [`NodeBuilder`].
///
/// Containers are opened on `enter_*` and attached to their parent on the
/// matching `leave_*`, so at any time `open` holds the path from the root to
/// the node currently being filled.
pub struct TreeRenderer<'p, B: NodeBuilder, P: AssetPlacer> {
    builder: B,
    placer: &'p mut P,
    root: B::Node,
    open: Vec<B::Node>,
}

impl<'p, B: NodeBuilder, P: AssetPlacer> TreeRenderer<'p, B, P> {
    /// Create a renderer with an empty `assembly` root.
    pub fn new(builder: B, placer: &'p mut P) -> Self {
        let root = builder.container("assembly");
        Self {
            builder,
            placer,
            root,
            open: Vec::new(),
        }
    }

    /// Finish rendering and return the root node.
    ///
    /// Containers still open (after an aborted walk) are attached first.
    pub fn finish(mut self) -> B::Node {
        while !self.open.is_empty() {
            self.close();
        }
        self.root
    }

    /// Attach `node` to the innermost open container.
    fn attach(&mut self, node: B::Node) {
        let parent = self.open.last_mut().unwrap_or(&mut self.root);
        self.builder.append(parent, node);
    }

    /// Close the innermost open container.
    fn close(&mut self) {
        if let Some(node) = self.open.pop() {
            self.attach(node);
        }
    }
}

impl<B: NodeBuilder, P: AssetPlacer> Visitor for TreeRenderer<'_, B, P> {
    type Error = P::Error;

    fn enter_namespace(&mut self, namespace: &Namespace) -> Result<(), P::Error> {
        let mut node = self.builder.container("namespace");
        self.builder
            .attribute(&mut node, "name", Some(&namespace.fullname));
        self.open.push(node);
        Ok(())
    }

    fn leave_namespace(&mut self, _namespace: &Namespace) -> Result<(), P::Error> {
        self.close();
        Ok(())
    }

    fn enter_type(&mut self, type_decl: &TypeDecl) -> Result<(), P::Error> {
        let diagram = self.placer.place(type_decl)?;

        let b = &self.builder;
        let mut node = b.container("class");
        b.attribute(&mut node, "fullname", Some(&type_decl.fullname));
        b.attribute(&mut node, "name", Some(&type_decl.name));
        b.attribute(&mut node, "diagram", diagram.as_deref());

        // A documented type always carries a summary, even an empty one.
        if let Some(doc) = &type_decl.documentation {
            let summary = doc.section(Section::Summary).unwrap_or_default();
            b.text_block(&mut node, "summary", &join_tokens(summary));
        }

        self.open.push(node);
        Ok(())
    }

    fn leave_type(&mut self, _type_decl: &TypeDecl) -> Result<(), P::Error> {
        self.close();
        Ok(())
    }

    fn enter_method(&mut self, method: &Method) -> Result<(), P::Error> {
        let b = &self.builder;
        let mut node = b.container("method");
        b.attribute(&mut node, "name", Some(&method.name));
        b.attribute(&mut node, "returntype", method.return_type_name());
        b.text_block(&mut node, "syntax", &method.syntax);

        if let Some(doc) = &method.documentation {
            for section in Section::ALL {
                if let Some(tokens) = doc.non_empty(section) {
                    b.text_block(&mut node, section.as_str(), &join_tokens(tokens));
                }
            }
        }

        self.open.push(node);
        Ok(())
    }

    fn leave_method(&mut self, _method: &Method) -> Result<(), P::Error> {
        self.close();
        Ok(())
    }

    fn parameter(&mut self, parameter: &Parameter, method: &Method) -> Result<(), P::Error> {
        let b = &self.builder;
        let mut node = b.container("parameter");
        b.attribute(&mut node, "name", Some(&parameter.name));
        b.attribute(&mut node, "type", parameter.type_name());

        for token in method.param_doc(parameter).unwrap_or_default() {
            b.text_block(&mut node, "summary", &token.text);
        }

        self.attach(node);
        Ok(())
    }
}

/// Render `repository` to an [`XmlNode`] tree, placing diagrams with `placer`.
pub fn render_xml<P: AssetPlacer>(
    repository: &Repository,
    placer: &mut P,
) -> Result<XmlNode, P::Error> {
    let mut renderer = TreeRenderer::new(XmlBuilder, placer);
    walk(repository, &mut renderer)?;
    Ok(renderer.finish())
}

/// Render `repository` to compact XML text without copying any diagrams.
#[must_use]
pub fn render_xml_string(repository: &Repository) -> String {
    let tree = match render_xml(repository, &mut BaseNamePlacer) {
        Ok(tree) => tree,
        Err(never) => match never {},
    };
    XmlSerializer::new().serialize(&tree)
}
