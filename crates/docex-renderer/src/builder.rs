//! Node builder trait for format-specific tree construction.
//!
//! This trait abstracts how an output format represents containers,
//! attributes and literal text, so renderers can be generic over the format.

/// Capability set for constructing an output tree.
///
/// Builders hand out owned nodes; a child is attached to its parent with
/// [`append`](Self::append) once it is complete, so the finished tree has a
/// single owner.
pub trait NodeBuilder {
    /// Node type of the output tree.
    type Node;

    /// Create an empty container named `tag`.
    fn container(&self, tag: &str) -> Self::Node;

    /// Set attribute `name` on `node`.
    ///
    /// An absent value is written as an empty string; the attribute itself is
    /// always present.
    fn attribute(&self, node: &mut Self::Node, name: &str, value: Option<&str>);

    /// Add a child container `tag` to `node` holding `text` as a literal.
    ///
    /// The text is carried verbatim, even when it contains characters that
    /// are significant to the output format.
    fn text_block(&self, node: &mut Self::Node, tag: &str, text: &str);

    /// Attach a finished `child` to `parent`.
    fn append(&self, parent: &mut Self::Node, child: Self::Node);
}
