//! XML element tree, its [`NodeBuilder`] and serializer with CDATA support.

use crate::builder::NodeBuilder;

/// XML declaration written when [`XmlSerializer::with_declaration`] is enabled.
const DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Content of an XML element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XmlContent {
    /// Nested element.
    Element(XmlNode),
    /// Literal text, written verbatim (inside CDATA when needed).
    Literal(String),
}

/// XML element with ordered attributes and children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Element tag name.
    pub tag: String,
    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,
    /// Child elements and literal text.
    pub children: Vec<XmlContent>,
}

impl XmlNode {
    /// Create an element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set an attribute, replacing the value of an existing one in place.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name.to_owned(), value)),
        }
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over child elements, skipping literal text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter().filter_map(|child| match child {
            XmlContent::Element(node) => Some(node),
            XmlContent::Literal(_) => None,
        })
    }

    /// Iterate over child elements named `tag`.
    pub fn elements_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.elements().filter(move |node| node.tag == tag)
    }

    /// Concatenated literal text directly inside this element.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlContent::Literal(text) => Some(text.as_str()),
                XmlContent::Element(_) => None,
            })
            .collect()
    }
}

/// [`NodeBuilder`] producing [`XmlNode`] trees.
#[derive(Clone, Copy, Debug, Default)]
pub struct XmlBuilder;

impl NodeBuilder for XmlBuilder {
    type Node = XmlNode;

    fn container(&self, tag: &str) -> XmlNode {
        XmlNode::new(tag)
    }

    fn attribute(&self, node: &mut XmlNode, name: &str, value: Option<&str>) {
        node.set_attr(name, value.unwrap_or_default());
    }

    fn text_block(&self, node: &mut XmlNode, tag: &str, text: &str) {
        let mut child = XmlNode::new(tag);
        child.children.push(XmlContent::Literal(text.to_owned()));
        node.children.push(XmlContent::Element(child));
    }

    fn append(&self, parent: &mut XmlNode, child: XmlNode) {
        parent.children.push(XmlContent::Element(child));
    }
}

/// Serialize [`XmlNode`] trees to compact XML text.
///
/// Elements without content are self-closing. Literal text containing `<`,
/// `>` or `&` is written as a CDATA section, so it reaches the reader
/// unchanged; other literal text needs no escaping and is written as is.
#[derive(Clone, Copy, Debug, Default)]
pub struct XmlSerializer {
    declaration: bool,
}

impl XmlSerializer {
    /// Create a serializer that writes no XML declaration.
    #[must_use]
    pub fn new() -> Self {
        Self { declaration: false }
    }

    /// Enable or disable the leading `<?xml ...?>` declaration.
    #[must_use]
    pub fn with_declaration(mut self, enabled: bool) -> Self {
        self.declaration = enabled;
        self
    }

    /// Serialize `root` and everything below it.
    #[must_use]
    pub fn serialize(&self, root: &XmlNode) -> String {
        let mut out = String::with_capacity(4096);
        if self.declaration {
            out.push_str(DECLARATION);
            out.push('\n');
        }
        serialize_node(root, &mut out);
        out
    }
}

/// Serialize a single node recursively.
fn serialize_node(node: &XmlNode, out: &mut String) {
    out.push('<');
    out.push_str(&node.tag);

    for (key, value) in &node.attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }

    if node.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &node.children {
        match child {
            XmlContent::Element(element) => serialize_node(element, out),
            XmlContent::Literal(text) => write_literal(text, out),
        }
    }
    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
}

/// Write literal text, wrapping it in CDATA when it holds markup characters.
fn write_literal(text: &str, out: &mut String) {
    if !text.contains(['<', '>', '&']) {
        out.push_str(text);
        return;
    }
    // "]]>" cannot appear inside a CDATA section; split it across two.
    out.push_str("<![CDATA[");
    out.push_str(&text.replace("]]>", "]]]]><![CDATA[>"));
    out.push_str("]]>");
}

/// Escape XML special characters for attribute values.
fn escape_attr(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            _ => result.push(ch),
        }
    }
    result
}
