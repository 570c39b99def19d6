//! LaTeX document renderer.
//!
//! Produces a book-class document with a title page, a table of contents and
//! a single section listing every namespace. Types, methods and parameters
//! are not rendered yet.

use std::convert::Infallible;

use docex_model::{Namespace, Repository};

use crate::walker::{Visitor, walk};

/// Packages and page setup shared by every generated document.
const PACKAGES: &[&str] = &[
    r"\documentclass[11pt,a4paper]{book}",
    r"\usepackage[utf8]{inputenc}",
    r"\usepackage[english]{babel}",
    r"\usepackage{amsmath}",
    r"\usepackage{amsfonts}",
    r"\usepackage{amssymb}",
    r"\usepackage{graphicx}",
    r"\usepackage{lmodern}",
    r"\usepackage[left=2cm,right=2cm,top=2cm,bottom=2cm]{geometry}",
];

/// [`Visitor`] collecting the lines of a LaTeX document.
///
/// Lines are accumulated and joined once in [`finish`](Self::finish).
#[derive(Debug)]
pub struct LatexRenderer {
    title: String,
    author: String,
    namespaces: Vec<String>,
}

impl LatexRenderer {
    /// Create a renderer for a document with the given title and author.
    #[must_use]
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            namespaces: Vec::new(),
        }
    }

    /// Walk `repository` and return the complete document.
    #[must_use]
    pub fn render(mut self, repository: &Repository) -> String {
        match walk(repository, &mut self) {
            Ok(()) => self.finish(),
            Err(never) => match never {},
        }
    }

    /// Assemble the document from the namespaces visited so far.
    #[must_use]
    pub fn finish(self) -> String {
        let mut lines: Vec<String> = PACKAGES.iter().map(|&line| line.to_owned()).collect();
        lines.push(format!(r"\author{{{}}}", escape_latex(&self.author)));
        lines.push(String::new());
        lines.push(format!(r"\title{{{}}}", escape_latex(&self.title)));
        lines.push(String::new());
        lines.extend(
            [
                r"\begin{document}",
                r"\maketitle",
                r"\tableofcontents",
                r"\newpage",
                r"\section{Namespaces}",
            ]
            .map(str::to_owned),
        );

        // An itemize environment without items does not compile.
        if !self.namespaces.is_empty() {
            lines.push(r"\begin{itemize}".to_owned());
            lines.extend(self.namespaces.iter().map(|name| format!(r"\item {name}")));
            lines.push(r"\end{itemize}".to_owned());
        }

        lines.push(r"\end{document}".to_owned());

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl Visitor for LatexRenderer {
    type Error = Infallible;

    fn enter_namespace(&mut self, namespace: &Namespace) -> Result<(), Infallible> {
        self.namespaces.push(escape_latex(&namespace.fullname));
        Ok(())
    }
}

/// Escape characters with special meaning in LaTeX text.
#[must_use]
pub fn escape_latex(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => result.push_str(r"\textbackslash{}"),
            '~' => result.push_str(r"\textasciitilde{}"),
            '^' => result.push_str(r"\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                result.push('\\');
                result.push(ch);
            }
            _ => result.push(ch),
        }
    }
    result
}
