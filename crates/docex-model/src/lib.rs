//! Code documentation model consumed by the docex exporters.
//!
//! The model is a read-only tree produced by an external analyzer:
//!
//! ```text
//! Repository
//! +-- Namespace            (fullname)
//!     +-- TypeDecl         (fullname, name, class diagram, documentation?)
//!         +-- Method       (name, return type, syntax, documentation?)
//!             +-- Parameter (name, parameter type)
//! ```
//!
//! Every sequence keeps the order in which the analyzer produced it; renderers
//! rely on that order and never sort.
//!
//! Documentation is optional at two levels: a type or method may carry no
//! [`Documentation`] at all, and each section inside a block
//! ([`Section::Summary`], [`Section::Remarks`], ...) may be absent on its own.
//!
//! # Example
//!
//! ```
//! use docex_model::{Method, Namespace, Parameter, Repository, TypeDecl};
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
//! assert_eq!(repo.namespaces[0].types[0].methods[0].parameters.len(), 1);
//! ```
//!
//! With the `serde` feature enabled the whole tree can be loaded from JSON.

mod documentation;
mod repository;

pub use documentation::{Documentation, ParamDoc, Section, Token, join_tokens};
pub use repository::{Method, Namespace, Parameter, Repository, TypeDecl, TypeRef};
