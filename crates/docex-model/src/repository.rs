//! Namespaces, types, methods and parameters.

use std::path::{Path, PathBuf};

use crate::documentation::Documentation;

/// Root of the documentation model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Repository {
    /// Namespaces in analyzer order.
    pub namespaces: Vec<Namespace>,
}

impl Repository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespaces.push(namespace);
        self
    }

    /// Iterate over namespaces in model order.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.iter()
    }

    /// Total number of types across all namespaces.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.types.len()).sum()
    }
}

/// A namespace and the types declared in it.
///
/// `fullname` is assumed unique within a repository; nothing checks it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Namespace {
    /// Fully qualified namespace name.
    pub fullname: String,
    /// Types in analyzer order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub types: Vec<TypeDecl>,
}

impl Namespace {
    /// Create an empty namespace.
    #[must_use]
    pub fn new(fullname: impl Into<String>) -> Self {
        Self {
            fullname: fullname.into(),
            types: Vec::new(),
        }
    }

    /// Append a type.
    #[must_use]
    pub fn with_type(mut self, type_decl: TypeDecl) -> Self {
        self.types.push(type_decl);
        self
    }
}

/// Reference to a type by name (return types, parameter types).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TypeRef {
    /// Type name as displayed.
    pub name: String,
}

impl TypeRef {
    /// Create a type reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A declared type (class, struct, interface, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TypeDecl {
    /// Fully qualified type name.
    pub fullname: String,
    /// Short type name.
    pub name: String,
    /// Path to the rendered class diagram image.
    #[cfg_attr(feature = "serde", serde(default))]
    pub class_diagram_path: Option<PathBuf>,
    /// Attached documentation, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub documentation: Option<Documentation>,
    /// Methods in analyzer order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub methods: Vec<Method>,
}

impl TypeDecl {
    /// Create an undocumented type without a diagram.
    #[must_use]
    pub fn new(fullname: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            fullname: fullname.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the class diagram path.
    #[must_use]
    pub fn with_diagram(mut self, path: impl Into<PathBuf>) -> Self {
        self.class_diagram_path = Some(path.into());
        self
    }

    /// Attach documentation.
    #[must_use]
    pub fn with_documentation(mut self, documentation: Documentation) -> Self {
        self.documentation = Some(documentation);
        self
    }

    /// Append a method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Class diagram path, treating an empty path as absent.
    #[must_use]
    pub fn diagram_path(&self) -> Option<&Path> {
        self.class_diagram_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// A method of a type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Method {
    /// Method name.
    pub name: String,
    /// Return type; absent for constructors and similar members.
    #[cfg_attr(feature = "serde", serde(default))]
    pub return_type: Option<TypeRef>,
    /// Preformatted signature text.
    #[cfg_attr(feature = "serde", serde(default))]
    pub syntax: String,
    /// Attached documentation, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub documentation: Option<Documentation>,
    /// Parameters in declaration order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parameters: Vec<Parameter>,
}

impl Method {
    /// Create an undocumented method without return type or parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, syntax: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            syntax: syntax.into(),
            ..Self::default()
        }
    }

    /// Set the return type name.
    #[must_use]
    pub fn with_return_type(mut self, name: impl Into<String>) -> Self {
        self.return_type = Some(TypeRef::new(name));
        self
    }

    /// Attach documentation.
    #[must_use]
    pub fn with_documentation(mut self, documentation: Documentation) -> Self {
        self.documentation = Some(documentation);
        self
    }

    /// Append a parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Return type name, if known.
    #[must_use]
    pub fn return_type_name(&self) -> Option<&str> {
        self.return_type.as_ref().map(|t| t.name.as_str())
    }

    /// Documentation tokens for one of this method's parameters.
    ///
    /// `None` when the method is undocumented or has no entry for `parameter`.
    #[must_use]
    pub fn param_doc(&self, parameter: &Parameter) -> Option<&[crate::Token]> {
        self.documentation.as_ref()?.param(&parameter.name)
    }
}

/// A method parameter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter type, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub param_type: Option<TypeRef>,
}

impl Parameter {
    /// Create an untyped parameter.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: None,
        }
    }

    /// Set the parameter type name.
    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        self.param_type = Some(TypeRef::new(name));
        self
    }

    /// Parameter type name, if known.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.param_type.as_ref().map(|t| t.name.as_str())
    }
}
