//! Depth-first traversal of the documentation model.
//!
//! The walker performs no sorting, deduplication or filtering: callbacks
//! arrive in exactly the order the [`Repository`] stores its children.

use docex_model::{Method, Namespace, Parameter, Repository, TypeDecl};

/// Callbacks invoked by [`walk`].
///
/// All hooks default to doing nothing, so a visitor only implements the
/// levels it cares about. Returning an error stops the walk immediately.
pub trait Visitor {
    /// Error that aborts the walk.
    type Error;

    /// Called before the types of `namespace` are visited.
    fn enter_namespace(&mut self, _namespace: &Namespace) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after the types of `namespace` were visited.
    fn leave_namespace(&mut self, _namespace: &Namespace) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called before the methods of `type_decl` are visited.
    fn enter_type(&mut self, _type_decl: &TypeDecl) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after the methods of `type_decl` were visited.
    fn leave_type(&mut self, _type_decl: &TypeDecl) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called before the parameters of `method` are visited.
    fn enter_method(&mut self, _method: &Method) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after the parameters of `method` were visited.
    fn leave_method(&mut self, _method: &Method) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once per parameter, together with the method that owns it.
    fn parameter(&mut self, _parameter: &Parameter, _method: &Method) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Walk `repository` depth-first, calling `visitor` at every level.
pub fn walk<V: Visitor + ?Sized>(repository: &Repository, visitor: &mut V) -> Result<(), V::Error> {
    for namespace in repository.namespaces() {
        visitor.enter_namespace(namespace)?;
        for type_decl in &namespace.types {
            visitor.enter_type(type_decl)?;
            for method in &type_decl.methods {
                visitor.enter_method(method)?;
                for parameter in &method.parameters {
                    visitor.parameter(parameter, method)?;
                }
                visitor.leave_method(method)?;
            }
            visitor.leave_type(type_decl)?;
        }
        visitor.leave_namespace(namespace)?;
    }
    Ok(())
}
