//! Lexical scope of named variables.
//!
//! A [`Scope`] is created per top-level statement (or per construction
//! builder) and never chains to a parent. Names are unique within a scope.

use indexmap::IndexMap;
use stmtgen_meta::{FieldSpec, TypeRef};
use tracing::trace;

use super::Expression;
use crate::{Error, Result};

/// A named variable with its declared type and optional bound value.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    ty: TypeRef,
    value: Option<Expression>,
}

impl Variable {
    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// Bound value, if the variable was declared with one.
    pub fn value(&self) -> Option<&Expression> {
        self.value.as_ref()
    }

    /// An expression referencing this variable.
    pub fn reference(&self) -> Expression {
        Expression::variable(&self.name, self.ty.clone())
    }
}

/// Mapping from variable name to declared type, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    vars: IndexMap<String, Variable>,
}

impl Scope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scope seeded with one variable per field.
    ///
    /// Later fields with an already seen name are skipped.
    pub fn with_fields(fields: &[FieldSpec]) -> Self {
        let mut scope = Self::new();
        for field in fields {
            scope
                .vars
                .entry(field.name.clone())
                .or_insert_with(|| Variable {
                    name: field.name.clone(),
                    ty: field.ty.clone(),
                    value: None,
                });
        }
        scope
    }

    /// Declare a variable with no value unless `name` is already taken.
    ///
    /// Returns `true` when the variable was added.
    pub fn declare_if_absent(&mut self, name: impl Into<String>, ty: TypeRef) -> bool {
        let name = name.into();
        let mut added = false;
        self.vars.entry(name.clone()).or_insert_with(|| {
            added = true;
            Variable {
                name,
                ty,
                value: None,
            }
        });
        added
    }

    /// Declare a variable.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        ty: TypeRef,
        value: Option<Expression>,
    ) -> Result<&Variable> {
        let name = name.into();
        if self.vars.contains_key(&name) {
            return Err(Error::duplicate_declaration(name));
        }

        trace!(name = %name, ty = %ty, "declare variable");
        let entry = self.vars.entry(name.clone()).or_insert(Variable {
            name,
            ty,
            value,
        });
        Ok(entry)
    }

    /// Resolve a variable by name.
    pub fn resolve(&self, name: &str) -> Result<&Variable> {
        self.vars
            .get(name)
            .ok_or_else(|| Error::unresolved_reference(name))
    }

    /// Resolve a variable and return a reference expression to it.
    pub fn reference(&self, name: &str) -> Result<Expression> {
        self.resolve(name).map(Variable::reference)
    }

    /// Check if a name is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Number of declared variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if the scope is empty.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate over variables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_resolve() {
        let mut scope = Scope::new();
        scope.declare("n", TypeRef::int(), None).unwrap();

        let n = scope.resolve("n").unwrap();
        assert_eq!(n.name(), "n");
        assert_eq!(n.ty(), &TypeRef::int());
        assert!(n.value().is_none());
    }

    #[test]
    fn test_duplicate_declaration() {
        let mut scope = Scope::new();
        scope.declare("n", TypeRef::int(), None).unwrap();

        let err = scope.declare("n", TypeRef::string(), None).unwrap_err();
        assert!(matches!(*err, Error::DuplicateDeclaration { ref name } if name == "n"));
        assert_eq!(scope.resolve("n").unwrap().ty(), &TypeRef::int());
    }

    #[test]
    fn test_unresolved_reference() {
        let scope = Scope::new();
        let err = scope.reference("missing").unwrap_err();
        assert!(matches!(*err, Error::UnresolvedReference { ref name } if name == "missing"));
    }

    #[test]
    fn test_with_fields_keeps_first() {
        let fields = vec![
            FieldSpec::new("x", TypeRef::int()),
            FieldSpec::new("label", TypeRef::string()),
            FieldSpec::new("x", TypeRef::long()),
        ];
        let scope = Scope::with_fields(&fields);

        assert_eq!(scope.len(), 2);
        assert_eq!(scope.resolve("x").unwrap().ty(), &TypeRef::int());
        let names: Vec<_> = scope.iter().map(Variable::name).collect();
        assert_eq!(names, vec!["x", "label"]);
    }

    #[test]
    fn test_declare_if_absent_keeps_existing() {
        let mut scope = Scope::new();
        scope.declare("x", TypeRef::string(), None).unwrap();

        assert!(!scope.declare_if_absent("x", TypeRef::int()));
        assert!(scope.declare_if_absent("y", TypeRef::int()));
        assert_eq!(scope.resolve("x").unwrap().ty(), &TypeRef::string());
        assert_eq!(scope.resolve("y").unwrap().ty(), &TypeRef::int());
        assert_eq!(scope.len(), 2);
    }

    #[test]
    fn test_reference_carries_type() {
        let mut scope = Scope::new();
        scope.declare("s", TypeRef::string(), None).unwrap();

        let expr = scope.reference("s").unwrap();
        assert_eq!(expr.ty(), TypeRef::string());
    }
}
