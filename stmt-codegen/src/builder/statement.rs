//! Entry point for building one top-level statement.

use std::{fmt, str::FromStr};

use stmtgen_meta::{TypeProvider, TypeRef};

use super::{
    Expression, ObjectBuilder, Scope, Value,
    value::{coerce, coerce_to},
};
use crate::{Error, Result};

/// Owns the scope of a single top-level statement and hands out
/// construction builders for named types.
///
/// Builders created here start with a copy of the statement's variables in
/// addition to the target type's fields. Variables they declare stay
/// private to them.
///
/// # Example
///
/// ```
/// use stmtgen_codegen::builder::StatementBuilder;
/// use stmtgen_meta::{TypeRef, TypeRegistry};
///
/// let types = TypeRegistry::with_builtins();
/// let stmt = StatementBuilder::new(&types)
///     .add_typed_variable("n", TypeRef::int(), "3")
///     .unwrap();
///
/// let mut array = stmt
///     .new_sized_array("int", 2)
///     .unwrap()
///     .initialize([stmt.load_variable("n").unwrap()])
///     .unwrap();
/// assert_eq!(array.render().unwrap(), "new int[2] {\nn\n}");
/// ```
pub struct StatementBuilder<'t> {
    types: &'t dyn TypeProvider,
    scope: Scope,
}

impl fmt::Debug for StatementBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatementBuilder")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl<'t> StatementBuilder<'t> {
    /// Start a statement with an empty scope.
    pub fn new(types: &'t dyn TypeProvider) -> Self {
        Self {
            types,
            scope: Scope::new(),
        }
    }

    /// Declare a variable with the value's own type.
    pub fn add_variable(mut self, name: impl Into<String>, value: impl Into<Value<'t>>) -> Result<Self> {
        let expr = coerce(self.types, &self.scope, value.into())?;
        self.scope.declare(name, expr.ty(), Some(expr))?;
        Ok(self)
    }

    /// Declare a variable with an explicit type.
    pub fn add_typed_variable(
        mut self,
        name: impl Into<String>,
        ty: TypeRef,
        value: impl Into<Value<'t>>,
    ) -> Result<Self> {
        let expr = coerce_to(self.types, &self.scope, value.into(), &ty)?;
        self.scope.declare(name, ty, Some(expr))?;
        Ok(self)
    }

    /// Reference a declared variable.
    pub fn load_variable(&self, name: &str) -> Result<Expression> {
        self.scope.reference(name)
    }

    /// A class literal for a named type.
    pub fn load_class(&self, name: &str) -> Result<Expression> {
        self.resolve_type(name).map(Expression::class_literal)
    }

    /// Start building an instance of a named type.
    pub fn new_object(&self, name: &str) -> Result<ObjectBuilder<'t>> {
        let descriptor = self
            .types
            .descriptor(name)
            .ok_or_else(|| Error::unknown_type(name))?;
        Ok(ObjectBuilder::instance_in(
            self.types,
            descriptor,
            self.scope.clone(),
        ))
    }

    /// Start building an unsized array of a named element type.
    pub fn new_array(&self, element: &str) -> Result<ObjectBuilder<'t>> {
        let element = self.resolve_type(element)?;
        Ok(ObjectBuilder::new_array_of(self.types, element).in_scope(self.scope.clone()))
    }

    /// Start building a fixed-length array of a named element type.
    pub fn new_sized_array(&self, element: &str, length: usize) -> Result<ObjectBuilder<'t>> {
        let element = self.resolve_type(element)?;
        Ok(ObjectBuilder::new_sized_array_of(self.types, element, length).in_scope(self.scope.clone()))
    }

    /// Parse a type spelling and check that its class part is known.
    ///
    /// Primitives and arrays are accepted (`int`, `java.lang.String[]`).
    pub fn resolve_type(&self, name: &str) -> Result<TypeRef> {
        let ty = TypeRef::from_str(name).map_err(|_| Error::unknown_type(name))?;

        let mut base = &ty;
        while let Some(element) = base.element_type() {
            base = element;
        }
        if let Some(class) = base.class_name() {
            if self.types.descriptor(class).is_none() {
                return Err(Error::unknown_type(class));
            }
        }
        Ok(ty)
    }

    /// The statement's scope.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Consume the statement, keeping its scope.
    pub fn into_scope(self) -> Scope {
        self.scope
    }
}

#[cfg(test)]
mod tests {
    use stmtgen_meta::{ClassSpec, TypeRegistry};

    use super::*;

    fn registry() -> TypeRegistry {
        TypeRegistry::with_builtins()
            .with(ClassSpec::class("com.example.Box").constructor([TypeRef::object()]))
    }

    #[test]
    fn test_unknown_type() {
        let types = registry();
        let stmt = StatementBuilder::new(&types);

        let err = stmt.new_object("com.example.Missing").unwrap_err();
        assert_eq!(err.to_string(), "unknown type 'com.example.Missing'");
        assert!(stmt.new_array("com.example.Missing[]").is_err());
        assert!(stmt.resolve_type("not a type").is_err());
    }

    #[test]
    fn test_resolve_type() {
        let types = registry();
        let stmt = StatementBuilder::new(&types);

        assert_eq!(stmt.resolve_type("int").unwrap(), TypeRef::int());
        assert_eq!(
            stmt.resolve_type("com.example.Box[]").unwrap(),
            TypeRef::array(TypeRef::class("com.example.Box"))
        );
    }

    #[test]
    fn test_statement_variables_visible_to_builders() {
        let types = registry();
        let stmt = StatementBuilder::new(&types)
            .add_variable("label", "boxed")
            .unwrap();

        let mut builder = stmt
            .new_object("com.example.Box")
            .unwrap()
            .with_parameters([Value::var("label")])
            .unwrap();
        assert_eq!(builder.render().unwrap(), "new com.example.Box(label)");
    }

    #[test]
    fn test_builder_variables_stay_private() {
        let types = registry();
        let stmt = StatementBuilder::new(&types);

        let first = stmt
            .new_object("com.example.Box")
            .unwrap()
            .add_variable("inner", 1)
            .unwrap();
        assert!(first.reference("inner").is_ok());

        let second = stmt.new_object("com.example.Box").unwrap();
        let err = second.with_parameters([Value::var("inner")]).unwrap_err();
        assert!(matches!(*err, Error::UnresolvedReference { .. }));
        assert!(stmt.load_variable("inner").is_err());
    }

    #[test]
    fn test_load_class() {
        let types = registry();
        let stmt = StatementBuilder::new(&types);
        let expr = stmt.load_class("java.lang.String").unwrap();
        assert_eq!(expr.render(stmt.scope()).unwrap(), "java.lang.String.class");
    }

    #[test]
    fn test_into_scope() {
        let types = registry();
        let scope = StatementBuilder::new(&types)
            .add_typed_variable("n", TypeRef::class("java.lang.Integer"), "10")
            .unwrap()
            .into_scope();
        assert_eq!(scope.len(), 1);
    }
}
