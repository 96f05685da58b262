//! Caller-supplied values and their coercion into expressions.
//!
//! Builders accept anything convertible into a [`Value`]: plain Rust
//! scalars, variable names, ready expressions, or other builders that have
//! not been finalized yet. Coercion turns each of them into a typed
//! [`Expression`] and performs the assignability checks.

use stmtgen_meta::{TypeProvider, TypeRef, is_assignable};
use tracing::debug;

use super::{Expression, Literal, LiteralValue, ObjectBuilder, Scope};
use crate::{Error, Result};

/// A raw value of unknown provenance.
#[derive(Debug)]
pub enum Value<'t> {
    /// A literal scalar.
    Literal(LiteralValue),
    /// A variable name, resolved against the active scope.
    Variable(String),
    /// A ready expression, passed through unchanged.
    Expression(Expression),
    /// A builder to finalize and nest.
    Builder(Box<ObjectBuilder<'t>>),
    /// A value pinned to a declared type.
    Typed { ty: TypeRef, value: Box<Value<'t>> },
}

impl<'t> Value<'t> {
    /// Reference a variable by name.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Pin a value to a declared type.
    pub fn typed(ty: TypeRef, value: impl Into<Value<'t>>) -> Self {
        Self::Typed {
            ty,
            value: Box::new(value.into()),
        }
    }

    /// The `null` literal.
    pub fn null() -> Self {
        Self::Literal(LiteralValue::Null)
    }
}

macro_rules! value_from_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'t> From<$ty> for Value<'t> {
                fn from(v: $ty) -> Self {
                    Self::Literal(v.into())
                }
            }
        )*
    };
}

value_from_literal!(bool, i8, i16, char, i32, i64, f32, f64, String, &str, LiteralValue);

impl<'t> From<Literal> for Value<'t> {
    fn from(lit: Literal) -> Self {
        Self::Expression(lit.into())
    }
}

impl<'t> From<Expression> for Value<'t> {
    fn from(expr: Expression) -> Self {
        Self::Expression(expr)
    }
}

impl<'t> From<ObjectBuilder<'t>> for Value<'t> {
    fn from(builder: ObjectBuilder<'t>) -> Self {
        Self::Builder(Box::new(builder))
    }
}

/// Fail with an invalid type error unless `actual` can be used as `declared`.
pub fn assert_assignable(
    types: &dyn TypeProvider,
    actual: &TypeRef,
    declared: &TypeRef,
) -> Result<()> {
    if is_assignable(types, actual, declared) {
        Ok(())
    } else {
        Err(Error::invalid_type(actual.to_string(), declared.clone()))
    }
}

/// Convert a value into an expression.
///
/// Nested builders are finalized here, so they render before their parent.
pub fn coerce(types: &dyn TypeProvider, scope: &Scope, value: Value<'_>) -> Result<Expression> {
    match value {
        Value::Literal(v) => Ok(Expression::literal(v)),
        Value::Variable(name) => scope.reference(&name),
        Value::Expression(expr) => Ok(expr),
        Value::Builder(builder) => {
            debug!(ty = %builder.ty(), "finalizing nested builder");
            builder.finish()
        }
        Value::Typed { ty, value } => coerce_to(types, scope, *value, &ty),
    }
}

/// Convert a value whose type the caller pinned to `target`.
///
/// Text literals pinned to a primitive (or boxed primitive) type are parsed
/// under that type's rules; the parse failure becomes the error's source.
/// Literals otherwise take on the declared type once found assignable.
pub fn coerce_to(
    types: &dyn TypeProvider,
    scope: &Scope,
    value: Value<'_>,
    target: &TypeRef,
) -> Result<Expression> {
    if let Value::Literal(LiteralValue::String(text)) = &value {
        if let Some(primitive) = target.unboxed() {
            let parsed = LiteralValue::parse_as(text, primitive)
                .map_err(|e| Error::invalid_literal(text, target.clone(), e))?;
            return Ok(Literal::typed(parsed, target.clone()).into());
        }
    }

    coerce_assignable(types, scope, value, target)
}

/// Convert a value and check it against `target` without reinterpreting it.
///
/// Text stays text, so `"1"` is rejected where an `int` is expected.
/// Literals that pass take on the declared type.
pub fn coerce_assignable(
    types: &dyn TypeProvider,
    scope: &Scope,
    value: Value<'_>,
    target: &TypeRef,
) -> Result<Expression> {
    let expr = coerce(types, scope, value)?;
    assert_assignable(types, &expr.ty(), target)?;

    Ok(match expr {
        Expression::Literal(lit) => Literal::typed(lit.value().clone(), target.clone()).into(),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use stmtgen_meta::{ClassSpec, TypeRegistry};

    use super::*;
    use crate::error::LiteralParseError;

    fn integer() -> TypeRef {
        TypeRef::class("java.lang.Integer")
    }

    #[test]
    fn test_literals_take_natural_type() {
        let types = TypeRegistry::with_builtins();
        let scope = Scope::new();

        let expr = coerce(&types, &scope, 10.into()).unwrap();
        assert_eq!(expr.ty(), TypeRef::int());

        let expr = coerce(&types, &scope, "10".into()).unwrap();
        assert_eq!(expr.ty(), TypeRef::string());
        assert_eq!(expr.render(&scope).unwrap(), "\"10\"");
    }

    #[test]
    fn test_expression_passes_through() {
        let types = TypeRegistry::with_builtins();
        let scope = Scope::new();
        let original = Expression::class_literal(TypeRef::string());

        let expr = coerce(&types, &scope, original.clone().into()).unwrap();
        assert_eq!(expr, original);
    }

    #[test]
    fn test_typed_text_is_parsed() {
        let types = TypeRegistry::with_builtins();
        let scope = Scope::new();

        let expr = coerce(&types, &scope, Value::typed(integer(), "10")).unwrap();
        let lit = expr.as_literal().unwrap();
        assert_eq!(lit.ty(), &integer());
        assert_eq!(lit.value(), &LiteralValue::Int(10));
    }

    #[test]
    fn test_typed_text_parse_failure() {
        let types = TypeRegistry::with_builtins();
        let scope = Scope::new();

        let err = coerce(&types, &scope, Value::typed(integer(), "abc")).unwrap_err();
        assert!(matches!(*err, Error::InvalidType { .. }));
        let cause = err.source().unwrap().downcast_ref::<LiteralParseError>();
        assert!(matches!(cause, Some(LiteralParseError::Int(_))));
    }

    #[test]
    fn test_typed_value_checks_assignability() {
        let types = TypeRegistry::with_builtins();
        let scope = Scope::new();

        let widened = coerce_to(&types, &scope, 10.into(), &TypeRef::long()).unwrap();
        assert_eq!(widened.ty(), TypeRef::long());
        assert_eq!(widened.render(&scope).unwrap(), "10");

        let err = coerce_to(&types, &scope, 10i64.into(), &TypeRef::int()).unwrap_err();
        assert!(matches!(*err, Error::InvalidType { cause: None, .. }));

        let err = coerce_to(&types, &scope, true.into(), &TypeRef::string()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "incompatible types: boolean cannot be converted to java.lang.String"
        );
    }

    #[test]
    fn test_nested_builder_is_finalized() {
        let types = TypeRegistry::with_builtins().with(ClassSpec::class("com.example.Empty"));
        let scope = Scope::new();
        let nested = ObjectBuilder::new_instance_of(&types, types.descriptor("com.example.Empty").unwrap());

        let expr = coerce(&types, &scope, nested.into()).unwrap();
        assert_eq!(expr.ty(), TypeRef::class("com.example.Empty"));
        assert_eq!(expr.render(&scope).unwrap(), "new com.example.Empty()");
    }

    #[test]
    fn test_null_to_reference() {
        let types = TypeRegistry::with_builtins();
        let scope = Scope::new();

        let expr = coerce_to(&types, &scope, Value::null(), &TypeRef::string()).unwrap();
        assert_eq!(expr.ty(), TypeRef::string());
        assert_eq!(expr.render(&scope).unwrap(), "null");
        assert!(coerce_to(&types, &scope, Value::null(), &TypeRef::int()).is_err());
    }

    #[test]
    fn test_unpinned_text_is_not_parsed() {
        let types = TypeRegistry::with_builtins();
        let scope = Scope::new();

        let err = coerce_assignable(&types, &scope, "1".into(), &TypeRef::int()).unwrap_err();
        assert!(matches!(*err, Error::InvalidType { .. }));
        let err = coerce_assignable(&types, &scope, "7".into(), &integer()).unwrap_err();
        assert!(matches!(*err, Error::InvalidType { .. }));

        let expr = coerce_assignable(&types, &scope, 7.into(), &TypeRef::long()).unwrap();
        assert_eq!(expr.ty(), TypeRef::long());
    }
}
