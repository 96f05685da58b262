//! Immutable expression tree.
//!
//! Every [`Expression`] knows its static type up front; text is only
//! produced by [`Expression::render`], in a single pass over the tree.
//!
//! # Example
//!
//! ```
//! use stmtgen_codegen::builder::{Expression, Scope};
//! use stmtgen_meta::TypeRef;
//!
//! let expr = Expression::literal("hello");
//! assert_eq!(expr.ty(), TypeRef::string());
//! assert_eq!(expr.render(&Scope::new()).unwrap(), "\"hello\"");
//! ```

use stmtgen_meta::{CLASS, TypeRef};

use super::{CallParameters, ClassBody, Literal, LiteralValue, Scope};
use crate::{Error, Result};

/// A typed fragment of source.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal value.
    Literal(Literal),
    /// A reference to a named variable.
    Variable { name: String, ty: TypeRef },
    /// A finalized construction expression.
    Construct(Box<Construct>),
    /// A comma-separated argument list.
    Parameters(CallParameters),
    /// A class literal: `T.class`.
    ClassLiteral(TypeRef),
}

impl Expression {
    /// Create a literal expression with the value's natural type.
    pub fn literal(value: impl Into<LiteralValue>) -> Self {
        Self::Literal(Literal::new(value))
    }

    /// Create a `null` literal.
    pub fn null() -> Self {
        Self::Literal(Literal::new(LiteralValue::Null))
    }

    /// Create a variable reference with a known type.
    pub fn variable(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::Variable {
            name: name.into(),
            ty,
        }
    }

    /// Create a class literal.
    pub fn class_literal(ty: TypeRef) -> Self {
        Self::ClassLiteral(ty)
    }

    /// Wrap a finalized construct.
    pub fn construct(construct: Construct) -> Self {
        Self::Construct(Box::new(construct))
    }

    /// The static type of this expression.
    pub fn ty(&self) -> TypeRef {
        match self {
            Self::Literal(lit) => lit.ty().clone(),
            Self::Variable { ty, .. } => ty.clone(),
            Self::Construct(c) => c.ty(),
            // An argument bundle behaves like varargs.
            Self::Parameters(_) => TypeRef::array(TypeRef::object()),
            Self::ClassLiteral(_) => TypeRef::class(CLASS),
        }
    }

    /// The literal behind this expression, if it is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Render to source text.
    ///
    /// Variable references must be visible in `scope`. Nested constructs
    /// render against the scope they captured when they were finalized.
    pub fn render(&self, scope: &Scope) -> Result<String> {
        match self {
            Self::Literal(lit) => Ok(lit.render()),
            Self::Variable { name, .. } => {
                if !scope.contains(name) {
                    return Err(Error::unresolved_reference(name));
                }
                Ok(name.clone())
            }
            Self::Construct(c) => c.render(),
            Self::Parameters(params) => params.render(scope),
            Self::ClassLiteral(ty) => Ok(format!("{}.class", ty)),
        }
    }
}

impl From<Literal> for Expression {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}

impl From<Construct> for Expression {
    fn from(construct: Construct) -> Self {
        Self::construct(construct)
    }
}

/// The shape of a construction expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructKind {
    /// `new T(args)`, optionally followed by an anonymous class body.
    Instance {
        ty: TypeRef,
        args: CallParameters,
        body: Option<ClassBody>,
    },
    /// `new T[n]` or `new T[]`, optionally followed by initializer values.
    Array {
        element: TypeRef,
        length: Option<usize>,
        values: Option<Vec<Expression>>,
    },
}

impl ConstructKind {
    /// The type of the constructed value.
    pub fn ty(&self) -> TypeRef {
        match self {
            Self::Instance { ty, .. } => ty.clone(),
            Self::Array { element, .. } => TypeRef::array(element.clone()),
        }
    }

    /// Render against the given scope.
    pub fn render(&self, scope: &Scope) -> Result<String> {
        match self {
            Self::Instance { ty, args, body } => {
                let mut out = format!("new {}({})", ty, args.render(scope)?);
                if let Some(body) = body {
                    out.push_str(" {\n");
                    out.push_str(&body.render()?);
                    out.push_str("\n}");
                }
                Ok(out)
            }
            Self::Array {
                element,
                length,
                values,
            } => {
                let mut out = match length {
                    Some(n) => format!("new {}[{}]", element, n),
                    None => format!("new {}[]", element),
                };
                if let Some(values) = values {
                    let rendered = values
                        .iter()
                        .map(|v| v.render(scope))
                        .collect::<Result<Vec<_>>>()?;
                    out.push_str(" {\n");
                    out.push_str(&rendered.join(", "));
                    out.push_str("\n}");
                }
                Ok(out)
            }
        }
    }
}

/// A finalized construction expression together with the scope its
/// children were resolved in.
#[derive(Debug, Clone, PartialEq)]
pub struct Construct {
    kind: ConstructKind,
    scope: Scope,
}

impl Construct {
    pub(crate) fn new(kind: ConstructKind, scope: Scope) -> Self {
        Self { kind, scope }
    }

    /// The construct's shape.
    pub fn kind(&self) -> &ConstructKind {
        &self.kind
    }

    /// The scope captured at finalization.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// The type of the constructed value.
    pub fn ty(&self) -> TypeRef {
        self.kind.ty()
    }

    /// Render to source text.
    pub fn render(&self) -> Result<String> {
        self.kind.render(&self.scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_known_before_render() {
        assert_eq!(Expression::literal(1).ty(), TypeRef::int());
        assert_eq!(Expression::null().ty(), TypeRef::Null);
        assert_eq!(
            Expression::class_literal(TypeRef::string()).ty(),
            TypeRef::class("java.lang.Class")
        );
        assert_eq!(
            Expression::variable("x", TypeRef::long()).ty(),
            TypeRef::long()
        );
    }

    #[test]
    fn test_variable_must_be_visible() {
        let mut scope = Scope::new();
        let expr = Expression::variable("x", TypeRef::int());
        assert!(matches!(
            *expr.render(&scope).unwrap_err(),
            Error::UnresolvedReference { .. }
        ));

        scope.declare("x", TypeRef::int(), None).unwrap();
        assert_eq!(expr.render(&scope).unwrap(), "x");
    }

    #[test]
    fn test_class_literal() {
        let expr = Expression::class_literal(TypeRef::class("javax.inject.Inject"));
        assert_eq!(expr.render(&Scope::new()).unwrap(), "javax.inject.Inject.class");
    }

    #[test]
    fn test_array_shapes() {
        let scope = Scope::new();
        let sized = ConstructKind::Array {
            element: TypeRef::int(),
            length: Some(3),
            values: None,
        };
        assert_eq!(sized.render(&scope).unwrap(), "new int[3]");
        assert_eq!(sized.ty(), TypeRef::array(TypeRef::int()));

        let listed = ConstructKind::Array {
            element: TypeRef::int(),
            length: None,
            values: Some(vec![Expression::literal(1), Expression::literal(2)]),
        };
        assert_eq!(listed.render(&scope).unwrap(), "new int[] {\n1, 2\n}");
    }
}
