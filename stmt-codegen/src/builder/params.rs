//! Ordered, typed call arguments.

use stmtgen_meta::{TypeProvider, TypeRef};

use super::{Expression, Scope, Value, value::coerce};
use crate::Result;

/// An ordered argument list.
///
/// Built once and immutable afterwards. The same order drives both
/// constructor matching and rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallParameters {
    params: Vec<Expression>,
}

impl CallParameters {
    /// Coerce each value, in order, against the given scope.
    pub fn from_values<'t, I, V>(types: &dyn TypeProvider, scope: &Scope, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value<'t>>,
    {
        let params = values
            .into_iter()
            .map(|v| coerce(types, scope, v.into()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { params })
    }

    /// Wrap pre-built expressions without coercion.
    pub fn from_expressions(expressions: impl IntoIterator<Item = Expression>) -> Self {
        Self {
            params: expressions.into_iter().collect(),
        }
    }

    /// The empty argument list.
    pub fn none() -> Self {
        Self::default()
    }

    /// Argument types, in order.
    pub fn parameter_types(&self) -> Vec<TypeRef> {
        self.params.iter().map(Expression::ty).collect()
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over the arguments.
    pub fn iter(&self) -> impl Iterator<Item = &Expression> {
        self.params.iter()
    }

    /// Render as `a, b, c` (no surrounding parentheses).
    pub fn render(&self, scope: &Scope) -> Result<String> {
        let rendered = self
            .params
            .iter()
            .map(|p| p.render(scope))
            .collect::<Result<Vec<_>>>()?;
        Ok(rendered.join(", "))
    }
}
