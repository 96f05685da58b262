//! Render operations - construction expressions from command-line values.

use stmtgen_codegen::{
    Result,
    builder::{StatementBuilder, Value},
};
use stmtgen_meta::TypeProvider;

use crate::reports::RenderReport;

/// Render `new T(args)`.
///
/// With no arguments the construction completes implicitly, so the type
/// still needs a matching zero-argument constructor.
pub fn render_object<'t>(
    types: &'t dyn TypeProvider,
    ty: &str,
    args: Vec<Value<'t>>,
) -> Result<RenderReport> {
    let stmt = StatementBuilder::new(types);
    let mut builder = stmt.new_object(ty)?;
    if !args.is_empty() {
        builder = builder.with_parameters(args)?;
    }

    Ok(RenderReport {
        ty: builder.ty().to_string(),
        text: builder.render()?,
    })
}

/// Render `new T[n]` or `new T[]`, with initializer values when given.
pub fn render_array<'t>(
    types: &'t dyn TypeProvider,
    element: &str,
    length: Option<usize>,
    values: Vec<Value<'t>>,
) -> Result<RenderReport> {
    let stmt = StatementBuilder::new(types);
    let mut builder = match length {
        Some(n) => stmt.new_sized_array(element, n)?,
        None => stmt.new_array(element)?,
    };
    if !values.is_empty() {
        builder = builder.initialize(values)?;
    }

    Ok(RenderReport {
        ty: builder.ty().to_string(),
        text: builder.render()?,
    })
}
