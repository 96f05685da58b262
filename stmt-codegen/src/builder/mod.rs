//! Typed construction expressions.
//!
//! - [`ObjectBuilder`] - Fluent builder for `new T(...)`, arrays and anonymous subclasses
//! - [`StatementBuilder`] - Per-statement scope that hands out builders for named types
//! - [`Expression`] - Immutable, typed expression tree rendered on demand
//! - [`Value`] - Caller-supplied values, coerced into expressions
//! - [`CallParameters`] - Ordered constructor arguments
//! - [`Scope`] - Named variables visible to a builder
//!
//! # Anonymous Subclasses
//!
//! - [`ClassBodyBuilder`] - Collects members after [`ObjectBuilder::extend`]
//! - [`MethodBuilder`] - Parameters and [`Statement`]s of one member

mod body;
mod expr;
mod literal;
mod object;
mod params;
mod scope;
mod statement;
mod value;

pub use body::{ClassBody, ClassBodyBuilder, MethodBuilder, MethodDef, Statement};
pub use expr::{Construct, ConstructKind, Expression};
pub use literal::{Literal, LiteralValue};
pub use object::ObjectBuilder;
pub use params::CallParameters;
pub use scope::{Scope, Variable};
pub use statement::StatementBuilder;
pub use value::{Value, assert_assignable, coerce, coerce_assignable, coerce_to};
