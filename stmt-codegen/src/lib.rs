//! Typed statement builder for generated source.
//!
//! Construction expressions are assembled with [`builder::ObjectBuilder`],
//! checked against a [`stmtgen_meta::TypeProvider`] as they are built, and
//! rendered to text in a single pass.
//!
//! # Module Organization
//!
//! - [`builder`] - Builders, expressions, scopes and value coercion

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod builder;
mod error;

pub use error::{Error, LiteralParseError, Result};
