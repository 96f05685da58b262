//! Type manifest for the stmt CLI.
//!
//! A `types.toml` file declares the classes and interfaces that
//! construction expressions may target. Parsing validates every type
//! spelling and reports problems as [`miette`] diagnostics pointing into
//! the file.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use manifest::{FieldEntry, Manifest, MethodEntry, TypeEntry, parse_manifest};
pub use validate::ParseContext;
