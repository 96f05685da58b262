//! Type descriptors for stmtgen.
//!
//! This crate answers the structural questions the expression builders ask
//! about a type: its fields, constructors, supertypes and methods. It also
//! owns the assignability rules and constructor overload resolution, since
//! both are pure functions of type metadata.
//!
//! # Module Organization
//!
//! - [`TypeRef`], [`PrimitiveType`] - Type references as spelled in source
//! - [`TypeDescriptor`], [`TypeProvider`] - Query interfaces for type metadata
//! - [`ClassSpec`] - Declarative in-memory descriptor
//! - [`TypeRegistry`] - Ordered provider with the core platform types
//! - [`is_assignable`], [`best_matching_constructor`] - Type checks

mod assign;
mod class;
mod descriptor;
mod registry;
mod types;

pub use assign::{best_matching_constructor, is_assignable};
pub use class::{ClassSpec, ConstructorSpec, FieldSpec, MethodSpec};
pub use descriptor::{TypeDescriptor, TypeHandle, TypeProvider};
pub use registry::TypeRegistry;
pub use types::{CLASS, OBJECT, ParseTypeRefError, PrimitiveType, STRING, TypeRef};
