use std::{
    char::ParseCharError,
    num::{ParseFloatError, ParseIntError},
    str::ParseBoolError,
};

use miette::Diagnostic;
use stmtgen_meta::TypeRef;
use thiserror::Error;

/// Result type for builder operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Failure to read literal text under a target type's rules.
#[derive(Debug, Error)]
pub enum LiteralParseError {
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error(transparent)]
    Float(#[from] ParseFloatError),
    #[error(transparent)]
    Bool(#[from] ParseBoolError),
    #[error(transparent)]
    Char(#[from] ParseCharError),
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("incompatible types: {found} cannot be converted to {expected}")]
    #[diagnostic(code(stmtgen::invalid_type))]
    InvalidType {
        found: String,
        expected: TypeRef,
        #[source]
        cause: Option<LiteralParseError>,
    },

    #[error("no constructor {ty}({}) is defined", join_types(.args))]
    #[diagnostic(
        code(stmtgen::undefined_constructor),
        help("declared constructors are matched by arity, then by assignability of each argument")
    )]
    UndefinedConstructor { ty: TypeRef, args: Vec<TypeRef> },

    #[error("variable '{name}' is out of scope")]
    #[diagnostic(
        code(stmtgen::unresolved_reference),
        help("declare '{name}' in the active scope before referencing it")
    )]
    UnresolvedReference { name: String },

    #[error("too many values: array of length {length} cannot hold {count} values")]
    #[diagnostic(code(stmtgen::too_many_values))]
    TooManyValues { length: usize, count: usize },

    #[error("variable '{name}' is already declared in this scope")]
    #[diagnostic(code(stmtgen::duplicate_declaration))]
    DuplicateDeclaration { name: String },

    #[error("cannot {operation}: {reason}")]
    #[diagnostic(code(stmtgen::invalid_build_state))]
    InvalidBuildState {
        operation: &'static str,
        reason: &'static str,
    },

    #[error("no method '{name}' is declared on {ty} or its supertypes")]
    #[diagnostic(code(stmtgen::undefined_method))]
    UndefinedMethod { ty: TypeRef, name: String },

    #[error("unknown type '{name}'")]
    #[diagnostic(
        code(stmtgen::unknown_type),
        help("register the type with the provider passed to the builder")
    )]
    UnknownType { name: String },
}

impl Error {
    /// Create an assignability error.
    pub fn invalid_type(found: impl Into<String>, expected: TypeRef) -> Box<Self> {
        Box::new(Error::InvalidType {
            found: found.into(),
            expected,
            cause: None,
        })
    }

    /// Create a literal conversion error carrying the parse failure.
    pub fn invalid_literal(
        text: &str,
        expected: TypeRef,
        cause: impl Into<LiteralParseError>,
    ) -> Box<Self> {
        Box::new(Error::InvalidType {
            found: format!("\"{}\"", text),
            expected,
            cause: Some(cause.into()),
        })
    }

    /// Create an undefined constructor error.
    pub fn undefined_constructor(ty: TypeRef, args: Vec<TypeRef>) -> Box<Self> {
        Box::new(Error::UndefinedConstructor { ty, args })
    }

    /// Create an out-of-scope error.
    pub fn unresolved_reference(name: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnresolvedReference { name: name.into() })
    }

    /// Create an array bounds error.
    pub fn too_many_values(length: usize, count: usize) -> Box<Self> {
        Box::new(Error::TooManyValues { length, count })
    }

    /// Create a duplicate declaration error.
    pub fn duplicate_declaration(name: impl Into<String>) -> Box<Self> {
        Box::new(Error::DuplicateDeclaration { name: name.into() })
    }

    /// Create an invalid transition error.
    pub fn invalid_state(operation: &'static str, reason: &'static str) -> Box<Self> {
        Box::new(Error::InvalidBuildState { operation, reason })
    }

    /// Create an undefined method error.
    pub fn undefined_method(ty: TypeRef, name: impl Into<String>) -> Box<Self> {
        Box::new(Error::UndefinedMethod {
            ty,
            name: name.into(),
        })
    }

    /// Create an unknown type error.
    pub fn unknown_type(name: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnknownType { name: name.into() })
    }
}

fn join_types(types: &[TypeRef]) -> String {
    types
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_undefined_constructor_message() {
        let err = Error::undefined_constructor(
            TypeRef::class("com.example.Point"),
            vec![TypeRef::int(), TypeRef::string()],
        );
        assert_eq!(
            err.to_string(),
            "no constructor com.example.Point(int, java.lang.String) is defined"
        );
    }

    #[test]
    fn test_invalid_literal_keeps_cause() {
        let cause = "abc".parse::<i32>().unwrap_err();
        let err = Error::invalid_literal("abc", TypeRef::int(), cause);

        assert_eq!(
            err.to_string(),
            "incompatible types: \"abc\" cannot be converted to int"
        );
        let source = err.source().expect("parse failure as source");
        assert!(matches!(
            source.downcast_ref::<LiteralParseError>(),
            Some(LiteralParseError::Int(_))
        ));
    }
}
