use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Holds the manifest text and filename so error factories only need the
/// details of the problem itself.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a duplicate type error.
    pub fn duplicate_type_error(
        &self,
        name: impl Into<String>,
        first_span: Option<SourceSpan>,
        second_span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::DuplicateType {
            src: self.named_source(),
            first_span,
            second_span,
            name: name.into(),
        })
    }

    /// Create a duplicate field error.
    pub fn duplicate_field_error(
        &self,
        ty: impl Into<String>,
        field: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::DuplicateField {
            src: self.named_source(),
            span,
            ty: ty.into(),
            field: field.into(),
        })
    }

    /// Create an invalid type name error.
    pub fn invalid_type_name_error(
        &self,
        name: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidTypeName {
            src: self.named_source(),
            span,
            name: name.into(),
            reason: reason.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass a manifest with '--types <path>' or create types.toml"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse type manifest")]
    #[diagnostic(code(stmtgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("type '{name}' is declared more than once")]
    #[diagnostic(
        code(stmtgen::duplicate_type),
        help("merge the declarations of '{name}' into a single [[types]] entry")
    )]
    DuplicateType {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: Option<SourceSpan>,
        #[label("declared again here")]
        second_span: Option<SourceSpan>,
        name: String,
    },

    #[error("duplicate field '{field}' in '{ty}'")]
    #[diagnostic(code(stmtgen::duplicate_field))]
    DuplicateField {
        #[source_code]
        src: NamedSource<String>,
        #[label("field declared again here")]
        span: Option<SourceSpan>,
        ty: String,
        field: String,
    },

    #[error("invalid type name '{name}'")]
    #[diagnostic(
        code(stmtgen::invalid_type_name),
        help("{reason}. Use a primitive keyword or a dotted class name, with '[]' for arrays.")
    )]
    InvalidTypeName {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid type")]
        span: Option<SourceSpan>,
        name: String,
        reason: String,
    },
}
