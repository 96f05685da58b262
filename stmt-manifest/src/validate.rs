//! Validation of type spellings in the manifest.

use std::str::FromStr;

use miette::SourceSpan;
use stmtgen_meta::TypeRef;

use crate::{Result, SourceContext};

/// Validation context that carries source information.
///
/// Spans are located by searching the raw TOML for the quoted value. A
/// cursor lets callers look for the occurrence that belongs to the entry
/// currently being validated rather than the first one in the file.
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: &'a SourceContext,
    cursor: usize,
}

impl<'a> ParseContext<'a> {
    /// Create a new context positioned at the start of the source.
    pub fn new(source: &'a SourceContext) -> Self {
        Self { source, cursor: 0 }
    }

    /// The underlying source context.
    pub fn source(&self) -> &'a SourceContext {
        self.source
    }

    /// Find the first quoted occurrence of `value` at or after the cursor.
    pub fn find_span(&self, value: &str) -> Option<SourceSpan> {
        find_quoted_span(self.source.src(), value, self.cursor)
    }

    /// Find the first quoted occurrence of `value` anywhere in the source.
    pub fn find_first_span(&self, value: &str) -> Option<SourceSpan> {
        find_quoted_span(self.source.src(), value, 0)
    }

    /// Move the cursor past the given span.
    pub fn advance_past(&mut self, span: Option<SourceSpan>) {
        if let Some(span) = span {
            self.cursor = span.offset() + span.len();
        }
    }

    /// Parse a type spelling, reporting failures at its location.
    pub fn parse_type(&self, spelling: &str) -> Result<TypeRef> {
        TypeRef::from_str(spelling).map_err(|e| {
            self.source
                .invalid_type_name_error(spelling, e.reason, self.find_span(spelling))
        })
    }

    /// Parse the name of a declared type, which must be a class name.
    pub fn parse_declared_name(&self, spelling: &str) -> Result<TypeRef> {
        let ty = self.parse_type(spelling)?;
        if ty.class_name().is_none() {
            return Err(self.source.invalid_type_name_error(
                spelling,
                "declared types must be named classes or interfaces",
                self.find_span(spelling),
            ));
        }
        Ok(ty)
    }
}

/// Find the span of a quoted TOML string value, excluding the quotes.
pub(crate) fn find_quoted_span(src: &str, value: &str, from: usize) -> Option<SourceSpan> {
    let tail = src.get(from..)?;
    let needle = format!("\"{}\"", value);
    tail.find(&needle)
        .map(|pos| SourceSpan::from((from + pos + 1, value.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_quoted_span() {
        let src = r#"name = "a.B"
name = "a.B""#;
        let first = find_quoted_span(src, "a.B", 0).unwrap();
        assert_eq!(first.offset(), 8);
        assert_eq!(first.len(), 3);

        let second = find_quoted_span(src, "a.B", first.offset() + first.len()).unwrap();
        assert_eq!(second.offset(), 21);
        assert!(find_quoted_span(src, "a.C", 0).is_none());
    }

    #[test]
    fn test_parse_type() {
        let source = SourceContext::new(r#"type = "int[]""#, "types.toml");
        let ctx = ParseContext::new(&source);

        assert_eq!(
            ctx.parse_type("int[]").unwrap(),
            TypeRef::array(TypeRef::int())
        );
        assert!(ctx.parse_type("1abc").is_err());
        assert!(ctx.parse_declared_name("int").is_err());
        assert!(ctx.parse_declared_name("com.example.Point").is_ok());
    }
}
