//! Manifest parsing from files and strings.

use std::{collections::HashSet, path::Path, str::FromStr};

use stmtgen_meta::{ClassSpec, MethodSpec};

use super::{Manifest, TypeEntry};
use crate::{Error, Result, error::SourceContext, validate::ParseContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "types.toml")
    }
}

impl Manifest {
    /// Parse a types.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a types.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let mut manifest: Manifest =
        toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    manifest.specs = validate_manifest(&manifest, &source_ctx)?;
    Ok(manifest)
}

/// Validate every entry and convert it into a descriptor.
fn validate_manifest(manifest: &Manifest, source: &SourceContext) -> Result<Vec<ClassSpec>> {
    let mut ctx = ParseContext::new(source);
    let mut seen = HashSet::new();
    let mut specs = Vec::with_capacity(manifest.types.len());

    for entry in &manifest.types {
        let span = ctx.find_span(&entry.name);
        if !seen.insert(entry.name.as_str()) {
            return Err(source.duplicate_type_error(
                &entry.name,
                ctx.find_first_span(&entry.name),
                span,
            ));
        }
        ctx.advance_past(span);

        specs.push(validate_entry(entry, &ctx)?);
    }
    Ok(specs)
}

fn validate_entry(entry: &TypeEntry, ctx: &ParseContext<'_>) -> Result<ClassSpec> {
    ctx.parse_declared_name(&entry.name)?;

    let mut spec = if entry.interface {
        ClassSpec::interface(&entry.name)
    } else {
        ClassSpec::class(&entry.name)
    };

    if let Some(extends) = &entry.extends {
        spec = spec.extends(ctx.parse_declared_name(extends)?);
    }
    for iface in &entry.implements {
        spec = spec.implements(ctx.parse_declared_name(iface)?);
    }

    let mut field_ctx = ctx.clone();
    let mut field_names = HashSet::new();
    for field in &entry.fields {
        let span = field_ctx.find_span(&field.name);
        if !field_names.insert(field.name.as_str()) {
            return Err(ctx
                .source()
                .duplicate_field_error(&entry.name, &field.name, span));
        }
        field_ctx.advance_past(span);
        spec = spec.field(&field.name, ctx.parse_type(&field.ty)?);
    }

    for params in &entry.constructors {
        let params = params
            .iter()
            .map(|p| ctx.parse_type(p))
            .collect::<Result<Vec<_>>>()?;
        spec = spec.constructor(params);
    }

    for method in &entry.methods {
        let mut spec_method = MethodSpec::new(&method.name);
        if let Some(returns) = &method.returns {
            spec_method = spec_method.returns(ctx.parse_type(returns)?);
        }
        for param in &method.params {
            spec_method = spec_method.param(ctx.parse_type(param)?);
        }
        spec = spec.method(spec_method);
    }

    Ok(spec)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use stmtgen_meta::{TypeDescriptor, TypeProvider, TypeRef, TypeRegistry};

    use super::*;

    const POINT: &str = r#"
        [[types]]
        name = "com.example.Point"
        implements = ["java.io.Serializable"]
        fields = [{ name = "x", type = "int" }, { name = "y", type = "int" }]
        constructors = [["int", "int"], []]
        methods = [{ name = "toString", returns = "java.lang.String" }]

        [[types]]
        name = "com.example.Shape"
        interface = true
        methods = [{ name = "area", returns = "double", params = ["int"] }]
    "#;

    #[test]
    fn test_parse_types() {
        let manifest = Manifest::from_str(POINT).unwrap();
        assert_eq!(manifest.len(), 2);

        let point = &manifest.specs()[0];
        assert_eq!(point.name, "com.example.Point");
        assert_eq!(point.fields.len(), 2);
        assert_eq!(point.constructors[0].params, vec![TypeRef::int(), TypeRef::int()]);
        assert_eq!(point.constructors[1].arity(), 0);
        assert_eq!(point.interfaces, vec![TypeRef::class("java.io.Serializable")]);

        let shape = &manifest.specs()[1];
        assert!(shape.is_interface());
        assert_eq!(shape.methods[0].params, vec![TypeRef::int()]);
        assert_eq!(shape.methods[0].returns, Some(TypeRef::double()));

        assert!(manifest.get("com.example.Shape").is_some());
    }

    #[test]
    fn test_registry_includes_builtins() {
        let registry = Manifest::from_str(POINT).unwrap().registry();
        assert!(registry.contains("java.lang.String"));
        let point = registry.descriptor("com.example.Point").unwrap();
        assert_eq!(point.constructors().len(), 2);
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = Manifest::from_str("").unwrap();
        assert!(manifest.is_empty());
        assert_eq!(manifest.registry().len(), TypeRegistry::with_builtins().len());
    }

    #[test]
    fn test_duplicate_type() {
        let err = Manifest::from_str(
            r#"
            [[types]]
            name = "a.B"

            [[types]]
            name = "a.B"
            "#,
        )
        .unwrap_err();

        match *err {
            Error::DuplicateType {
                ref name,
                first_span,
                second_span,
                ..
            } => {
                assert_eq!(name, "a.B");
                assert!(first_span.unwrap().offset() < second_span.unwrap().offset());
            }
            other => panic!("expected DuplicateType, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_field() {
        let err = Manifest::from_str(
            r#"
            [[types]]
            name = "a.B"
            fields = [{ name = "x", type = "int" }, { name = "x", type = "long" }]
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::DuplicateField { ref field, .. } if field == "x"));
        assert_eq!(err.to_string(), "duplicate field 'x' in 'a.B'");
    }

    #[test]
    fn test_invalid_type_name() {
        let err = Manifest::from_str(
            r#"
            [[types]]
            name = "a.B"
            constructors = [["in t"]]
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidTypeName { ref name, span: Some(_), .. } if name == "in t"));

        let err = Manifest::from_str(
            r#"
            [[types]]
            name = "int"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidTypeName { .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = Manifest::from_str("[[types]]\nname = ").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));

        let err = Manifest::from_str("[[types]]\nname = \"a.B\"\nfinal = true").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(POINT.as_bytes()).unwrap();

        let manifest = Manifest::from_file(file.path()).unwrap();
        assert_eq!(manifest.specs().len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::from_file(dir.path().join("types.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
