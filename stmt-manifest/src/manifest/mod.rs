//! Manifest types and parsing for types.toml files.

mod parse;

pub use parse::parse_manifest;
use serde::Deserialize;
use stmtgen_meta::{ClassSpec, TypeRegistry};

/// Root manifest for types.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Declared types, in file order
    #[serde(default)]
    pub types: Vec<TypeEntry>,

    /// Validated descriptors, filled in after parsing
    #[serde(skip)]
    specs: Vec<ClassSpec>,
}

/// One `[[types]]` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    /// Fully qualified name
    pub name: String,

    #[serde(default)]
    pub interface: bool,

    /// Superclass spelling
    pub extends: Option<String>,

    #[serde(default)]
    pub implements: Vec<String>,

    #[serde(default)]
    pub fields: Vec<FieldEntry>,

    /// Each constructor is its list of parameter type spellings
    #[serde(default)]
    pub constructors: Vec<Vec<String>>,

    #[serde(default)]
    pub methods: Vec<MethodEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodEntry {
    pub name: String,
    /// Return type spelling, omitted for `void`
    pub returns: Option<String>,
    #[serde(default)]
    pub params: Vec<String>,
}

impl Manifest {
    /// Validated descriptors, in file order.
    pub fn specs(&self) -> &[ClassSpec] {
        &self.specs
    }

    /// Find a declared type by name.
    pub fn get(&self, name: &str) -> Option<&TypeEntry> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Number of declared types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if no types are declared.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// A registry with the core platform types plus every declared type.
    ///
    /// Declared types replace core types of the same name.
    pub fn registry(&self) -> TypeRegistry {
        self.specs
            .iter()
            .cloned()
            .fold(TypeRegistry::with_builtins(), TypeRegistry::with)
    }
}
