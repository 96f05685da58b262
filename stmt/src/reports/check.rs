//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the manifest, if one was loaded.
    pub manifest_path: Option<PathBuf>,
    /// Declared types, in file order.
    pub types: Vec<TypeSummary>,
    /// Number of core platform types always available.
    pub builtin_count: usize,
}

/// One declared type.
#[derive(Debug)]
pub struct TypeSummary {
    pub name: String,
    pub interface: bool,
    pub fields: usize,
    pub constructors: usize,
    pub methods: usize,
}

impl TypeSummary {
    fn describe(&self) -> String {
        let kind = if self.interface { "interface" } else { "class" };
        format!(
            "{} {} ({} field{}, {} constructor{}, {} method{})",
            kind,
            self.name,
            self.fields,
            plural(self.fields),
            self.constructors,
            plural(self.constructors),
            self.methods,
            plural(self.methods),
        )
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.manifest_path {
            Some(path) => out.preformatted(&format!("✓ {} is valid", path.display())),
            None => out.preformatted("no type manifest found, using core types only"),
        }
        out.newline();

        if !self.types.is_empty() {
            out.section(&format!(
                "{} declared type{}",
                self.types.len(),
                plural(self.types.len())
            ));
            for ty in &self.types {
                out.list_item(&ty.describe());
            }
            out.newline();
        }

        out.preformatted(&format!("{} core types available", self.builtin_count));
    }
}
