//! Check operation - manifest summary.

use std::path::Path;

use stmtgen_manifest::Manifest;
use stmtgen_meta::{TypeDescriptor, TypeRegistry};

use crate::reports::{CheckReport, TypeSummary};

/// Summarize the declared types of a validated manifest.
pub fn check(manifest: &Manifest, path: Option<&Path>) -> CheckReport {
    let types = manifest
        .specs()
        .iter()
        .map(|spec| TypeSummary {
            name: spec.name.clone(),
            interface: spec.is_interface(),
            fields: spec.fields.len(),
            constructors: spec.constructors.len(),
            methods: spec.methods.len(),
        })
        .collect();

    CheckReport {
        manifest_path: path.map(Path::to_path_buf),
        types,
        builtin_count: TypeRegistry::with_builtins().len(),
    }
}
