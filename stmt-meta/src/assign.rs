//! Assignability and constructor overload resolution.

use tracing::trace;

use crate::{ConstructorSpec, TypeDescriptor, TypeProvider, TypeRef};

/// Check if a value of type `actual` can be used where `declared` is expected.
pub fn is_assignable(types: &dyn TypeProvider, actual: &TypeRef, declared: &TypeRef) -> bool {
    if actual == declared {
        return true;
    }

    match (actual, declared) {
        (TypeRef::Null, declared) => declared.is_reference() && *declared != TypeRef::Null,
        (TypeRef::Primitive(from), TypeRef::Primitive(to)) => from.widens_to(*to),
        // Boxing, then reference widening from the boxed class.
        (TypeRef::Primitive(from), TypeRef::Class(_)) => {
            let boxed = TypeRef::class(from.boxed_name());
            is_subtype(types, &boxed, declared)
        }
        // Unboxing, then primitive widening.
        (TypeRef::Class(_), TypeRef::Primitive(to)) => actual
            .unboxed()
            .is_some_and(|from| from.widens_to(*to)),
        (TypeRef::Array(from), TypeRef::Array(to)) => {
            if from.is_primitive() || to.is_primitive() {
                from == to
            } else {
                is_assignable(types, from, to)
            }
        }
        (TypeRef::Array(_), TypeRef::Class(name)) => {
            name == crate::OBJECT
                || name == "java.io.Serializable"
                || name == "java.lang.Cloneable"
        }
        (TypeRef::Class(_), TypeRef::Class(_)) => is_subtype(types, actual, declared),
        _ => false,
    }
}

/// Walk the supertype graph of `actual` looking for `declared`.
fn is_subtype(types: &dyn TypeProvider, actual: &TypeRef, declared: &TypeRef) -> bool {
    if declared.class_name() == Some(crate::OBJECT) {
        return true;
    }

    let mut pending = vec![actual.clone()];
    let mut seen: Vec<TypeRef> = Vec::new();

    while let Some(current) = pending.pop() {
        if current == *declared {
            return true;
        }
        if seen.contains(&current) {
            continue;
        }
        if let Some(desc) = types.descriptor_of(&current) {
            pending.extend(desc.supertypes());
        }
        seen.push(current);
    }
    false
}

/// Pick the constructor of `descriptor` that accepts `args`.
///
/// Only constructors of the same arity are considered. An exact match wins;
/// otherwise the most specific applicable constructor is chosen, with ties
/// going to the first one declared.
pub fn best_matching_constructor(
    types: &dyn TypeProvider,
    descriptor: &dyn TypeDescriptor,
    args: &[TypeRef],
) -> Option<ConstructorSpec> {
    if descriptor.has_implicit_default_constructor() {
        return args.is_empty().then(ConstructorSpec::no_args);
    }

    let applicable: Vec<&ConstructorSpec> = descriptor
        .constructors()
        .iter()
        .filter(|ctor| ctor.arity() == args.len())
        .filter(|ctor| {
            ctor.params
                .iter()
                .zip(args)
                .all(|(param, arg)| is_assignable(types, arg, param))
        })
        .collect();

    trace!(
        ty = descriptor.qualified_name(),
        candidates = applicable.len(),
        "applicable constructors"
    );

    if let Some(exact) = applicable.iter().find(|ctor| ctor.params == args) {
        return Some((*exact).clone());
    }

    applicable
        .iter()
        .find(|candidate| {
            applicable.iter().all(|other| {
                candidate
                    .params
                    .iter()
                    .zip(&other.params)
                    .all(|(mine, theirs)| is_assignable(types, mine, theirs))
            })
        })
        .or_else(|| applicable.first())
        .map(|ctor| (*ctor).clone())
}
