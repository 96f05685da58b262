//! Type descriptor and provider traits.
//!
//! Builders never reach for a global type lookup. The caller passes a
//! [`TypeProvider`] explicitly, which makes it trivial to test against a
//! small registry of fake types.

use std::{fmt, sync::Arc};

use crate::{ConstructorSpec, FieldSpec, MethodSpec, TypeRef};

/// Shared handle to a type descriptor.
pub type TypeHandle = Arc<dyn TypeDescriptor>;

/// Structural queries about a nominal type.
///
/// Implementations must be deterministic and free of side effects. They are
/// shared read-only between builders, hence the `Send + Sync` bound.
pub trait TypeDescriptor: fmt::Debug + Send + Sync {
    /// Fully qualified name, as emitted in source.
    fn qualified_name(&self) -> &str;

    /// Declared fields, in declaration order.
    fn fields(&self) -> &[FieldSpec];

    /// Declared constructors, in declaration order.
    fn constructors(&self) -> &[ConstructorSpec];

    /// Whether this type is an interface.
    fn is_interface(&self) -> bool;

    /// Direct supertypes: superclass first, then interfaces.
    fn supertypes(&self) -> Vec<TypeRef>;

    /// Declared methods, in declaration order.
    fn methods(&self) -> &[MethodSpec] {
        &[]
    }

    /// A class that declares no constructor gets a zero-argument one.
    fn has_implicit_default_constructor(&self) -> bool {
        !self.is_interface() && self.constructors().is_empty()
    }

    /// Find a declared method by name.
    fn find_method(&self, name: &str) -> Option<&MethodSpec> {
        self.methods().iter().find(|m| m.name == name)
    }

    /// This type as a [`TypeRef`].
    fn type_ref(&self) -> TypeRef {
        TypeRef::class(self.qualified_name())
    }
}

/// Resolves qualified names to type descriptors.
pub trait TypeProvider {
    /// Look up a descriptor by qualified name.
    fn descriptor(&self, name: &str) -> Option<TypeHandle>;

    /// Look up the descriptor behind a class type reference.
    fn descriptor_of(&self, ty: &TypeRef) -> Option<TypeHandle> {
        ty.class_name().and_then(|name| self.descriptor(name))
    }

    /// Find a method on `ty` or any of its supertypes.
    ///
    /// The root class is searched last, whether or not it is declared.
    fn find_method(&self, ty: &TypeRef, name: &str) -> Option<MethodSpec> {
        let mut pending = vec![TypeRef::object(), ty.clone()];
        let mut seen = Vec::new();

        while let Some(current) = pending.pop() {
            if seen.contains(&current) {
                continue;
            }
            if let Some(desc) = self.descriptor_of(&current) {
                if let Some(method) = desc.find_method(name) {
                    return Some(method.clone());
                }
                pending.extend(desc.supertypes().into_iter().rev());
            }
            seen.push(current);
        }
        None
    }
}

impl<P: TypeProvider + ?Sized> TypeProvider for &P {
    fn descriptor(&self, name: &str) -> Option<TypeHandle> {
        (**self).descriptor(name)
    }
}

impl<P: TypeProvider + ?Sized> TypeProvider for Arc<P> {
    fn descriptor(&self, name: &str) -> Option<TypeHandle> {
        self.as_ref().descriptor(name)
    }
}
