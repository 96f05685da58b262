//! Ordered in-memory [`TypeProvider`].

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{ClassSpec, MethodSpec, PrimitiveType, TypeDescriptor, TypeHandle, TypeProvider, TypeRef};

/// Registry of type descriptors keyed by qualified name.
///
/// Iteration follows insertion order so listings are deterministic.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, TypeHandle>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry preloaded with the core platform types.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for spec in builtin_types() {
            registry.insert(spec);
        }
        registry
    }

    /// Register a descriptor, returning the one it replaced.
    pub fn insert(&mut self, descriptor: impl TypeDescriptor + 'static) -> Option<TypeHandle> {
        self.insert_handle(Arc::new(descriptor))
    }

    /// Register an already shared descriptor, returning the one it replaced.
    pub fn insert_handle(&mut self, handle: TypeHandle) -> Option<TypeHandle> {
        self.types
            .insert(handle.qualified_name().to_string(), handle)
    }

    /// Builder-style registration.
    pub fn with(mut self, descriptor: impl TypeDescriptor + 'static) -> Self {
        self.insert(descriptor);
        self
    }

    /// Check if a type is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over registered descriptors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeHandle> {
        self.types.values()
    }
}

impl TypeProvider for TypeRegistry {
    fn descriptor(&self, name: &str) -> Option<TypeHandle> {
        self.types.get(name).cloned()
    }
}

fn builtin_types() -> Vec<ClassSpec> {
    let object = TypeRef::object();
    let string = TypeRef::string();
    let serializable = TypeRef::class("java.io.Serializable");
    let comparable = TypeRef::class("java.lang.Comparable");
    let number = TypeRef::class("java.lang.Number");

    let mut types = vec![
        ClassSpec::class(crate::OBJECT)
            .method(MethodSpec::new("toString").returns(string.clone()))
            .method(MethodSpec::new("hashCode").returns(TypeRef::int()))
            .method(
                MethodSpec::new("equals")
                    .returns(TypeRef::boolean())
                    .param(object.clone()),
            ),
        ClassSpec::interface("java.io.Serializable"),
        ClassSpec::interface("java.lang.Comparable").method(
            MethodSpec::new("compareTo")
                .returns(TypeRef::int())
                .param(object.clone()),
        ),
        ClassSpec::interface("java.lang.CharSequence")
            .method(MethodSpec::new("length").returns(TypeRef::int()))
            .method(MethodSpec::new("toString").returns(string.clone())),
        ClassSpec::interface("java.lang.Runnable").method(MethodSpec::new("run")),
        ClassSpec::interface("java.lang.annotation.Annotation")
            .method(MethodSpec::new("annotationType").returns(TypeRef::class(crate::CLASS)))
            .method(MethodSpec::new("hashCode").returns(TypeRef::int()))
            .method(MethodSpec::new("toString").returns(string.clone())),
        ClassSpec::class(crate::STRING)
            .extends(object.clone())
            .implements(serializable.clone())
            .implements(TypeRef::class("java.lang.CharSequence"))
            .implements(comparable.clone())
            .constructor([])
            .constructor([string.clone()])
            .constructor([TypeRef::array(TypeRef::char())])
            .constructor([TypeRef::array(TypeRef::char()), TypeRef::int(), TypeRef::int()]),
        ClassSpec::class(crate::CLASS)
            .extends(object.clone())
            .implements(serializable.clone())
            .method(MethodSpec::new("getName").returns(string.clone())),
        ClassSpec::class("java.lang.Number")
            .extends(object.clone())
            .implements(serializable.clone())
            .method(MethodSpec::new("intValue").returns(TypeRef::int()))
            .method(MethodSpec::new("longValue").returns(TypeRef::long()))
            .method(MethodSpec::new("doubleValue").returns(TypeRef::double())),
    ];

    for primitive in PrimitiveType::ALL {
        let base = if primitive.is_numeric() && primitive != PrimitiveType::Char {
            number.clone()
        } else {
            object.clone()
        };
        let mut boxed = ClassSpec::class(primitive.boxed_name())
            .extends(base)
            .implements(serializable.clone())
            .implements(comparable.clone())
            .constructor([TypeRef::Primitive(primitive)]);
        if primitive == PrimitiveType::Float {
            boxed = boxed.constructor([TypeRef::double()]);
        }
        if primitive != PrimitiveType::Char {
            boxed = boxed.constructor([string.clone()]);
        }
        types.push(boxed);
    }

    types
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_registered() {
        let registry = TypeRegistry::with_builtins();

        assert!(registry.contains("java.lang.Object"));
        assert!(registry.contains("java.lang.String"));
        assert!(registry.contains("java.lang.Integer"));
        assert!(registry.contains("java.lang.Character"));
        assert!(registry.contains("java.lang.annotation.Annotation"));

        let integer = registry.descriptor("java.lang.Integer").unwrap();
        assert_eq!(integer.supertypes()[0], TypeRef::class("java.lang.Number"));
        assert_eq!(integer.constructors().len(), 2);
    }

    #[test]
    fn test_insert_replaces() {
        let mut registry = TypeRegistry::new();
        assert!(registry.insert(ClassSpec::class("a.B")).is_none());
        assert!(registry.insert(ClassSpec::interface("a.B")).is_some());
        assert_eq!(registry.len(), 1);
        assert!(registry.descriptor("a.B").unwrap().is_interface());
    }

    #[test]
    fn test_iteration_order() {
        let registry = TypeRegistry::new()
            .with(ClassSpec::class("z.Last"))
            .with(ClassSpec::class("a.First"));

        let names: Vec<_> = registry.iter().map(|t| t.qualified_name().to_string()).collect();
        assert_eq!(names, vec!["z.Last", "a.First"]);
    }

    #[test]
    fn test_find_method_walks_supertypes() {
        let registry = TypeRegistry::with_builtins().with(
            ClassSpec::class("com.example.Task").implements(TypeRef::class("java.lang.Runnable")),
        );
        let task = TypeRef::class("com.example.Task");

        assert!(registry.find_method(&task, "run").is_some());
        let to_string = registry.find_method(&task, "toString").unwrap();
        assert_eq!(to_string.returns, Some(TypeRef::string()));
        assert!(registry.find_method(&task, "close").is_none());
    }
}
