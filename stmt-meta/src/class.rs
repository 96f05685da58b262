//! In-memory type descriptors.
//!
//! [`ClassSpec`] is a declarative description of a nominal type, built with
//! the same fluent style used throughout the crate. It implements
//! [`TypeDescriptor`] so it can be handed to builders directly.

use crate::{TypeDescriptor, TypeRef};

/// A declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,
    /// Declared field type.
    pub ty: TypeRef,
}

impl FieldSpec {
    /// Create a new field.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A declared constructor, identified by its ordered parameter types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorSpec {
    /// Parameter types in declaration order.
    pub params: Vec<TypeRef>,
}

impl ConstructorSpec {
    /// Create a constructor taking the given parameter types.
    pub fn new(params: impl IntoIterator<Item = TypeRef>) -> Self {
        Self {
            params: params.into_iter().collect(),
        }
    }

    /// The zero-argument constructor.
    pub fn no_args() -> Self {
        Self::default()
    }

    /// Number of parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A declared method signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    /// Method name.
    pub name: String,
    /// Return type (`None` for `void`).
    pub returns: Option<TypeRef>,
    /// Parameter types in declaration order.
    pub params: Vec<TypeRef>,
}

impl MethodSpec {
    /// Create a `void` method with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            returns: None,
            params: Vec::new(),
        }
    }

    /// Set the return type.
    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.returns = Some(ty);
        self
    }

    /// Add a parameter type.
    pub fn param(mut self, ty: TypeRef) -> Self {
        self.params.push(ty);
        self
    }
}

/// A declarative specification for a class or interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSpec {
    /// Fully qualified name.
    pub name: String,
    /// Whether this is an interface.
    pub interface: bool,
    /// Superclass, if any besides the root class.
    pub superclass: Option<TypeRef>,
    /// Implemented (or, for interfaces, extended) interfaces.
    pub interfaces: Vec<TypeRef>,
    /// Declared fields.
    pub fields: Vec<FieldSpec>,
    /// Declared constructors.
    pub constructors: Vec<ConstructorSpec>,
    /// Declared methods.
    pub methods: Vec<MethodSpec>,
}

impl ClassSpec {
    /// Create a new class spec.
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interface: false,
            superclass: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Create a new interface spec.
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            interface: true,
            ..Self::class(name)
        }
    }

    /// Set the superclass.
    pub fn extends(mut self, ty: TypeRef) -> Self {
        self.superclass = Some(ty);
        self
    }

    /// Add an implemented interface.
    pub fn implements(mut self, ty: TypeRef) -> Self {
        self.interfaces.push(ty);
        self
    }

    /// Add a field.
    pub fn field(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.fields.push(FieldSpec::new(name, ty));
        self
    }

    /// Add a constructor with the given parameter types.
    pub fn constructor(mut self, params: impl IntoIterator<Item = TypeRef>) -> Self {
        self.constructors.push(ConstructorSpec::new(params));
        self
    }

    /// Add a method.
    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }

    /// Check if this spec declares any constructors.
    pub fn has_constructors(&self) -> bool {
        !self.constructors.is_empty()
    }
}

impl TypeDescriptor for ClassSpec {
    fn qualified_name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    fn constructors(&self) -> &[ConstructorSpec] {
        &self.constructors
    }

    fn is_interface(&self) -> bool {
        self.interface
    }

    fn supertypes(&self) -> Vec<TypeRef> {
        self.superclass
            .iter()
            .chain(self.interfaces.iter())
            .cloned()
            .collect()
    }

    fn methods(&self) -> &[MethodSpec] {
        &self.methods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_spec() {
        let spec = ClassSpec::class("com.example.Point")
            .implements(TypeRef::class("java.io.Serializable"))
            .field("x", TypeRef::int())
            .field("y", TypeRef::int())
            .constructor([TypeRef::int(), TypeRef::int()])
            .method(MethodSpec::new("toString").returns(TypeRef::string()));

        assert_eq!(spec.qualified_name(), "com.example.Point");
        assert!(!spec.is_interface());
        assert_eq!(spec.fields().len(), 2);
        assert_eq!(spec.constructors()[0].arity(), 2);
        assert_eq!(spec.supertypes(), vec![TypeRef::class("java.io.Serializable")]);
    }

    #[test]
    fn test_implicit_default_constructor() {
        let plain = ClassSpec::class("com.example.Plain");
        assert!(plain.has_implicit_default_constructor());

        let iface = ClassSpec::interface("com.example.Shape");
        assert!(!iface.has_implicit_default_constructor());

        let explicit = ClassSpec::class("com.example.Sized").constructor([TypeRef::int()]);
        assert!(!explicit.has_implicit_default_constructor());
    }

    #[test]
    fn test_find_method() {
        let spec = ClassSpec::interface("java.lang.annotation.Annotation").method(
            MethodSpec::new("annotationType").returns(TypeRef::class("java.lang.Class")),
        );

        assert!(spec.find_method("annotationType").is_some());
        assert!(spec.find_method("hashCode").is_none());
    }
}
