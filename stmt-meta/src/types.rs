//! Type references for generated source.
//!
//! [`TypeRef`] is a cheap, comparable handle to a type as it is spelled in
//! emitted code. Structural information (fields, constructors, supertypes)
//! lives behind [`TypeDescriptor`](crate::TypeDescriptor) and is looked up
//! by qualified name through a [`TypeProvider`](crate::TypeProvider).

use std::{fmt, str::FromStr};

/// Qualified name of the root class.
pub const OBJECT: &str = "java.lang.Object";
/// Qualified name of the string class.
pub const STRING: &str = "java.lang.String";
/// Qualified name of the class-literal type.
pub const CLASS: &str = "java.lang.Class";

/// A language-level primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    /// All primitive types, in widening order.
    pub const ALL: [PrimitiveType; 8] = [
        Self::Boolean,
        Self::Byte,
        Self::Short,
        Self::Char,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
    ];

    /// Source keyword for this primitive.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Char => "char",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Qualified name of the boxed counterpart.
    pub fn boxed_name(&self) -> &'static str {
        match self {
            Self::Boolean => "java.lang.Boolean",
            Self::Byte => "java.lang.Byte",
            Self::Short => "java.lang.Short",
            Self::Char => "java.lang.Character",
            Self::Int => "java.lang.Integer",
            Self::Long => "java.lang.Long",
            Self::Float => "java.lang.Float",
            Self::Double => "java.lang.Double",
        }
    }

    /// Look up a primitive by its keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == keyword)
    }

    /// Look up the primitive whose boxed class has the given qualified name.
    pub fn from_boxed_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.boxed_name() == name)
    }

    /// Check if this is a numeric type (`char` counts, `boolean` does not).
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Boolean)
    }

    /// Check if a value of this type can be used where `target` is expected
    /// through identity or a widening primitive conversion.
    pub fn widens_to(&self, target: PrimitiveType) -> bool {
        use PrimitiveType::*;

        if *self == target {
            return true;
        }
        match self {
            Byte => matches!(target, Short | Int | Long | Float | Double),
            Short | Char => matches!(target, Int | Long | Float | Double),
            Int => matches!(target, Long | Float | Double),
            Long => matches!(target, Float | Double),
            Float => matches!(target, Double),
            Boolean | Double => false,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A reference to a type as it appears in generated code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A primitive type (`int`, `boolean`, ...).
    Primitive(PrimitiveType),
    /// A nominal class or interface, by qualified name.
    Class(String),
    /// An array of the inner type.
    Array(Box<TypeRef>),
    /// The type of the `null` literal.
    Null,
}

impl TypeRef {
    /// Create a primitive type reference.
    pub fn primitive(ty: PrimitiveType) -> Self {
        Self::Primitive(ty)
    }

    /// Create a class type reference.
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    /// Create an array type reference.
    pub fn array(inner: TypeRef) -> Self {
        Self::Array(Box::new(inner))
    }

    /// Convenience: `java.lang.Object`.
    pub fn object() -> Self {
        Self::class(OBJECT)
    }

    /// Convenience: `java.lang.String`.
    pub fn string() -> Self {
        Self::class(STRING)
    }

    /// Convenience: `int`.
    pub fn int() -> Self {
        Self::Primitive(PrimitiveType::Int)
    }

    /// Convenience: `long`.
    pub fn long() -> Self {
        Self::Primitive(PrimitiveType::Long)
    }

    /// Convenience: `double`.
    pub fn double() -> Self {
        Self::Primitive(PrimitiveType::Double)
    }

    /// Convenience: `boolean`.
    pub fn boolean() -> Self {
        Self::Primitive(PrimitiveType::Boolean)
    }

    /// Convenience: `char`.
    pub fn char() -> Self {
        Self::Primitive(PrimitiveType::Char)
    }

    /// Check if this is a primitive type.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Check if values of this type are references (class, array or null).
    pub fn is_reference(&self) -> bool {
        !self.is_primitive()
    }

    /// The primitive behind this type, unboxing boxed classes.
    pub fn unboxed(&self) -> Option<PrimitiveType> {
        match self {
            Self::Primitive(p) => Some(*p),
            Self::Class(name) => PrimitiveType::from_boxed_name(name),
            _ => None,
        }
    }

    /// Qualified name for class types.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Self::Class(name) => Some(name),
            _ => None,
        }
    }

    /// Element type for array types.
    pub fn element_type(&self) -> Option<&TypeRef> {
        match self {
            Self::Array(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<PrimitiveType> for TypeRef {
    fn from(ty: PrimitiveType) -> Self {
        Self::Primitive(ty)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{}", p),
            Self::Class(name) => f.write_str(name),
            Self::Array(inner) => write!(f, "{}[]", inner),
            Self::Null => f.write_str("null"),
        }
    }
}

/// Error returned when a type spelling cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTypeRefError {
    pub input: String,
    pub reason: &'static str,
}

impl fmt::Display for ParseTypeRefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid type '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for ParseTypeRefError {}

impl FromStr for TypeRef {
    type Err = ParseTypeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| ParseTypeRefError {
            input: s.to_string(),
            reason,
        };

        let trimmed = s.trim();
        if let Some(inner) = trimmed.strip_suffix("[]") {
            return inner.parse::<TypeRef>().map(TypeRef::array).map_err(|e| err(e.reason));
        }
        if trimmed.is_empty() {
            return Err(err("type name is empty"));
        }
        if trimmed == "null" {
            return Err(err("'null' is not a declarable type"));
        }
        if let Some(p) = PrimitiveType::from_keyword(trimmed) {
            return Ok(TypeRef::Primitive(p));
        }

        for segment in trimmed.split('.') {
            let mut chars = segment.chars();
            match chars.next() {
                None => return Err(err("empty name segment")),
                Some(c) if !(c.is_alphabetic() || c == '_' || c == '$') => {
                    return Err(err("name segments must start with a letter"));
                }
                _ => {}
            }
            if !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
                return Err(err("name segments may only contain letters, digits, '_' and '$'"));
            }
        }
        Ok(TypeRef::Class(trimmed.to_string()))
    }
}
