//! Literal values and their source text.

use stmtgen_meta::{PrimitiveType, TypeRef};

use crate::error::LiteralParseError;

/// A literal scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
}

impl LiteralValue {
    /// The narrowest type that holds this value as written.
    pub fn natural_type(&self) -> TypeRef {
        match self {
            Self::Null => TypeRef::Null,
            Self::Bool(_) => PrimitiveType::Boolean.into(),
            Self::Byte(_) => PrimitiveType::Byte.into(),
            Self::Short(_) => PrimitiveType::Short.into(),
            Self::Char(_) => PrimitiveType::Char.into(),
            Self::Int(_) => PrimitiveType::Int.into(),
            Self::Long(_) => PrimitiveType::Long.into(),
            Self::Float(_) => PrimitiveType::Float.into(),
            Self::Double(_) => PrimitiveType::Double.into(),
            Self::String(_) => TypeRef::string(),
        }
    }

    /// Parse literal text under the rules of a primitive type.
    ///
    /// Numeric suffixes (`10L`, `1.5f`, `2.0d`) are accepted for the
    /// matching widths.
    pub fn parse_as(text: &str, ty: PrimitiveType) -> Result<Self, LiteralParseError> {
        let text = text.trim();
        let value = match ty {
            PrimitiveType::Boolean => Self::Bool(text.parse()?),
            PrimitiveType::Byte => Self::Byte(text.parse()?),
            PrimitiveType::Short => Self::Short(text.parse()?),
            PrimitiveType::Char => Self::Char(text.parse()?),
            PrimitiveType::Int => Self::Int(text.parse()?),
            PrimitiveType::Long => Self::Long(strip_suffix(text, 'L').parse()?),
            PrimitiveType::Float => Self::Float(strip_suffix(text, 'F').parse()?),
            PrimitiveType::Double => Self::Double(strip_suffix(text, 'D').parse()?),
        };
        Ok(value)
    }

    /// Render as source text.
    pub fn render(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(v) => v.to_string(),
            Self::Byte(v) => format!("(byte) {}", v),
            Self::Short(v) => format!("(short) {}", v),
            Self::Char(c) => format!("'{}'", escape_char(*c)),
            Self::Int(v) => v.to_string(),
            Self::Long(v) => format!("{}L", v),
            Self::Float(v) => render_float(*v, "Float", "f"),
            Self::Double(v) => render_float(*v, "Double", ""),
            Self::String(s) => {
                let escaped: String = s.chars().map(escape_char).collect();
                format!("\"{}\"", escaped)
            }
        }
    }
}

fn strip_suffix(text: &str, suffix: char) -> &str {
    text.strip_suffix(suffix)
        .or_else(|| text.strip_suffix(suffix.to_ascii_lowercase()))
        .unwrap_or(text)
}

fn render_float<F: Copy + Into<f64> + ToString>(value: F, boxed: &str, suffix: &str) -> String {
    let v: f64 = value.into();
    if v.is_nan() {
        return format!("{}.NaN", boxed);
    }
    if v.is_infinite() {
        let sign = if v > 0.0 { "POSITIVE" } else { "NEGATIVE" };
        return format!("{}.{}_INFINITY", boxed, sign);
    }
    let s = value.to_string();
    // Ensure float has decimal point
    if s.contains('.') {
        format!("{}{}", s, suffix)
    } else {
        format!("{}.0{}", s, suffix)
    }
}

fn escape_char(c: char) -> String {
    match c {
        '\\' => "\\\\".to_string(),
        '"' => "\\\"".to_string(),
        '\'' => "\\'".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

macro_rules! literal_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for LiteralValue {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

literal_from! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    char => Char,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
    &str => String,
}

/// A literal value with its static type.
///
/// The type defaults to the value's natural type and may be pinned to a
/// wider declared type by coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    value: LiteralValue,
    ty: TypeRef,
}

impl Literal {
    /// Create a literal with its natural type.
    pub fn new(value: impl Into<LiteralValue>) -> Self {
        let value = value.into();
        let ty = value.natural_type();
        Self { value, ty }
    }

    /// Create a literal with an explicit type.
    pub fn typed(value: impl Into<LiteralValue>, ty: TypeRef) -> Self {
        Self {
            value: value.into(),
            ty,
        }
    }

    /// The literal value.
    pub fn value(&self) -> &LiteralValue {
        &self.value
    }

    /// The static type.
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// Render as source text.
    pub fn render(&self) -> String {
        self.value.render()
    }
}
