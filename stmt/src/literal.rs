//! Command-line literal syntax.
//!
//! | Argument      | Value                          |
//! |---------------|--------------------------------|
//! | `10`          | `int`                          |
//! | `10L`         | `long`                         |
//! | `1.5`         | `double`                       |
//! | `1.5f`        | `float`                        |
//! | `'c'`         | `char`                         |
//! | `"text"`      | `java.lang.String`             |
//! | `true`        | `boolean`                      |
//! | `null`        | null                           |
//! | `int:10`      | text `10` pinned to `int`      |
//!
//! Anything else is taken as a string.

use std::str::FromStr;

use stmtgen_codegen::builder::Value;
use stmtgen_meta::TypeRef;

/// Parse one command-line argument into a builder value.
pub fn parse_value(text: &str) -> Value<'static> {
    match text {
        "null" => return Value::null(),
        "true" => return true.into(),
        "false" => return false.into(),
        _ => {}
    }

    if let Some(inner) = strip_quotes(text, '"') {
        return inner.into();
    }
    if let Some(c) = strip_quotes(text, '\'').and_then(single_char) {
        return c.into();
    }
    if let Some((ty, rest)) = split_type_hint(text) {
        return Value::typed(ty, rest);
    }

    parse_number(text).unwrap_or_else(|| text.into())
}

fn strip_quotes(text: &str, quote: char) -> Option<&str> {
    text.strip_prefix(quote)?.strip_suffix(quote)
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

fn split_type_hint(text: &str) -> Option<(TypeRef, &str)> {
    let (ty, rest) = text.split_once(':')?;
    TypeRef::from_str(ty).ok().map(|ty| (ty, rest))
}

fn parse_number(text: &str) -> Option<Value<'static>> {
    if !text.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '.') {
        return None;
    }

    if let Some(digits) = text.strip_suffix(['L', 'l']) {
        return digits.parse::<i64>().ok().map(Value::from);
    }
    if let Some(digits) = text.strip_suffix(['F', 'f']) {
        return digits.parse::<f32>().ok().map(Value::from);
    }
    if let Ok(v) = text.parse::<i32>() {
        return Some(v.into());
    }
    if let Ok(v) = text.parse::<i64>() {
        return Some(v.into());
    }
    text.parse::<f64>().ok().map(Value::from)
}
