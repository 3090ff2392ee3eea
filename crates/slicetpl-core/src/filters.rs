//! Index-aware template filters: `slice`, `substring` and `dump`.
//!
//! These are plain functions with minijinja-compatible signatures. They are
//! registered on an environment by [`crate::render::build_environment`].
//!
//! ```jinja
//! {{ name | slice(1, -1) }}      {# Python: name[1:-1] #}
//! {{ name | substring(-3) }}     {# last three characters #}
//! {{ items | slice(-2) | dump }} {# ["c","d"] #}
//! ```

use crate::sliceable::{resolve_bounds, Sliceable};
use minijinja::value::Value;
use minijinja::{Error, ErrorKind};
use serde::Serialize;

/// Python-style slice of a string or sequence.
///
/// Negative bounds count from the end, an omitted `end` means "to the end",
/// and out-of-range bounds are clamped. Values that are neither strings nor
/// sequences are returned unchanged.
///
/// ```
/// use minijinja::Value;
/// use slicetpl_core::filters::slice;
///
/// assert_eq!(slice(Value::from("World"), 1, Some(-1)), Value::from("orl"));
/// assert_eq!(slice(Value::from(42), 0, Some(1)), Value::from(42));
/// ```
pub fn slice(value: Value, start: i64, end: Option<i64>) -> Value {
    let target = Sliceable::classify(value);
    match target.len() {
        Some(len) => {
            let range = resolve_bounds(len, start, end);
            target.take(range)
        }
        None => target.into_value(),
    }
}

/// JavaScript-style `substring` of a string.
///
/// With no `end` and a negative `start` this behaves like [`slice`] and
/// returns the last `-start` characters. Otherwise negative bounds count as
/// `0`, both bounds are clamped to the length, and a `start` greater than
/// `end` swaps the two. Non-string values are returned unchanged.
pub fn substring(value: Value, start: i64, end: Option<i64>) -> Value {
    let target = Sliceable::classify(value);
    let len = match &target {
        Sliceable::Text(s) => s.chars().count(),
        _ => return target.into_value(),
    };
    if end.is_none() && start < 0 {
        return target.take(resolve_bounds(len, start, None));
    }

    let clamp = |i: i64| i.clamp(0, i64::try_from(len).unwrap_or(i64::MAX)) as usize;
    let a = clamp(start);
    let b = end.map_or(len, clamp);
    target.take(a.min(b)..a.max(b))
}

/// Serialize a value to JSON text.
///
/// With a non-zero `indent` the output is pretty-printed using that many
/// spaces per level; without it, or with `0`, the output is compact.
pub fn dump(value: Value, indent: Option<usize>) -> Result<String, Error> {
    let result = match indent {
        None | Some(0) => serde_json::to_string(&value),
        Some(width) => to_json_indented(&value, width),
    };
    result.map_err(|err| {
        Error::new(ErrorKind::InvalidOperation, "cannot serialize value to JSON").with_source(err)
    })
}

fn to_json_indented(value: &Value, width: usize) -> serde_json::Result<String> {
    let indent = " ".repeat(width);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
