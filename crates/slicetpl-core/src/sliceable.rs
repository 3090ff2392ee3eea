//! Explicit dispatch over the value shapes the slicing filters understand.
//!
//! Template values arrive as dynamically typed [`minijinja::Value`]s. Rather
//! than probing them ad hoc in every filter, [`Sliceable::classify`] sorts
//! them once into text, list, or anything else, and the shared index
//! arithmetic lives in [`resolve_bounds`].

use minijinja::value::{Value, ValueKind};
use std::ops::Range;

/// A template value sorted by how it can be sliced.
#[derive(Debug, Clone)]
pub enum Sliceable {
    /// A string, sliced by characters (Unicode scalar values).
    Text(String),
    /// A sequence or other ordered iterable, sliced by element.
    List(Vec<Value>),
    /// Anything else. Slicing returns it unchanged.
    Other(Value),
}

impl Sliceable {
    /// Sort a template value into one of the three shapes.
    pub fn classify(value: Value) -> Self {
        match value.kind() {
            ValueKind::String => match value.as_str() {
                Some(s) => Sliceable::Text(s.to_string()),
                None => Sliceable::Other(value),
            },
            // `range()` and `reverse` hand back lazy iterables rather than seqs.
            ValueKind::Seq | ValueKind::Iterable => match value.try_iter() {
                Ok(items) => Sliceable::List(items.collect()),
                Err(_) => Sliceable::Other(value),
            },
            _ => Sliceable::Other(value),
        }
    }

    /// Number of characters or elements. `None` for [`Sliceable::Other`].
    pub fn len(&self) -> Option<usize> {
        match self {
            Sliceable::Text(s) => Some(s.chars().count()),
            Sliceable::List(items) => Some(items.len()),
            Sliceable::Other(_) => None,
        }
    }

    /// Take the half-open range `range` out of the value.
    ///
    /// The range must already be resolved against [`Sliceable::len`];
    /// anything past the end is dropped rather than panicking.
    pub fn take(self, range: Range<usize>) -> Value {
        let count = range.end.saturating_sub(range.start);
        match self {
            Sliceable::Text(s) => Value::from(s.chars().skip(range.start).take(count).collect::<String>()),
            Sliceable::List(items) => {
                Value::from(items.into_iter().skip(range.start).take(count).collect::<Vec<_>>())
            }
            Sliceable::Other(value) => value,
        }
    }

    /// Hand the value back to the template engine unchanged.
    pub fn into_value(self) -> Value {
        match self {
            Sliceable::Text(s) => Value::from(s),
            Sliceable::List(items) => Value::from(items),
            Sliceable::Other(value) => value,
        }
    }
}

/// Resolve Python-style bounds against a length.
///
/// An omitted `end` means `len`. Negative bounds count back from `len`.
/// Both bounds are then clamped into `0..=len`, and a start past the end
/// gives an empty range.
///
/// ```
/// use slicetpl_core::sliceable::resolve_bounds;
///
/// assert_eq!(resolve_bounds(5, 1, Some(-1)), 1..4);
/// assert_eq!(resolve_bounds(5, -3, None), 2..5);
/// assert_eq!(resolve_bounds(5, -100, Some(100)), 0..5);
/// assert_eq!(resolve_bounds(5, 4, Some(2)), 4..4);
/// ```
pub fn resolve_bounds(len: usize, start: i64, end: Option<i64>) -> Range<usize> {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let wrap = |i: i64| if i < 0 { len_i.saturating_add(i) } else { i };

    let start = wrap(start).clamp(0, len_i) as usize;
    let end = end.map_or(len_i, wrap).clamp(0, len_i) as usize;
    start..end.max(start)
}
