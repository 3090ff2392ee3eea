/// Filter tests: `slice`, `substring` and `dump` called directly.
///
/// Checks Python-style negative indexes and clamping for `slice`, the
/// JavaScript-flavoured bound handling of `substring`, and JSON output of
/// `dump`, including the identity fallback for values that cannot be sliced.
use minijinja::Value;
use serde_json::json;
use slicetpl_core::filters::{dump, slice, substring};
use slicetpl_core::sliceable::resolve_bounds;
use slicetpl_core::Sliceable;

fn s(text: &str) -> Value {
    Value::from(text)
}

fn list(items: &[&'static str]) -> Value {
    Value::from(items.to_vec())
}

// ============================================================================
// 1. Bound resolution
// ============================================================================

#[test]
fn resolve_bounds_defaults_end_to_length() {
    assert_eq!(resolve_bounds(6, 2, None), 2..6);
}

#[test]
fn resolve_bounds_wraps_negative_indexes() {
    assert_eq!(resolve_bounds(6, -2, None), 4..6);
    assert_eq!(resolve_bounds(6, 1, Some(-1)), 1..5);
}

#[test]
fn resolve_bounds_clamps_out_of_range() {
    assert_eq!(resolve_bounds(3, -10, Some(10)), 0..3);
    assert_eq!(resolve_bounds(3, 5, None), 3..3);
    assert_eq!(resolve_bounds(0, 0, Some(1)), 0..0);
}

#[test]
fn resolve_bounds_empty_when_start_after_end() {
    assert_eq!(resolve_bounds(6, 4, Some(1)), 4..4);
}

#[test]
fn resolve_bounds_survives_extreme_values() {
    assert_eq!(resolve_bounds(4, i64::MIN, Some(i64::MAX)), 0..4);
    assert_eq!(resolve_bounds(4, i64::MAX, Some(i64::MIN)), 4..4);
}

// ============================================================================
// 2. Classification
// ============================================================================

#[test]
fn classify_sorts_values_by_shape() {
    assert!(matches!(Sliceable::classify(s("abc")), Sliceable::Text(t) if t == "abc"));
    assert!(matches!(Sliceable::classify(list(&["a"])), Sliceable::List(v) if v.len() == 1));
    assert!(matches!(Sliceable::classify(Value::from(42)), Sliceable::Other(_)));
    assert!(matches!(Sliceable::classify(Value::from(())), Sliceable::Other(_)));
}

#[test]
fn text_length_counts_characters() {
    assert_eq!(Sliceable::classify(s("héllo")).len(), Some(5));
}

// ============================================================================
// 3. slice
// ============================================================================

#[test]
fn slice_string_drops_first_and_last() {
    assert_eq!(slice(s("World"), 1, Some(-1)), s("orl"));
}

#[test]
fn slice_string_open_end() {
    assert_eq!(slice(s("abcdef"), 3, None), s("def"));
}

#[test]
fn slice_string_last_three() {
    assert_eq!(slice(s("abcdef"), -3, None), s("def"));
    assert_eq!(slice(s("ab"), -3, None), s("ab"));
}

#[test]
fn slice_unit_range_returns_one_char_string() {
    assert_eq!(slice(s("abcdef"), 2, Some(3)), s("c"));
}

#[test]
fn slice_string_by_characters_not_bytes() {
    assert_eq!(slice(s("héllo wörld"), 1, Some(3)), s("él"));
    assert_eq!(slice(s("日本語"), -1, None), s("語"));
}

#[test]
fn slice_out_of_range_is_clamped() {
    assert_eq!(slice(s("abc"), -100, Some(2)), s("ab"));
    assert_eq!(slice(s("abc"), 1, Some(100)), s("bc"));
    assert_eq!(slice(s("abc"), 10, None), s(""));
}

#[test]
fn slice_start_after_end_is_empty() {
    assert_eq!(slice(s("abcdef"), 4, Some(2)), s(""));
}

#[test]
fn slice_list_by_element() {
    let items = list(&["a", "b", "c", "d"]);
    assert_eq!(slice(items.clone(), -2, None), list(&["c", "d"]));
    assert_eq!(slice(items.clone(), 0, Some(1)), list(&["a"]));
    assert_eq!(slice(items, 1, Some(-1)), list(&["b", "c"]));
}

#[test]
fn slice_full_range_is_identity() {
    let items = list(&["x", "y", "z"]);
    assert_eq!(slice(items.clone(), 0, Some(3)), items);
}

#[test]
fn slice_leaves_input_untouched() {
    let items = list(&["a", "b", "c"]);
    let _ = slice(items.clone(), 0, Some(1));
    assert_eq!(items, list(&["a", "b", "c"]));
}

#[test]
fn slice_non_collection_is_identity() {
    assert_eq!(slice(Value::from(42), 0, Some(1)), Value::from(42));
    assert_eq!(slice(Value::from(true), 0, None), Value::from(true));
    let map = Value::from_serialize(json!({"a": 1}));
    assert_eq!(slice(map.clone(), 0, Some(1)), map);
}

// ============================================================================
// 4. substring
// ============================================================================

#[test]
fn substring_with_plain_bounds() {
    assert_eq!(substring(s("abcdef"), 1, Some(3)), s("bc"));
    assert_eq!(substring(s("abcdef"), 2, None), s("cdef"));
}

#[test]
fn substring_swaps_reversed_bounds() {
    assert_eq!(substring(s("abcdef"), 3, Some(1)), s("bc"));
}

#[test]
fn substring_negative_start_without_end_takes_tail() {
    assert_eq!(substring(s("abcdef"), -3, None), s("def"));
}

#[test]
fn substring_treats_negative_bounds_as_zero_when_end_given() {
    assert_eq!(substring(s("abcdef"), -3, Some(2)), s("ab"));
    // end -1 becomes 0, then the bounds swap.
    assert_eq!(substring(s("abcdef"), 2, Some(-1)), s("ab"));
}

#[test]
fn substring_diverges_from_slice_on_negative_end() {
    assert_eq!(slice(s("World"), 1, Some(-1)), s("orl"));
    assert_eq!(substring(s("World"), 1, Some(-1)), s("W"));
}

#[test]
fn substring_clamps_past_length() {
    assert_eq!(substring(s("abc"), 1, Some(50)), s("bc"));
}

#[test]
fn substring_non_string_is_identity() {
    let items = list(&["a", "b"]);
    assert_eq!(substring(items.clone(), 0, Some(1)), items);
    assert_eq!(substring(Value::from(7), 0, Some(1)), Value::from(7));
}

// ============================================================================
// 5. dump
// ============================================================================

#[test]
fn dump_compact_by_default() {
    assert_eq!(dump(list(&["c", "d"]), None).unwrap(), r#"["c","d"]"#);
    assert_eq!(dump(s("hi"), None).unwrap(), r#""hi""#);
    assert_eq!(dump(Value::from(()), None).unwrap(), "null");
}

#[test]
fn dump_pretty_with_indent() {
    let value = Value::from_serialize(json!({"a": [1, 2]}));
    assert_eq!(dump(value, Some(2)).unwrap(), "{\n  \"a\": [\n    1,\n    2\n  ]\n}");
}

#[test]
fn dump_zero_indent_is_compact() {
    let value = Value::from_serialize(json!([1, 2]));
    assert_eq!(dump(value, Some(0)).unwrap(), "[1,2]");
}

#[test]
fn slice_lazy_iterable_by_element() {
    let env = minijinja::Environment::new();
    let reversed = env.compile_expression("[1, 2, 3] | reverse").unwrap().eval(()).unwrap();
    assert!(matches!(Sliceable::classify(reversed.clone()), Sliceable::List(v) if v.len() == 3));
    assert_eq!(slice(reversed, 0, Some(2)), Value::from(vec![3, 2]));
}

#[test]
fn dump_keeps_key_order() {
    let value = Value::from_serialize(json!({"zeta": 1, "alpha": 2}));
    assert_eq!(dump(value, None).unwrap(), r#"{"zeta":1,"alpha":2}"#);
}
