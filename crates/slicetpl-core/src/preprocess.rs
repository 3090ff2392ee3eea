//! Slice-syntax preprocessor -- rewrite `name[1:-1]` into `name | slice(1,-1)`.
//!
//! minijinja templates are rewritten before they are compiled so authors can
//! use Python-style bracket slicing and have it routed through the
//! index-aware [`slice`](crate::filters::slice) filter.
//!
//! # Rewrite rules
//!
//! Rules run in order over the whole template text:
//!
//! | Input        | Output             |
//! |--------------|--------------------|
//! | `x[1:-1]`    | `x \| slice(1,-1)` |
//! | `x[:3]`      | `x \| slice(0,3)`  |
//! | `x[3:]`      | `x \| slice(3)`    |
//! | `x[:]`       | `x \| slice(0)`    |
//! | `x[2]`       | `x \| slice(2,3)`  |
//! | `x[-2]`      | `x \| slice(-2,-1)`|
//!
//! A point index is always the unit range `(i, i+1)`. That makes `x[-1]`
//! `slice(-1,0)`, which is empty; use `x[-1:]` for the last element.
//!
//! A bracket pair is only rewritten when it directly follows something that
//! can be subscripted: an identifier character, a closing `)` or `]`, or a
//! closing quote. List literals such as `{% for i in [1, 2] %}` are left
//! alone, and so is the preprocessor's own `| slice(...)` output.

use log::debug;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// One rewrite performed by [`rewrites`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Name of the rule that fired (`"range"` or `"index"`).
    pub rule: &'static str,
    /// The bracket text that was matched, e.g. `[1:-1]`.
    pub original: String,
    /// The filter-call fragment it became, e.g. ` | slice(1,-1)`.
    pub replacement: String,
}

/// A declarative rewrite rule: a bracket pattern plus the function that turns
/// its captures into a `| slice(...)` fragment.
///
/// The rewrite function returns `None` to leave a match untouched (for
/// example when an integer does not fit in `i64`).
struct Rule {
    name: &'static str,
    pattern: Regex,
    rewrite: fn(&Captures<'_>) -> Option<String>,
}

/// Range patterns come first so `[1:2]` is never seen as two point indexes.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule {
            name: "range",
            pattern: Regex::new(r"\[\s*(-?\d*)\s*:\s*(-?\d*)\s*\]").expect("range pattern is valid"),
            rewrite: rewrite_range,
        },
        Rule {
            name: "index",
            pattern: Regex::new(r"\[\s*(-?\d+)\s*\]").expect("index pattern is valid"),
            rewrite: rewrite_index,
        },
    ]
});

/// Rewrite every bracket-slice expression in `source` into a `slice` filter
/// call. Text that does not match is passed through unchanged.
///
/// # Examples
///
/// ```
/// use slicetpl_core::preprocess;
///
/// assert_eq!(preprocess("{{ name[1:-1] }}"), "{{ name | slice(1,-1) }}");
/// assert_eq!(preprocess("{{ x[2] }}"), "{{ x | slice(2,3) }}");
/// assert_eq!(preprocess("no slices here"), "no slices here");
/// ```
pub fn preprocess(source: &str) -> String {
    run_rules(source, &mut |_| {})
}

/// Like [`preprocess`], but report each rewrite instead of the final text.
///
/// Rewrites are listed in rule order, then in order of appearance.
pub fn rewrites(source: &str) -> Vec<Rewrite> {
    let mut found = Vec::new();
    run_rules(source, &mut |rewrite| found.push(rewrite));
    found
}

fn run_rules(source: &str, on_rewrite: &mut dyn FnMut(Rewrite)) -> String {
    let mut text = source.to_string();
    for rule in RULES.iter() {
        let input = text;
        text = rule
            .pattern
            .replace_all(&input, |caps: &Captures<'_>| {
                let whole = &caps[0];
                let start = caps.get(0).map_or(0, |m| m.start());
                if !follows_subscriptable(&input[..start]) {
                    return whole.to_string();
                }
                match (rule.rewrite)(caps) {
                    Some(replacement) => {
                        debug!("rewrite {} {:?} -> {:?}", rule.name, whole, replacement);
                        on_rewrite(Rewrite {
                            rule: rule.name,
                            original: whole.to_string(),
                            replacement: replacement.clone(),
                        });
                        replacement
                    }
                    None => whole.to_string(),
                }
            })
            .into_owned();
    }
    text
}

/// Whether the text right before a `[` ends in something a subscript can
/// apply to.
fn follows_subscriptable(before: &str) -> bool {
    match before.chars().next_back() {
        Some(c) => c.is_alphanumeric() || matches!(c, '_' | ')' | ']' | '\'' | '"'),
        None => false,
    }
}

fn rewrite_range(caps: &Captures<'_>) -> Option<String> {
    let start = parse_bound(&caps[1])?.unwrap_or(0);
    match parse_bound(&caps[2])? {
        Some(end) => Some(format!(" | slice({},{})", start, end)),
        None => Some(format!(" | slice({})", start)),
    }
}

fn rewrite_index(caps: &Captures<'_>) -> Option<String> {
    let index: i64 = caps[1].parse().ok()?;
    // Always `(i, i+1)`, so `[-1]` becomes `slice(-1,0)` and is empty.
    let end = index.checked_add(1)?;
    Some(format!(" | slice({},{})", index, end))
}

/// Parse an optional bound. `Some(None)` means the bound was omitted,
/// `None` means it does not fit in `i64`.
fn parse_bound(raw: &str) -> Option<Option<i64>> {
    if raw.is_empty() {
        return Some(None);
    }
    raw.parse().ok().map(Some)
}
