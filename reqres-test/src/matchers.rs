//! JSON comparison and value patterns used by expectations.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// Strict structural equality.
pub fn deep_equal(expected: &Value, actual: &Value) -> bool {
    expected == actual
}

/// Partial match: every top-level member of `expected` must be present in
/// `actual` and deep-equal to it. Extra top-level members of `actual` are
/// tolerated; nested values are compared strictly.
///
/// For non-object values this is plain equality.
pub fn deep_include(expected: &Value, actual: &Value) -> bool {
    walk(String::new(), expected, Some(actual), true).is_none()
}

/// Where two JSON documents first diverge.
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    /// Path of the divergent node (`data[3].email`), empty for the root.
    pub path: String,
    /// Expected value at `path`, `None` when `actual` has an unexpected member.
    pub expected: Option<Value>,
    /// Actual value at `path`, `None` when it is missing.
    pub actual: Option<Value>,
}

impl std::fmt::Display for Difference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = if self.path.is_empty() { "<root>" } else { &self.path };
        let render = |v: &Option<Value>| {
            v.as_ref().map_or_else(|| "<missing>".to_string(), Value::to_string)
        };
        write!(
            f,
            "at `{path}`: expected {}, got {}",
            render(&self.expected),
            render(&self.actual)
        )
    }
}

/// First divergence between `expected` and `actual`.
///
/// With `subset` set, extra top-level members of `actual` are not reported
/// (the [`deep_include`] reading).
pub fn first_difference(expected: &Value, actual: &Value, subset: bool) -> Option<Difference> {
    walk(String::new(), expected, Some(actual), subset)
}

fn child(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn walk(
    path: String,
    expected: &Value,
    actual: Option<&Value>,
    subset: bool,
) -> Option<Difference> {
    let Some(actual) = actual else {
        return Some(Difference {
            path,
            expected: Some(expected.clone()),
            actual: None,
        });
    };
    match (expected, actual) {
        (Value::Object(exp), Value::Object(act)) => {
            for (key, value) in exp {
                if let Some(diff) = walk(child(&path, key), value, act.get(key), false) {
                    return Some(diff);
                }
            }
            if subset {
                return None;
            }
            act.iter()
                .find(|(key, _)| !exp.contains_key(*key))
                .map(|(key, value)| Difference {
                    path: child(&path, key),
                    expected: None,
                    actual: Some(value.clone()),
                })
        }
        (Value::Array(exp), Value::Array(act)) => {
            for (i, (e, a)) in exp.iter().zip(act).enumerate() {
                if let Some(diff) = walk(format!("{path}[{i}]"), e, Some(a), false) {
                    return Some(diff);
                }
            }
            let common = exp.len().min(act.len());
            (exp.len() != act.len()).then(|| Difference {
                path: format!("{path}[{common}]"),
                expected: exp.get(common).cloned(),
                actual: act.get(common).cloned(),
            })
        }
        (e, a) if e == a => None,
        (e, a) => Some(Difference {
            path,
            expected: Some(e.clone()),
            actual: Some(a.clone()),
        }),
    }
}

/// Shape constraints for server-generated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// One to three decimal digits, e.g. the `id` of a created user.
    ShortNumericId,
    /// `YYYY-MM-DDTHH:MM:SS.mmmZ`
    IsoTimestampMillis,
}

struct PatternRegexes {
    short_numeric_id: Regex,
    iso_timestamp_millis: Regex,
}

fn regexes() -> &'static PatternRegexes {
    static PATTERNS: OnceLock<PatternRegexes> = OnceLock::new();
    PATTERNS.get_or_init(|| PatternRegexes {
        short_numeric_id: Regex::new(Pattern::ShortNumericId.source()).unwrap(),
        iso_timestamp_millis: Regex::new(Pattern::IsoTimestampMillis.source()).unwrap(),
    })
}

impl Pattern {
    pub const fn source(&self) -> &'static str {
        match self {
            Pattern::ShortNumericId => r"^\d{1,3}$",
            Pattern::IsoTimestampMillis => r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z$",
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        let regexes = regexes();
        match self {
            Pattern::ShortNumericId => regexes.short_numeric_id.is_match(text),
            Pattern::IsoTimestampMillis => regexes.iso_timestamp_millis.is_match(text),
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.source())
    }
}
