//! Dot/bracket JSON paths: `data[0].email`, `data.len()`.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathToken {
    Field(String),
    Index(usize),
    Len,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    UnclosedBracket(String),
    BadIndex(String),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::UnclosedBracket(segment) => {
                write!(f, "unclosed bracket in JSON path segment '{segment}'")
            }
            PathError::BadIndex(index) => {
                write!(f, "non-numeric array index '{index}' in JSON path")
            }
        }
    }
}

impl std::error::Error for PathError {}

pub fn tokenize_path(path: &str) -> Result<Vec<PathToken>, PathError> {
    let mut tokens = Vec::new();
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        if segment == "len()" || segment == "size()" {
            tokens.push(PathToken::Len);
            continue;
        }
        let Some(bracket) = segment.find('[') else {
            tokens.push(PathToken::Field(segment.to_string()));
            continue;
        };
        if bracket > 0 {
            tokens.push(PathToken::Field(segment[..bracket].to_string()));
        }
        let mut rest = &segment[bracket..];
        while let Some(start) = rest.find('[') {
            let end = rest
                .find(']')
                .filter(|end| *end > start)
                .ok_or_else(|| PathError::UnclosedBracket(segment.to_string()))?;
            let raw = &rest[start + 1..end];
            let index = raw.parse().map_err(|_| PathError::BadIndex(raw.to_string()))?;
            tokens.push(PathToken::Index(index));
            rest = &rest[end + 1..];
        }
    }
    Ok(tokens)
}

/// Resolve `path` against `root`. Missing fields, out-of-range indices and
/// `len()` on a scalar all resolve to `Value::Null`.
pub fn resolve_path(root: &Value, path: &str) -> Result<Value, PathError> {
    let mut current = root;
    let tokens = tokenize_path(path)?;
    for (i, token) in tokens.iter().enumerate() {
        let next = match token {
            PathToken::Field(name) => current.get(name),
            PathToken::Index(idx) => current.get(*idx),
            PathToken::Len => {
                let len = match current {
                    Value::Array(a) => a.len(),
                    Value::Object(o) => o.len(),
                    Value::String(s) => s.chars().count(),
                    _ => return Ok(Value::Null),
                };
                // `len()` is terminal; anything after it indexes a number.
                return Ok(if i + 1 == tokens.len() {
                    Value::from(len)
                } else {
                    Value::Null
                });
            }
        };
        match next {
            Some(value) => current = value,
            None => return Ok(Value::Null),
        }
    }
    Ok(current.clone())
}
