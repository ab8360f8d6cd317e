//! `${VAR}` placeholder expansion for string config values.
//!
//! Supported forms:
//! - `${VAR}`: value of the environment variable, error if unset
//! - `${VAR:-fallback}`: value of the environment variable, `fallback` if unset

use std::collections::HashMap;

use super::{ConfigError, ConfigValue};

/// Expand every `${...}` occurrence in `value` from the process environment.
pub fn expand(value: &str) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find('}').ok_or_else(|| {
            ConfigError::Load(format!("Unclosed placeholder in config value: {value}"))
        })?;
        out.push_str(&lookup(&after[..end])?);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn lookup(reference: &str) -> Result<String, ConfigError> {
    let (name, fallback) = match reference.split_once(":-") {
        Some((name, fallback)) => (name.trim(), Some(fallback)),
        None => (reference.trim(), None),
    };
    match (std::env::var(name), fallback) {
        (Ok(v), _) => Ok(v),
        (Err(_), Some(fallback)) => Ok(fallback.to_string()),
        (Err(_), None) => Err(ConfigError::NotFound(format!("env:{name}"))),
    }
}

pub(crate) fn resolve_all(values: &mut HashMap<String, ConfigValue>) -> Result<(), ConfigError> {
    for value in values.values_mut() {
        if let ConfigValue::String(s) = value {
            if s.contains("${") {
                *s = expand(s)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_placeholders_is_unchanged() {
        assert_eq!(expand("https://reqres.in/api").unwrap(), "https://reqres.in/api");
    }

    #[test]
    fn fallback_is_used_when_variable_is_unset() {
        let expanded = expand("${REQRES_TEST_SURELY_UNSET_VAR:-reqres-free-v1}").unwrap();
        assert_eq!(expanded, "reqres-free-v1");
    }

    #[test]
    fn unset_variable_without_fallback_is_not_found() {
        let err = expand("key=${REQRES_TEST_SURELY_UNSET_VAR}").unwrap_err();
        assert!(
            matches!(err, ConfigError::NotFound(ref k) if k == "env:REQRES_TEST_SURELY_UNSET_VAR")
        );
    }

    #[test]
    fn unclosed_placeholder_is_a_load_error() {
        assert!(matches!(expand("${OOPS"), Err(ConfigError::Load(_))));
    }
}
