mod loader;
pub mod placeholders;
pub mod value;

use std::collections::HashMap;
use std::path::Path;

pub use value::{ConfigValue, FromConfigValue};

/// Prefix of the environment variables overlaid on top of the YAML files.
pub const ENV_PREFIX: &str = "REQRES_";

/// Environment variable that selects the active profile.
pub const PROFILE_ENV: &str = "REQRES_PROFILE";

/// Failure to load or read a configuration key.
#[derive(Debug)]
pub enum ConfigError {
    /// No value under the key.
    NotFound(String),
    /// The stored value does not convert to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// A file could not be read or parsed.
    Load(String),
    /// The value was read but is not acceptable (bad URL, out of range, ...).
    Invalid { key: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
            ConfigError::Invalid { key, message } => {
                write!(f, "Invalid config value for '{key}': {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Suite configuration loaded from YAML files, `.env` files, and environment variables.
///
/// Resolution order (lowest to highest priority):
/// 1. `reqres.yaml` (base)
/// 2. `reqres-{profile}.yaml` (profile override)
/// 3. `.env` file (loaded into process environment)
/// 4. `.env.{profile}` file (loaded into process environment)
/// 5. `REQRES_*` environment variables (e.g., `REQRES_URL` overrides `reqres.url`)
///
/// `.env` files never overwrite already-set environment variables.
///
/// Profile is determined by: `REQRES_PROFILE` env var > argument.
#[derive(Debug, Clone)]
pub struct ReqresConfig {
    values: HashMap<String, ConfigValue>,
    profile: String,
}

impl ReqresConfig {
    /// Load configuration for the given profile from the current working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from_dir(Path::new("."), profile)
    }

    /// Load configuration for the given profile, looking for files in `dir`.
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let active_profile = std::env::var(PROFILE_ENV).unwrap_or_else(|_| profile.to_string());

        let mut values = HashMap::new();

        // 1. Base config
        loader::load_yaml_file(&dir.join("reqres.yaml"), &mut values)?;

        // 2. Profile config
        let profile_file = format!("reqres-{active_profile}.yaml");
        loader::load_yaml_file(&dir.join(profile_file), &mut values)?;

        // 3. .env files (never overwrite existing env vars)
        let _ = dotenvy::from_path(dir.join(".env"));
        let _ = dotenvy::from_path(dir.join(format!(".env.{active_profile}")));

        // 4. ${...} placeholders
        placeholders::resolve_all(&mut values)?;

        // 5. Environment overlay.
        // Convention: `reqres.fault.above` <-> `REQRES_FAULT_ABOVE`
        for (env_key, env_val) in std::env::vars() {
            if env_key.starts_with(ENV_PREFIX) {
                let config_key = env_key.to_lowercase().replace('_', ".");
                values.insert(config_key, ConfigValue::String(env_val));
            }
        }

        tracing::debug!(profile = %active_profile, keys = values.len(), "Configuration loaded");

        Ok(ReqresConfig {
            values,
            profile: active_profile,
        })
    }

    /// Parse a YAML document, without touching files or the environment.
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        loader::load_yaml_str(yaml, &mut values)?;
        Ok(ReqresConfig {
            values,
            profile: profile.to_string(),
        })
    }

    /// No keys, profile `test`.
    pub fn empty() -> Self {
        ReqresConfig {
            values: HashMap::new(),
            profile: "test".to_string(),
        }
    }

    /// Insert or replace `key`.
    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(key.to_string(), value);
    }

    /// Get a typed value for the given dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the key does not exist, or
    /// `ConfigError::TypeMismatch` if the value cannot be converted.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        V::from_config_value(value, key)
    }

    /// Get a typed value, returning a default if the key is missing or malformed.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    /// Get a typed value, `None` when the key is absent.
    ///
    /// Unlike [`get_or`](Self::get_or), a present but malformed value is an error.
    pub fn get_opt<V: FromConfigValue>(&self, key: &str) -> Result<Option<V>, ConfigError> {
        match self.values.get(key) {
            Some(value) => V::from_config_value(value, key).map(Some),
            None => Ok(None),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The active profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }
}
