use reqres_core::{ConfigError, ReqresConfig, StatusPolicy};
use url::Url;

/// Base endpoint of the public ReqRes API.
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api";

/// Header carrying the optional API key.
pub const API_KEY_HEADER: &str = "x-api-key";

const DEFAULT_USER_AGENT: &str = concat!("reqres-contract/", env!("CARGO_PKG_VERSION"));

/// Per-client configuration, fixed once the client is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base endpoint; resource paths are appended to it (e.g. `https://reqres.in/api`).
    pub base_url: String,

    /// Which statuses are results and which are faults.
    pub status_policy: StatusPolicy,

    /// Value of the `x-api-key` header, when the endpoint requires one.
    pub api_key: Option<String>,

    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a config for the given base endpoint with the permissive status policy.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            status_policy: StatusPolicy::permissive(),
            api_key: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set the base endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the status classification.
    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    /// Send `x-api-key: <key>` with every request.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the `User-Agent` header.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build from a loaded [`ReqresConfig`].
    ///
    /// Reads:
    /// - `reqres.url` (default [`DEFAULT_BASE_URL`])
    /// - `reqres.apikey`
    /// - `reqres.fault.above` (default 500)
    /// - `reqres.agent`
    pub fn from_config(config: &ReqresConfig) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        if let Some(url) = config.get_opt::<String>("reqres.url")? {
            parse_base_url(&url).map_err(|message| ConfigError::Invalid {
                key: "reqres.url".to_string(),
                message,
            })?;
            cfg.base_url = url;
        }
        if let Some(limit) = config.get_opt::<u16>("reqres.fault.above")? {
            cfg.status_policy = StatusPolicy::accept_through(limit);
        }
        cfg.api_key = config
            .get_opt::<Option<String>>("reqres.apikey")?
            .flatten()
            .filter(|key| !key.is_empty());
        if let Some(agent) = config.get_opt::<String>("reqres.agent")? {
            cfg.user_agent = agent;
        }
        Ok(cfg)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Parse and check a base endpoint: absolute `http`/`https` URL usable as a path base.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| format!("'{raw}' is not a valid URL: {e}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("'{raw}' must use http or https"));
    }
    if url.cannot_be_a_base() || url.query().is_some() || url.fragment().is_some() {
        return Err(format!("'{raw}' cannot be used as a base endpoint"));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqres_core::ConfigValue;

    #[test]
    fn default_targets_public_api_with_permissive_policy() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.base_url, "https://reqres.in/api");
        assert_eq!(cfg.status_policy, StatusPolicy::permissive());
        assert!(cfg.api_key.is_none());
        assert!(cfg.user_agent.starts_with("reqres-contract/"));
    }

    #[test]
    fn from_config_reads_all_keys() {
        let yaml = r#"
reqres:
  url: "http://127.0.0.1:9000/api"
  apikey: "reqres-free-v1"
  fault:
    above: 499
  agent: "contract-ci"
"#;
        let config = ReqresConfig::from_yaml_str(yaml, "test").unwrap();
        let cfg = ClientConfig::from_config(&config).unwrap();
        assert_eq!(cfg.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(cfg.api_key.as_deref(), Some("reqres-free-v1"));
        assert_eq!(cfg.status_policy, StatusPolicy::accept_through(499));
        assert_eq!(cfg.user_agent, "contract-ci");
    }

    #[test]
    fn from_empty_config_is_default() {
        let cfg = ClientConfig::from_config(&ReqresConfig::empty()).unwrap();
        assert_eq!(cfg, ClientConfig::default());
    }

    #[test]
    fn null_or_blank_api_key_means_none() {
        let mut config = ReqresConfig::empty();
        config.set("reqres.apikey", ConfigValue::Null);
        assert!(ClientConfig::from_config(&config).unwrap().api_key.is_none());
        config.set("reqres.apikey", ConfigValue::String(String::new()));
        assert!(ClientConfig::from_config(&config).unwrap().api_key.is_none());
    }

    #[test]
    fn rejects_unusable_base_urls() {
        for bad in [
            "not a url",
            "ftp://reqres.in/api",
            "mailto:someone@reqres.in",
            "https://reqres.in/api?x=1",
        ] {
            let mut config = ReqresConfig::empty();
            config.set("reqres.url", ConfigValue::String(bad.to_string()));
            let err = ClientConfig::from_config(&config).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { ref key, .. } if key == "reqres.url"),
                "{bad} should be rejected, got {err}"
            );
        }
    }
}
