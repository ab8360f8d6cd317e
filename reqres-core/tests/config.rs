use std::fs;

use reqres_core::config::{ConfigError, ConfigValue, ReqresConfig};
use serial_test::serial;

#[test]
fn test_empty_config() {
    let config = ReqresConfig::empty();
    assert!(config.get::<String>("reqres.url").is_err());
    assert_eq!(config.profile(), "test");
}

#[test]
fn test_set_and_get() {
    let mut config = ReqresConfig::empty();
    config.set("reqres.url", ConfigValue::String("http://localhost:3000/api".into()));
    assert_eq!(
        config.get::<String>("reqres.url").unwrap(),
        "http://localhost:3000/api"
    );
    assert!(config.contains_key("reqres.url"));
}

#[test]
fn test_get_or_default() {
    let config = ReqresConfig::empty();
    assert_eq!(config.get_or("reqres.fault.above", 500u16), 500);
}

#[test]
fn test_get_opt_distinguishes_missing_and_malformed() {
    let mut config = ReqresConfig::empty();
    assert_eq!(config.get_opt::<u16>("reqres.fault.above").unwrap(), None);

    config.set("reqres.fault.above", ConfigValue::String("lots".into()));
    assert!(matches!(
        config.get_opt::<u16>("reqres.fault.above"),
        Err(ConfigError::TypeMismatch { expected: "u16", .. })
    ));
}

#[test]
fn test_type_conversions() {
    let mut config = ReqresConfig::empty();
    config.set("int_val", ConfigValue::Integer(42));
    config.set("bool_val", ConfigValue::String("yes".into()));
    config.set("null_val", ConfigValue::Null);
    config.set("too_big", ConfigValue::Integer(70_000));

    assert_eq!(config.get::<i64>("int_val").unwrap(), 42);
    assert_eq!(config.get::<String>("int_val").unwrap(), "42");
    assert!(config.get::<bool>("bool_val").unwrap());
    assert!(config.get::<Option<String>>("null_val").unwrap().is_none());
    assert!(config.get::<u16>("too_big").is_err());
}

#[test]
fn test_flatten_yaml() {
    let yaml = r#"
reqres:
  url: "https://reqres.in/api"
  fault:
    above: 499
  headers:
    - "x-api-key"
"#;
    let config = ReqresConfig::from_yaml_str(yaml, "ci").unwrap();

    assert_eq!(
        config.get::<String>("reqres.url").unwrap(),
        "https://reqres.in/api"
    );
    assert_eq!(config.get::<u16>("reqres.fault.above").unwrap(), 499);
    assert!(config.contains_key("reqres.headers"));
    assert!(config.get::<String>("reqres.headers").is_err());
    assert_eq!(config.profile(), "ci");
}

#[test]
fn test_invalid_yaml_is_load_error() {
    let err = ReqresConfig::from_yaml_str("reqres: {url", "test").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
    assert!(err.to_string().starts_with("Config load error"));
}

#[test]
#[serial]
fn test_profile_file_overrides_base_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("reqres.yaml"),
        "reqres:\n  url: https://reqres.in/api\n  agent: base\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("reqres-local.yaml"),
        "reqres:\n  url: http://127.0.0.1:8080/api\n",
    )
    .unwrap();

    std::env::remove_var("REQRES_PROFILE");
    std::env::remove_var("REQRES_URL");
    let config = ReqresConfig::load_from_dir(dir.path(), "local").unwrap();

    assert_eq!(config.profile(), "local");
    assert_eq!(
        config.get::<String>("reqres.url").unwrap(),
        "http://127.0.0.1:8080/api"
    );
    assert_eq!(config.get::<String>("reqres.agent").unwrap(), "base");
}

#[test]
#[serial]
fn test_env_overrides_files_and_selects_profile() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("reqres.yaml"), "reqres:\n  url: https://reqres.in/api\n").unwrap();
    fs::write(dir.path().join("reqres-staging.yaml"), "reqres:\n  agent: staging\n").unwrap();

    std::env::set_var("REQRES_PROFILE", "staging");
    std::env::set_var("REQRES_URL", "http://override.invalid/api");
    let config = ReqresConfig::load_from_dir(dir.path(), "dev");
    std::env::remove_var("REQRES_PROFILE");
    std::env::remove_var("REQRES_URL");
    let config = config.unwrap();

    assert_eq!(config.profile(), "staging");
    assert_eq!(config.get::<String>("reqres.agent").unwrap(), "staging");
    assert_eq!(
        config.get::<String>("reqres.url").unwrap(),
        "http://override.invalid/api"
    );
}

#[test]
#[serial]
fn test_placeholders_resolve_from_dotenv_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("reqres.yaml"),
        "reqres:\n  apikey: \"${REQRES_TEST_DOTENV_KEY}\"\n",
    )
    .unwrap();
    fs::write(dir.path().join(".env"), "REQRES_TEST_DOTENV_KEY=from-dotenv\n").unwrap();

    std::env::remove_var("REQRES_PROFILE");
    std::env::remove_var("REQRES_TEST_DOTENV_KEY");
    let config = ReqresConfig::load_from_dir(dir.path(), "test");
    std::env::remove_var("REQRES_TEST_DOTENV_KEY");
    let config = config.unwrap();

    assert_eq!(config.get::<String>("reqres.apikey").unwrap(), "from-dotenv");
}
