//! Tests for layered configuration loading.

use rolebot::{LoggingSettings, RolebotConfig};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[test]
fn test_bundled_defaults() {
    let config = RolebotConfig::from_toml_str("").expect("defaults parse");

    assert_eq!(*config.cache().external_timeout_ms(), 5000);
    assert_eq!(config.cache().external_timeout(), Duration::from_secs(5));
    assert_eq!(config.logging().level(), "info");
    assert!(!*config.logging().json());
    assert!(config.discord().api_token().is_empty());
}

#[test]
fn test_toml_overrides_defaults() {
    let config = RolebotConfig::from_toml_str(
        r#"
        [discord]
        api_token = "abc.def"
        guild_id = "123456789012345678"

        [cache]
        external_timeout_ms = 1500

        [logging]
        json = true
        "#,
    )
    .expect("config parses");

    assert_eq!(config.discord().require_token().unwrap(), "abc.def");
    assert_eq!(
        config.discord().require_guild_id().unwrap(),
        123456789012345678
    );
    assert_eq!(*config.cache().external_timeout_ms(), 1500);
    assert!(*config.logging().json());
    // Untouched keys keep their defaults
    assert_eq!(config.logging().level(), "info");
}

#[test]
fn test_environment_overrides_files() {
    let env = HashMap::from([
        (
            "ROLE_BOT_CACHE__EXTERNAL_TIMEOUT_MS".to_string(),
            "250".to_string(),
        ),
        ("ROLE_BOT_DISCORD__GUILD_ID".to_string(), "42".to_string()),
        (
            "ROLE_BOT_DATABASE__URL".to_string(),
            "postgres://localhost/rolebot".to_string(),
        ),
    ]);

    let config = RolebotConfig::load_with_env(None, Some(env)).expect("config loads");

    assert_eq!(*config.cache().external_timeout_ms(), 250);
    assert_eq!(config.discord().require_guild_id().unwrap(), 42);
    assert_eq!(
        config.database().require_url().unwrap(),
        "postgres://localhost/rolebot"
    );
}

#[test]
fn test_missing_token_is_an_error() {
    let config = RolebotConfig::from_toml_str("").unwrap();
    let err = config.discord().require_token().unwrap_err();
    assert!(err.message.contains("ROLE_BOT_DISCORD__API_TOKEN"));
}

#[test]
fn test_guild_id_must_be_a_snowflake() {
    for bad in ["", "general", "0", "-5"] {
        let config = RolebotConfig::from_toml_str(&format!(
            "[discord]\nguild_id = \"{}\"\n",
            bad
        ))
        .unwrap();
        assert!(
            config.discord().require_guild_id().is_err(),
            "'{}' should be rejected",
            bad
        );
    }
}

#[test]
fn test_explicit_file_must_exist() {
    let result = RolebotConfig::load_with_env(
        Some(Path::new("/nonexistent/rolebot-test.toml")),
        Some(HashMap::new()),
    );
    assert!(result.is_err());
}

#[test]
fn test_with_logging_replaces_settings() {
    let config = RolebotConfig::default()
        .with_logging(LoggingSettings::default().with_level("rolebot=debug"));
    assert_eq!(config.logging().level(), "rolebot=debug");
}
