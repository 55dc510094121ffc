// tests/config_tests.rs

use chrono_tz::Tz;
use std::collections::HashMap;
use std::time::Duration;
use ytgrowth::config::{AppConfig, API_KEY_VAR, DEFAULT_API_BASE_URL};
use ytgrowth::ConfigError;

fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    AppConfig::from_lookup(|var| vars.get(var).cloned())
}

#[test]
fn test_defaults_with_only_api_key() {
    let config = load(&[("YOUTUBE_API_KEY", "abc123")]).unwrap();

    assert_eq!(config.api_key, "abc123");
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
    assert_eq!(config.timezone, Tz::UTC);
    assert_eq!(config.http_timeout, Duration::from_secs(10));
}

#[test]
fn test_missing_or_blank_key() {
    assert!(matches!(load(&[]), Err(ConfigError::MissingVar(API_KEY_VAR))));
    assert!(matches!(load(&[("YOUTUBE_API_KEY", "  ")]), Err(ConfigError::MissingVar(_))));
}

#[test]
fn test_overrides() {
    let config = load(&[
        ("YOUTUBE_API_KEY", "abc123"),
        ("YOUTUBE_API_BASE_URL", "http://localhost:3000/youtube/v3/"),
        ("YTGROWTH_BIND", "0.0.0.0:9000"),
        ("YTGROWTH_TIMEZONE", "Asia/Tokyo"),
        ("YTGROWTH_HTTP_TIMEOUT_SECS", "3"),
    ])
    .unwrap();

    assert_eq!(config.api_base_url, "http://localhost:3000/youtube/v3");
    assert_eq!(config.bind_addr.port(), 9000);
    assert_eq!(config.timezone, chrono_tz::Asia::Tokyo);
    assert_eq!(config.http_timeout, Duration::from_secs(3));
}

#[test]
fn test_invalid_values() {
    let bad_tz = load(&[("YOUTUBE_API_KEY", "k"), ("YTGROWTH_TIMEZONE", "Mars/Olympus")]);
    assert!(matches!(bad_tz, Err(ConfigError::InvalidVar { var: "YTGROWTH_TIMEZONE", .. })));

    let bad_bind = load(&[("YOUTUBE_API_KEY", "k"), ("YTGROWTH_BIND", "localhost")]);
    assert!(matches!(bad_bind, Err(ConfigError::InvalidVar { var: "YTGROWTH_BIND", .. })));

    let zero_timeout = load(&[("YOUTUBE_API_KEY", "k"), ("YTGROWTH_HTTP_TIMEOUT_SECS", "0")]);
    assert!(matches!(zero_timeout, Err(ConfigError::InvalidVar { var: "YTGROWTH_HTTP_TIMEOUT_SECS", .. })));
}
