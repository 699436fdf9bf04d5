use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert!(cfg.pexels_api_key.is_none());
    assert!(cfg.unsplash_access_key.is_none());
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.http_timeout_secs, 25);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.fetch_max_tries, 3);
    assert_eq!(cfg.retry_base_delay_ms, 800);
    assert_eq!(cfg.inter_request_delay_ms, 300);
    assert_eq!(cfg.max_concurrency, 3);
    assert_eq!(cfg.limit_terms, 30);
    assert_eq!(cfg.top_n, 20);
    assert_eq!(cfg.collect_timeout_secs, 180);
    assert_eq!(cfg.source_timeout_secs, 60);
    assert_eq!(cfg.trends_hl, "en-US");
    assert_eq!(cfg.trends_tz, 420);
}

#[test]
fn api_keys_are_read_and_trimmed() {
    let mut map = HashMap::new();
    map.insert("PEXELS_API_KEY", "  pexels-key ");
    map.insert("UNSPLASH_ACCESS_KEY", "unsplash-key");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.pexels_api_key.as_deref(), Some("pexels-key"));
    assert_eq!(cfg.unsplash_access_key.as_deref(), Some("unsplash-key"));
}

#[test]
fn blank_api_key_is_treated_as_absent() {
    let mut map = HashMap::new();
    map.insert("PEXELS_API_KEY", "   ");
    map.insert("UNSPLASH_ACCESS_KEY", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.pexels_api_key.is_none());
    assert!(cfg.unsplash_access_key.is_none());
}

#[test]
fn debug_output_redacts_api_keys() {
    let mut map = HashMap::new();
    map.insert("PEXELS_API_KEY", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn numeric_overrides_are_applied() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOUT_MAX_CONCURRENCY", "5");
    map.insert("TRENDSCOUT_TOP_N", "10");
    map.insert("TRENDSCOUT_RETRY_BASE_DELAY_MS", "0");
    map.insert("TRENDSCOUT_TRENDS_TZ", "-60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_concurrency, 5);
    assert_eq!(cfg.top_n, 10);
    assert_eq!(cfg.retry_base_delay_ms, 0);
    assert_eq!(cfg.trends_tz, -60);
}

#[test]
fn user_agent_override() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOUT_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
}

#[test]
fn invalid_timeout_is_rejected() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOUT_HTTP_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDSCOUT_HTTP_TIMEOUT_SECS"),
        "expected InvalidEnvVar(TRENDSCOUT_HTTP_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn zero_concurrency_is_rejected() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOUT_MAX_CONCURRENCY", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDSCOUT_MAX_CONCURRENCY"),
        "expected InvalidEnvVar(TRENDSCOUT_MAX_CONCURRENCY), got: {result:?}"
    );
}

#[test]
fn zero_max_tries_is_rejected() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOUT_FETCH_MAX_TRIES", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRENDSCOUT_FETCH_MAX_TRIES"),
        "expected InvalidEnvVar(TRENDSCOUT_FETCH_MAX_TRIES), got: {result:?}"
    );
}

#[test]
fn zero_top_n_is_rejected() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOUT_TOP_N", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn default_config_matches_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let from_env = build_app_config(lookup_from_map(&map)).unwrap();
    let default = AppConfig::default();
    assert_eq!(format!("{from_env:?}"), format!("{default:?}"));
}
