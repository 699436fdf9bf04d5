use std::fmt::Display;
use std::str::FromStr;

use crate::app_config::{AppConfig, DEFAULT_USER_AGENT};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank credentials behave like unset ones.
    let optional_secret = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let pexels_api_key = optional_secret("PEXELS_API_KEY");
    let unsplash_access_key = optional_secret("UNSPLASH_ACCESS_KEY");

    let log_level = or_default("TRENDSCOUT_LOG_LEVEL", "info");
    let user_agent = or_default("TRENDSCOUT_USER_AGENT", DEFAULT_USER_AGENT);
    let trends_hl = or_default("TRENDSCOUT_TRENDS_HL", "en-US");

    let http_timeout_secs = parse_var(&lookup, "TRENDSCOUT_HTTP_TIMEOUT_SECS", 25_u64)?;
    let fetch_max_tries = at_least_one(
        "TRENDSCOUT_FETCH_MAX_TRIES",
        parse_var(&lookup, "TRENDSCOUT_FETCH_MAX_TRIES", 3_u32)?,
    )?;
    let retry_base_delay_ms = parse_var(&lookup, "TRENDSCOUT_RETRY_BASE_DELAY_MS", 800_u64)?;
    let inter_request_delay_ms = parse_var(&lookup, "TRENDSCOUT_INTER_REQUEST_DELAY_MS", 300_u64)?;
    let max_concurrency = at_least_one(
        "TRENDSCOUT_MAX_CONCURRENCY",
        parse_var(&lookup, "TRENDSCOUT_MAX_CONCURRENCY", 3_usize)?,
    )?;
    let limit_terms = at_least_one(
        "TRENDSCOUT_LIMIT_TERMS",
        parse_var(&lookup, "TRENDSCOUT_LIMIT_TERMS", 30_usize)?,
    )?;
    let top_n = at_least_one(
        "TRENDSCOUT_TOP_N",
        parse_var(&lookup, "TRENDSCOUT_TOP_N", 20_usize)?,
    )?;
    let collect_timeout_secs = parse_var(&lookup, "TRENDSCOUT_COLLECT_TIMEOUT_SECS", 180_u64)?;
    let source_timeout_secs = parse_var(&lookup, "TRENDSCOUT_SOURCE_TIMEOUT_SECS", 60_u64)?;
    let trends_tz = parse_var(&lookup, "TRENDSCOUT_TRENDS_TZ", 420_i32)?;

    Ok(AppConfig {
        pexels_api_key,
        unsplash_access_key,
        log_level,
        http_timeout_secs,
        user_agent,
        fetch_max_tries,
        retry_base_delay_ms,
        inter_request_delay_ms,
        max_concurrency,
        limit_terms,
        top_n,
        collect_timeout_secs,
        source_timeout_secs,
        trends_hl,
        trends_tz,
    })
}

/// Parse `var` into `T`, falling back to `default` when the variable is unset.
fn parse_var<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}

fn at_least_one<T>(var: &str, value: T) -> Result<T, ConfigError>
where
    T: PartialOrd + From<u8>,
{
    if value < T::from(1) {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
