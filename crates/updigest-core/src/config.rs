use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::update::MAX_LOOKBACK_DAYS;
use crate::ConfigError;

pub const DEFAULT_MONDAY_API_URL: &str = "https://api.monday.com/v2";
pub const DEFAULT_MONDAY_TEAM_URL: &str = "https://abyssworkshop.monday.com";
pub const DEFAULT_AVATAR: &str = "https://cdn-icons-png.flaticon.com/512/149/149071.png";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional_path = |var: &str| -> Option<PathBuf> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let monday_api_key = require("MONDAY_API_KEY")?;
    let monday_api_url = or_default("MONDAY_API_URL", DEFAULT_MONDAY_API_URL);
    let monday_team_url = or_default("MONDAY_TEAM_URL", DEFAULT_MONDAY_TEAM_URL)
        .trim_end_matches('/')
        .to_string();

    let board_id = parse_u64("UPDIGEST_BOARD_ID", "3401154685")?;
    let items_limit = parse_u32("UPDIGEST_ITEMS_LIMIT", "500")?;
    let lookback_days = parse_lookback_days(&or_default("UPDIGEST_LOOKBACK_DAYS", "31"))?;
    let request_timeout_secs = parse_u64("UPDIGEST_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("UPDIGEST_USER_AGENT", "updigest/0.1 (monthly-report)");

    let output_dir = PathBuf::from(or_default("UPDIGEST_OUTPUT_DIR", "."));
    let default_avatar = or_default("UPDIGEST_DEFAULT_AVATAR", DEFAULT_AVATAR);
    let rules_path = optional_path("UPDIGEST_RULES_PATH");
    let browser_path = optional_path("UPDIGEST_BROWSER_PATH");
    let log_level = or_default("UPDIGEST_LOG_LEVEL", "info");

    Ok(AppConfig {
        monday_api_key,
        monday_api_url,
        monday_team_url,
        board_id,
        items_limit,
        lookback_days,
        request_timeout_secs,
        user_agent,
        output_dir,
        default_avatar,
        rules_path,
        browser_path,
        log_level,
    })
}

/// Parse the window length in days, which must lie in `1..=MAX_LOOKBACK_DAYS`.
fn parse_lookback_days(raw: &str) -> Result<i64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "UPDIGEST_LOOKBACK_DAYS".to_string(),
        reason,
    };
    let days = raw.parse::<i64>().map_err(|e| invalid(e.to_string()))?;
    if !(1..=MAX_LOOKBACK_DAYS).contains(&days) {
        return Err(invalid(format!(
            "must be between 1 and {MAX_LOOKBACK_DAYS}, got {days}"
        )));
    }
    Ok(days)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
