use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("POSTWATCH_ENV", "development"))?;

    let bind_addr = or_default("POSTWATCH_BIND_ADDR", "0.0.0.0:8080")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("POSTWATCH_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("POSTWATCH_LOG_LEVEL", "info");

    // An empty value is how most deploy UIs express "unset".
    let webhook_url = lookup("DISCORD_WEBHOOK_URL")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let creators_path = PathBuf::from(or_default(
        "POSTWATCH_CREATORS_PATH",
        "./config/creators.yaml",
    ));
    let state_path = PathBuf::from(or_default("POSTWATCH_STATE_PATH", "./last_seen.json"));
    let api_base_url = or_default("POSTWATCH_API_BASE_URL", "https://kemono.su/api/v1");
    let site_base_url = or_default("POSTWATCH_SITE_BASE_URL", "https://kemono.su");

    let poll_interval_secs = parse_u64("POSTWATCH_POLL_INTERVAL_SECS", "3600")?;
    if poll_interval_secs == 0 {
        return Err(invalid(
            "POSTWATCH_POLL_INTERVAL_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let request_timeout_secs = parse_u64("POSTWATCH_REQUEST_TIMEOUT_SECS", "20")?;
    let user_agent = or_default("POSTWATCH_USER_AGENT", "postwatch/0.1 (creator-tracking)");

    let max_attempts = parse_u32("POSTWATCH_MAX_ATTEMPTS", "3")?;
    if max_attempts == 0 {
        return Err(invalid(
            "POSTWATCH_MAX_ATTEMPTS",
            "must be at least 1".to_string(),
        ));
    }
    let retry_delay_secs = parse_u64("POSTWATCH_RETRY_DELAY_SECS", "5")?;
    let inter_request_delay_ms = parse_u64("POSTWATCH_INTER_REQUEST_DELAY_MS", "1500")?;
    let notify_delay_ms = parse_u64("POSTWATCH_NOTIFY_DELAY_MS", "1000")?;

    let failure_alert_ratio = or_default("POSTWATCH_FAILURE_ALERT_RATIO", "0.5")
        .parse::<f64>()
        .map_err(|e| invalid("POSTWATCH_FAILURE_ALERT_RATIO", e.to_string()))?;
    if !(0.0..=1.0).contains(&failure_alert_ratio) {
        return Err(invalid(
            "POSTWATCH_FAILURE_ALERT_RATIO",
            format!("{failure_alert_ratio} is outside 0.0..=1.0"),
        ));
    }

    let persist_each_update = parse_bool(
        "POSTWATCH_PERSIST_EACH_UPDATE",
        &or_default("POSTWATCH_PERSIST_EACH_UPDATE", "false"),
    )?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        webhook_url,
        creators_path,
        state_path,
        api_base_url,
        site_base_url,
        poll_interval_secs,
        request_timeout_secs,
        user_agent,
        max_attempts,
        retry_delay_secs,
        inter_request_delay_ms,
        notify_delay_ms,
        failure_alert_ratio,
        persist_each_update,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "POSTWATCH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
