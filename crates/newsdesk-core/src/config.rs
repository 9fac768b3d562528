use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub(crate) const DEFAULT_SEARCH_BASE_URL: &str = "https://api.gdeltproject.org/api/v2/doc";
pub(crate) const DEFAULT_USER_AGENT: &str = "newsdesk/0.1 (news-ingest)";

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
/// Decoupled from the process environment so tests can feed a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("NEWSDESK_ENV", "development"))?;
    let log_level = or_default("NEWSDESK_LOG_LEVEL", "info");
    let sources_path = PathBuf::from(or_default(
        "NEWSDESK_SOURCES_PATH",
        "./config/sources.yaml",
    ));

    let search_base_url = or_default("NEWSDESK_SEARCH_BASE_URL", DEFAULT_SEARCH_BASE_URL);
    if !(search_base_url.starts_with("http://") || search_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "NEWSDESK_SEARCH_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{search_base_url}'"),
        });
    }

    let category_delay_ms = parse_u64("NEWSDESK_CATEGORY_DELAY_MS", "2000")?;
    let request_timeout_secs = parse_u64("NEWSDESK_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "NEWSDESK_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("NEWSDESK_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(AppConfig {
        env,
        log_level,
        sources_path,
        search_base_url: search_base_url.trim_end_matches('/').to_string(),
        category_delay_ms,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "development" | "dev" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" | "prod" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NEWSDESK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
