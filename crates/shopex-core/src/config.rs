use crate::app_config::{AppConfig, DEFAULT_API_VERSION, MAX_PAGE_SIZE};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as absent so an empty line in `.env` does not
    // shadow a CLI flag.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
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

    let shop_domain = optional("SHOPEX_SHOP_DOMAIN");
    let access_token = optional("SHOPEX_ACCESS_TOKEN");
    let api_version = or_default("SHOPEX_API_VERSION", DEFAULT_API_VERSION);
    let log_level = or_default("SHOPEX_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("SHOPEX_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SHOPEX_USER_AGENT", "shopex/0.1 (product-export)");

    let page_size = parse_u32("SHOPEX_PAGE_SIZE", "25")?;
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPEX_PAGE_SIZE".to_string(),
            reason: format!("must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"),
        });
    }

    let max_retries = parse_u32("SHOPEX_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("SHOPEX_RETRY_BACKOFF_BASE_SECS", "2")?;
    let throttle_floor = parse_u32("SHOPEX_THROTTLE_FLOOR", "100")?;
    let throttle_pause_ms = parse_u64("SHOPEX_THROTTLE_PAUSE_MS", "2000")?;
    let lookup_delay_ms = parse_u64("SHOPEX_LOOKUP_DELAY_MS", "500")?;

    Ok(AppConfig {
        shop_domain,
        access_token,
        api_version,
        log_level,
        request_timeout_secs,
        user_agent,
        page_size,
        max_retries,
        retry_backoff_base_secs,
        throttle_floor,
        throttle_pause_ms,
        lookup_delay_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
