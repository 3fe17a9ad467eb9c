use crate::app_config::{
    AppConfig, Environment, ShopifySettings, ACCESS_TOKEN_VAR, API_VERSION_VAR, STORE_DOMAIN_VAR,
};
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
/// Shopify settings are never required here; a missing one is reported per
/// request instead of failing startup. Empty values count as absent.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("DOGSYNC_ENV", "development"));

    let bind_addr = or_default("DOGSYNC_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "DOGSYNC_BIND_ADDR".to_string(),
            reason: e.to_string(),
        })?;
    let log_level = or_default("DOGSYNC_LOG_LEVEL", "info");

    let shopify = ShopifySettings {
        store_domain: optional(STORE_DOMAIN_VAR),
        access_token: optional(ACCESS_TOKEN_VAR),
        api_version: optional(API_VERSION_VAR),
    };

    let shopify_timeout_secs = parse_u64("DOGSYNC_SHOPIFY_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("DOGSYNC_USER_AGENT", "dogsync/0.1 (webhook-sync)");
    let admin_keys = parse_key_list(&or_default("DOGSYNC_ADMIN_KEYS", ""));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        shopify,
        shopify_timeout_secs,
        user_agent,
        admin_keys,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_key_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
