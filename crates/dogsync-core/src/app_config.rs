use std::net::SocketAddr;

use crate::ConfigError;

pub const STORE_DOMAIN_VAR: &str = "SHOPIFY_STORE_DOMAIN";
pub const ACCESS_TOKEN_VAR: &str = "SHOPIFY_ADMIN_API_ACCESS_TOKEN";
pub const API_VERSION_VAR: &str = "SHOPIFY_API_VERSION";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Raw Shopify settings as found in the environment.
///
/// Every field is optional here: the service starts without them and reports
/// the gap on each webhook call. Use [`ShopifySettings::resolve`] to obtain
/// the validated [`ShopifyCredentials`] the orchestrator is built from.
#[derive(Clone, Default)]
pub struct ShopifySettings {
    pub store_domain: Option<String>,
    pub access_token: Option<String>,
    pub api_version: Option<String>,
}

impl ShopifySettings {
    #[must_use]
    pub fn has_store_domain(&self) -> bool {
        self.store_domain.is_some()
    }

    #[must_use]
    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    #[must_use]
    pub fn has_api_version(&self) -> bool {
        self.api_version.is_some()
    }

    /// Validates that all three settings are present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingShopifyCredentials`] naming every
    /// variable that is absent.
    pub fn resolve(&self) -> Result<ShopifyCredentials, ConfigError> {
        match (&self.store_domain, &self.access_token, &self.api_version) {
            (Some(domain), Some(token), Some(version)) => Ok(ShopifyCredentials {
                store_domain: normalize_store_domain(domain),
                access_token: token.clone(),
                api_version: version.clone(),
            }),
            _ => {
                let missing = [
                    (STORE_DOMAIN_VAR, self.has_store_domain()),
                    (ACCESS_TOKEN_VAR, self.has_access_token()),
                    (API_VERSION_VAR, self.has_api_version()),
                ]
                .into_iter()
                .filter_map(|(var, present)| (!present).then_some(var))
                .collect();
                Err(ConfigError::MissingShopifyCredentials { missing })
            }
        }
    }
}

impl std::fmt::Debug for ShopifySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifySettings")
            .field("store_domain", &self.store_domain)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Validated Shopify Admin API credentials.
#[derive(Clone)]
pub struct ShopifyCredentials {
    pub store_domain: String,
    pub access_token: String,
    pub api_version: String,
}

impl ShopifyCredentials {
    /// `https://<domain>/admin/api/<version>`, without a trailing slash.
    #[must_use]
    pub fn admin_base_url(&self) -> String {
        format!(
            "https://{}/admin/api/{}",
            self.store_domain, self.api_version
        )
    }
}

impl std::fmt::Debug for ShopifyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyCredentials")
            .field("store_domain", &self.store_domain)
            .field("access_token", &"[redacted]")
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Strips a scheme and trailing slashes so operators can paste either
/// `shop.myshopify.com` or `https://shop.myshopify.com/`.
pub(crate) fn normalize_store_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_owned()
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub shopify: ShopifySettings,
    pub shopify_timeout_secs: u64,
    pub user_agent: String,
    pub admin_keys: Vec<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("shopify", &self.shopify)
            .field("shopify_timeout_secs", &self.shopify_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("admin_keys", &format!("[{} redacted]", self.admin_keys.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(domain: Option<&str>, token: Option<&str>, version: Option<&str>) -> ShopifySettings {
        ShopifySettings {
            store_domain: domain.map(str::to_owned),
            access_token: token.map(str::to_owned),
            api_version: version.map(str::to_owned),
        }
    }

    #[test]
    fn resolve_builds_admin_base_url() {
        let creds = settings(Some("kennel.myshopify.com"), Some("shpat_x"), Some("2024-10"))
            .resolve()
            .expect("all settings present");
        assert_eq!(
            creds.admin_base_url(),
            "https://kennel.myshopify.com/admin/api/2024-10"
        );
    }

    #[test]
    fn resolve_strips_scheme_and_trailing_slash() {
        let creds = settings(
            Some("https://kennel.myshopify.com/"),
            Some("shpat_x"),
            Some("2024-10"),
        )
        .resolve()
        .expect("all settings present");
        assert_eq!(creds.store_domain, "kennel.myshopify.com");
    }

    #[test]
    fn resolve_lists_every_missing_variable() {
        let err = settings(Some("kennel.myshopify.com"), None, None)
            .resolve()
            .unwrap_err();
        match err {
            ConfigError::MissingShopifyCredentials { missing } => {
                assert_eq!(missing, vec![ACCESS_TOKEN_VAR, API_VERSION_VAR]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn debug_output_redacts_access_token() {
        let s = settings(Some("kennel.myshopify.com"), Some("shpat_secret"), Some("2024-10"));
        let rendered = format!("{s:?} {:?}", s.resolve().unwrap());
        assert!(!rendered.contains("shpat_secret"), "token leaked: {rendered}");
    }
}
