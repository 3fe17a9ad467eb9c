//! Redacted view of the Shopify settings, for operators checking a deployment.

use serde::Serialize;

use crate::app_config::{normalize_store_domain, ShopifySettings};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvDiagnostics {
    pub has_store_domain: bool,
    pub store_domain_length: usize,
    pub store_domain_preview: Option<String>,
    pub has_access_token: bool,
    pub token_length: usize,
    pub token_starts_with: Option<String>,
    pub has_api_version: bool,
    pub api_version: Option<String>,
    pub constructed_url: Option<String>,
}

impl EnvDiagnostics {
    #[must_use]
    pub fn from_settings(settings: &ShopifySettings) -> Self {
        let domain = settings.store_domain.as_deref();
        let token = settings.access_token.as_deref();
        let version = settings.api_version.as_deref();

        let constructed_url = domain.zip(version).map(|(d, v)| {
            format!(
                "https://{}/admin/api/{v}/products.json",
                normalize_store_domain(d)
            )
        });

        Self {
            has_store_domain: domain.is_some(),
            store_domain_length: domain.map_or(0, |d| d.chars().count()),
            store_domain_preview: domain.map(|d| format!("{}...{}", head(d, 3), tail(d, 15))),
            has_access_token: token.is_some(),
            token_length: token.map_or(0, |t| t.chars().count()),
            token_starts_with: token.map(|t| head(t, 6)),
            has_api_version: version.is_some(),
            api_version: version.map(str::to_owned),
            constructed_url,
        }
    }
}

fn head(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

fn tail(s: &str, n: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(n)).collect()
}
