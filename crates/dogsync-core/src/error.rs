use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("missing Shopify configuration: {}", missing.join(", "))]
    MissingShopifyCredentials { missing: Vec<&'static str> },
}
