use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use dogsync_core::AppConfig;
use serde::Serialize;
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Bearer-token settings for the operator-only routes.
#[derive(Debug, Clone)]
pub struct AuthState {
    api_keys: Arc<HashSet<String>>,
    pub enabled: bool,
}

impl AuthState {
    /// Builds auth from `DOGSYNC_ADMIN_KEYS`.
    ///
    /// In development, no keys disables auth for local iteration.
    /// In other environments, no keys fails startup.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let keys: HashSet<String> = config.admin_keys.iter().cloned().collect();

        if keys.is_empty() {
            if matches!(config.env, dogsync_core::Environment::Development) {
                tracing::warn!(
                    "DOGSYNC_ADMIN_KEYS not set; diagnostics auth disabled in development environment"
                );
                return Ok(Self::disabled());
            }

            anyhow::bail!(
                "DOGSYNC_ADMIN_KEYS is required outside development; provide comma-separated bearer tokens"
            );
        }

        Ok(Self::with_keys(keys))
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            api_keys: Arc::new(HashSet::new()),
            enabled: false,
        }
    }

    #[must_use]
    pub fn with_keys(keys: HashSet<String>) -> Self {
        Self {
            api_keys: Arc::new(keys),
            enabled: true,
        }
    }

    fn allows(&self, token: &str) -> bool {
        self.api_keys.contains(token)
    }
}

#[derive(Debug, Serialize)]
struct UnauthorizedBody {
    error: &'static str,
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware enforcing Bearer token auth when enabled.
pub async fn require_bearer_auth(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    if !auth.enabled {
        return next.run(req).await;
    }

    let token = extract_bearer_token(req.headers().get(AUTHORIZATION));

    match token {
        Some(token) if auth.allows(token) => next.run(req).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(UnauthorizedBody {
                error: "missing or invalid bearer token",
            }),
        )
            .into_response(),
    }
}

fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(env: dogsync_core::Environment, keys: &[&str]) -> AppConfig {
        AppConfig {
            env,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "info".to_owned(),
            shopify: dogsync_core::ShopifySettings::default(),
            shopify_timeout_secs: 5,
            user_agent: "dogsync-test/0.1".to_owned(),
            admin_keys: keys.iter().map(|k| (*k).to_owned()).collect(),
        }
    }

    #[test]
    fn extract_bearer_token_accepts_valid_header() {
        let header = HeaderValue::from_static("Bearer test-token");
        assert_eq!(extract_bearer_token(Some(&header)), Some("test-token"));
    }

    #[test]
    fn extract_bearer_token_rejects_non_bearer_header() {
        let header = HeaderValue::from_static("Basic abc123");
        assert_eq!(extract_bearer_token(Some(&header)), None);
    }

    #[test]
    fn auth_state_disables_when_no_keys_in_dev() {
        let state = AuthState::from_config(&config(dogsync_core::Environment::Development, &[]))
            .expect("dev should allow missing keys");
        assert!(!state.enabled);
    }

    #[test]
    fn auth_state_requires_keys_in_production() {
        let result = AuthState::from_config(&config(dogsync_core::Environment::Production, &[]));
        assert!(result.is_err());
    }

    #[test]
    fn auth_state_allows_configured_key() {
        let state =
            AuthState::from_config(&config(dogsync_core::Environment::Production, &["k1"])).unwrap();
        assert!(state.enabled);
        assert!(state.allows("k1"));
        assert!(!state.allows("k2"));
    }
}
