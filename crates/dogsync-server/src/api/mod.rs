mod diagnostics;
mod error;
mod sync;

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use dogsync_core::{AppConfig, Environment, ShopifySettings};
use dogsync_shopify::{DogSync, ShopifyAdminClient};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::middleware::{request_id, require_bearer_auth, AuthState};

#[derive(Clone)]
pub struct AppState {
    /// `None` while any Shopify setting is missing; sync calls then answer 500.
    pub sync: Option<Arc<DogSync>>,
    pub shopify: ShopifySettings,
    pub env: Environment,
}

impl AppState {
    /// Builds the orchestrator once from validated credentials.
    ///
    /// Missing credentials are not fatal: the server still starts so the
    /// diagnostics route can explain what is wrong.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let sync = match config.shopify.resolve() {
            Ok(credentials) => {
                let client = ShopifyAdminClient::new(
                    &credentials,
                    config.shopify_timeout_secs,
                    &config.user_agent,
                )?;
                tracing::info!(
                    store_domain = %credentials.store_domain,
                    api_version = %credentials.api_version,
                    "Shopify sync configured"
                );
                Some(Arc::new(DogSync::new(client)))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Shopify sync not configured; sync requests will fail");
                None
            }
        };

        Ok(Self {
            sync,
            shopify: config.shopify.clone(),
            env: config.env,
        })
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    shopify: &'static str,
}

fn operator_router(auth: AuthState) -> Router<AppState> {
    Router::new()
        .route("/api/check-env", get(diagnostics::check_env))
        .layer(axum::middleware::from_fn_with_state(
            auth,
            require_bearer_auth,
        ))
}

pub fn build_app(state: AppState, auth: AuthState) -> Router {
    let env = state.env;
    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/sync-dog",
            post(sync::sync_dog).fallback(sync::method_not_allowed),
        );

    Router::new()
        .merge(public_routes)
        .merge(operator_router(auth))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(move |panic: Box<dyn std::any::Any + Send + 'static>| {
                    error::panic_response(env, panic.as_ref())
                })),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthData> {
    Json(HealthData {
        status: "ok",
        shopify: if state.sync.is_some() {
            "configured"
        } else {
            "missing"
        },
    })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
