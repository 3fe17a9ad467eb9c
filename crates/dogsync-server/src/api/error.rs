//! Error responses for the webhook surface.
//!
//! Every failure ends as one JSON body with a top-level `error` string. The
//! webhook sender only looks at the status code; the remaining fields are for
//! whoever reads the delivery log.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dogsync_core::{Environment, ShopifySettings};
use dogsync_shopify::{SyncError, WriteKind};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug)]
pub enum ApiError {
    MethodNotAllowed,
    MissingIdentifier {
        payload: Value,
    },
    MissingConfiguration {
        has_store_domain: bool,
        has_access_token: bool,
        has_api_version: bool,
    },
    DownstreamWrite {
        kind: WriteKind,
        body: String,
        handle: String,
        product_id: Option<i64>,
    },
    Internal {
        details: String,
        debug: Option<String>,
    },
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    received_payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    has_store_domain: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    has_access_token: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    has_api_version: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    debug: Option<String>,
}

impl ApiError {
    pub fn missing_configuration(settings: &ShopifySettings) -> Self {
        Self::MissingConfiguration {
            has_store_domain: settings.has_store_domain(),
            has_access_token: settings.has_access_token(),
            has_api_version: settings.has_api_version(),
        }
    }

    /// Catch-all 500. The debug rendering is withheld in production.
    pub fn internal(env: Environment, error: &(dyn std::error::Error + 'static)) -> Self {
        tracing::error!(error = %error, "unhandled error");
        Self::Internal {
            details: error.to_string(),
            debug: (!env.is_production()).then(|| format!("{error:?}")),
        }
    }

    pub fn from_sync(error: SyncError, env: Environment) -> Self {
        match error {
            SyncError::MissingIdentifier { payload } => Self::MissingIdentifier { payload },
            SyncError::DownstreamWrite {
                kind,
                body,
                handle,
                product_id,
                ..
            } => Self::DownstreamWrite {
                kind,
                body,
                handle,
                product_id,
            },
            other @ SyncError::Downstream { .. } => Self::internal(env, &other),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingIdentifier { .. } => StatusCode::BAD_REQUEST,
            Self::MissingConfiguration { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::DownstreamWrite { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn into_body(self) -> ErrorBody {
        match self {
            Self::MethodNotAllowed => ErrorBody {
                error: "Method not allowed",
                ..ErrorBody::default()
            },
            Self::MissingIdentifier { payload } => ErrorBody {
                error: "Missing entry ID",
                received_payload: Some(payload),
                ..ErrorBody::default()
            },
            Self::MissingConfiguration {
                has_store_domain,
                has_access_token,
                has_api_version,
            } => ErrorBody {
                error: "Missing Shopify environment variables",
                has_store_domain: Some(has_store_domain),
                has_access_token: Some(has_access_token),
                has_api_version: Some(has_api_version),
                ..ErrorBody::default()
            },
            Self::DownstreamWrite {
                kind,
                body,
                handle,
                product_id,
            } => ErrorBody {
                error: match kind {
                    WriteKind::Create => "Failed to create product",
                    WriteKind::Update => "Failed to update product",
                },
                details: Some(body),
                handle: Some(handle),
                product_id,
                ..ErrorBody::default()
            },
            Self::Internal { details, debug } => ErrorBody {
                error: "Internal server error",
                details: Some(details),
                debug,
                ..ErrorBody::default()
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(self.into_body())).into_response()
    }
}

/// Turns a handler panic into the catch-all 500 body.
pub fn panic_response(env: Environment, panic: &(dyn Any + Send)) -> Response {
    let details = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(|s| (*s).to_owned()))
        .unwrap_or_else(|| "handler panicked".to_owned());
    tracing::error!(details = %details, "handler panicked");

    ApiError::Internal {
        debug: (!env.is_production()).then(|| details.clone()),
        details,
    }
    .into_response()
}
