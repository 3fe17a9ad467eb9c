//! The form webhook: `POST /api/sync-dog`.

use axum::{body::Bytes, extract::State, Extension, Json};
use dogsync_shopify::{prepare, SyncAction, TracingObserver};
use serde::Serialize;
use serde_json::Value;

use super::error::ApiError;
use super::AppState;
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
pub(super) struct SyncResponse {
    success: bool,
    action: SyncAction,
    product: Value,
}

/// Maps the payload, rejects it if it has no entry id, then upserts the
/// product. The identifier check runs before the configuration check, so a
/// malformed payload is reported as such even on an unconfigured server.
pub(super) async fn sync_dog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<SyncResponse>, ApiError> {
    tracing::info!(request_id = %req_id.0, bytes = body.len(), "sync webhook received");

    let raw: Value =
        serde_json::from_slice(&body).map_err(|e| ApiError::internal(state.env, &e))?;

    let prepared = match state.sync.as_deref() {
        Some(sync) => prepare(&raw, sync.observer()),
        None => prepare(&raw, &TracingObserver),
    }
    .map_err(|e| ApiError::from_sync(e, state.env))?;

    let Some(sync) = state.sync.as_deref() else {
        tracing::error!(handle = %prepared.handle, "Shopify settings missing; cannot sync");
        return Err(ApiError::missing_configuration(&state.shopify));
    };

    let outcome = sync
        .execute(prepared)
        .await
        .map_err(|e| ApiError::from_sync(e, state.env))?;

    Ok(Json(SyncResponse {
        success: true,
        action: outcome.action,
        product: outcome.product,
    }))
}

/// Any method other than POST on the webhook route.
pub(super) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
