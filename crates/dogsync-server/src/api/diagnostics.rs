use axum::{extract::State, Json};
use dogsync_core::EnvDiagnostics;

use super::AppState;

/// `GET /api/check-env`: redacted view of the Shopify settings.
pub(super) async fn check_env(State(state): State<AppState>) -> Json<EnvDiagnostics> {
    Json(EnvDiagnostics::from_settings(&state.shopify))
}
