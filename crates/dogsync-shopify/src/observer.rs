//! Lifecycle hooks for the sync pipeline.

use dogsync_core::DogRecord;
use serde_json::Value;

use crate::locate::LocateOutcome;
use crate::sync::{SyncError, SyncOutcome};

/// Receives one call per pipeline stage. Every method defaults to a no-op so
/// implementations only override the stages they care about.
pub trait SyncObserver: Send + Sync {
    fn received(&self, _raw: &Value) {}

    fn mapped(&self, _record: &DogRecord) {}

    fn located(&self, _handle: &str, _outcome: &LocateOutcome) {}

    fn written(&self, _outcome: &SyncOutcome) {}

    fn failed(&self, _error: &SyncError) {}
}

/// Default observer: structured `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SyncObserver for TracingObserver {
    fn received(&self, raw: &Value) {
        let field_count = raw.as_object().map_or(0, serde_json::Map::len);
        tracing::info!(field_count, "sync payload received");
        tracing::debug!(payload = %raw, "raw sync payload");
    }

    fn mapped(&self, record: &DogRecord) {
        tracing::info!(
            entry_id = record.entry_id.as_deref().unwrap_or("<missing>"),
            name = record.name.as_deref().unwrap_or_default(),
            availability = %record.availability,
            image_count = record.image_urls.len(),
            "payload mapped to dog record"
        );
    }

    fn located(&self, handle: &str, outcome: &LocateOutcome) {
        match outcome {
            LocateOutcome::Found(product) => tracing::info!(
                handle,
                product_id = product.id,
                current_title = product.title.as_deref().unwrap_or_default(),
                "existing product found"
            ),
            LocateOutcome::NotFound => tracing::info!(handle, "no existing product"),
            LocateOutcome::Degraded(e) => tracing::warn!(
                handle,
                error = %e,
                "product lookup failed; proceeding as not found"
            ),
        }
    }

    fn written(&self, outcome: &SyncOutcome) {
        tracing::info!(
            handle = %outcome.handle,
            action = %outcome.action,
            product_id = ?outcome.product.get("id"),
            "product synced"
        );
    }

    fn failed(&self, error: &SyncError) {
        match error {
            SyncError::MissingIdentifier { .. } => {
                tracing::warn!(error = %error, "sync rejected");
            }
            _ => tracing::error!(error = %error, "sync failed"),
        }
    }
}
