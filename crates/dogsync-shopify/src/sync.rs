//! Upsert orchestration: map, validate, locate by handle, then create or update.
//!
//! A sync moves through `received -> mapped -> validated -> located ->
//! created | updated`, and can fail at any step. [`prepare`] covers the pure
//! part up to validation so callers can reject bad payloads before touching
//! Shopify; [`DogSync::execute`] does the one lookup and the one write.

use std::sync::Arc;

use dogsync_core::{build_product_payload, derive_handle, map_raw_record, DogRecord, ProductPayload};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::client::ShopifyAdminClient;
use crate::error::{ShopifyError, WriteKind};
use crate::locate::locate;
use crate::observer::{SyncObserver, TracingObserver};

#[derive(Debug, Error)]
pub enum SyncError {
    /// The payload has no usable `Id`; nothing was sent downstream.
    #[error("missing permanent identifier in payload")]
    MissingIdentifier { payload: Value },

    /// Shopify answered the create or update with a non-2xx status.
    #[error("product {kind} for {handle} rejected with HTTP {status}")]
    DownstreamWrite {
        kind: WriteKind,
        status: u16,
        body: String,
        handle: String,
        product_id: Option<i64>,
    },

    /// Transport failure or unreadable response during the write.
    #[error("Shopify request for {handle} failed: {source}")]
    Downstream {
        handle: String,
        #[source]
        source: ShopifyError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    Created,
    Updated,
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncAction::Created => write!(f, "created"),
            SyncAction::Updated => write!(f, "updated"),
        }
    }
}

/// A validated record, ready to be written.
#[derive(Debug, Clone)]
pub struct PreparedSync {
    pub record: DogRecord,
    pub entry_id: String,
    pub handle: String,
    pub payload: ProductPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
    pub action: SyncAction,
    pub handle: String,
    /// The product as returned by Shopify.
    pub product: Value,
}

/// Maps and validates a raw payload, then derives its handle and payload.
///
/// # Errors
///
/// Returns [`SyncError::MissingIdentifier`] when the payload carries no entry id.
pub fn prepare(raw: &Value, observer: &dyn SyncObserver) -> Result<PreparedSync, SyncError> {
    observer.received(raw);

    let record = map_raw_record(raw);
    observer.mapped(&record);

    let Some(entry_id) = record.entry_id.clone() else {
        let error = SyncError::MissingIdentifier {
            payload: raw.clone(),
        };
        observer.failed(&error);
        return Err(error);
    };

    let handle = derive_handle(&entry_id);
    let payload = build_product_payload(&record, &handle);

    Ok(PreparedSync {
        record,
        entry_id,
        handle,
        payload,
    })
}

/// Syncs dog records into one Shopify store.
pub struct DogSync {
    client: ShopifyAdminClient,
    observer: Arc<dyn SyncObserver>,
}

impl DogSync {
    #[must_use]
    pub fn new(client: ShopifyAdminClient) -> Self {
        Self::with_observer(client, Arc::new(TracingObserver))
    }

    #[must_use]
    pub fn with_observer(client: ShopifyAdminClient, observer: Arc<dyn SyncObserver>) -> Self {
        Self { client, observer }
    }

    #[must_use]
    pub fn observer(&self) -> &dyn SyncObserver {
        self.observer.as_ref()
    }

    /// Runs the whole pipeline for one payload.
    ///
    /// # Errors
    ///
    /// See [`prepare`] and [`DogSync::execute`].
    pub async fn run(&self, raw: &Value) -> Result<SyncOutcome, SyncError> {
        let prepared = prepare(raw, self.observer())?;
        self.execute(prepared).await
    }

    /// Looks the handle up once and issues exactly one create or update.
    ///
    /// A failed lookup is treated as "not found", so the write becomes a create.
    ///
    /// # Errors
    ///
    /// - [`SyncError::DownstreamWrite`] when Shopify rejects the write.
    /// - [`SyncError::Downstream`] on transport failure or an unreadable response.
    pub async fn execute(&self, prepared: PreparedSync) -> Result<SyncOutcome, SyncError> {
        let PreparedSync {
            handle, payload, ..
        } = prepared;

        let located = locate(&self.client, &handle).await;
        self.observer.located(&handle, &located);

        let result = match located.existing() {
            Some(existing) => {
                let product_id = existing.id;
                let payload = payload.into_update(product_id, &handle);
                self.client
                    .update_product(product_id, &payload)
                    .await
                    .map(|product| (SyncAction::Updated, product))
                    .map_err(|e| write_error(e, &handle, Some(product_id)))
            }
            None => self
                .client
                .create_product(&payload)
                .await
                .map(|product| (SyncAction::Created, product))
                .map_err(|e| write_error(e, &handle, None)),
        };

        match result {
            Ok((action, product)) => {
                let outcome = SyncOutcome {
                    action,
                    handle,
                    product,
                };
                self.observer.written(&outcome);
                Ok(outcome)
            }
            Err(error) => {
                self.observer.failed(&error);
                Err(error)
            }
        }
    }
}

fn write_error(error: ShopifyError, handle: &str, product_id: Option<i64>) -> SyncError {
    match error {
        ShopifyError::WriteRejected { kind, status, body } => SyncError::DownstreamWrite {
            kind,
            status,
            body,
            handle: handle.to_owned(),
            product_id,
        },
        source => SyncError::Downstream {
            handle: handle.to_owned(),
            source,
        },
    }
}
