//! HTTP client for the Shopify Admin REST `products` resource.

use std::time::Duration;

use dogsync_core::{ProductPayload, ShopifyCredentials};
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde_json::Value;

use crate::error::{ShopifyError, WriteKind};
use crate::types::{AdminProduct, AdminProductsResponse};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Client for the three Admin API calls the sync needs: lookup by handle,
/// create, and update.
///
/// Every request carries the store's access token. Nothing is retried; a
/// failed call is reported once and the webhook sender redelivers.
pub struct ShopifyAdminClient {
    client: Client,
    access_token: String,
    base_url: Url,
}

#[derive(Serialize)]
struct ProductEnvelope<'a> {
    product: &'a ProductPayload,
}

impl ShopifyAdminClient {
    /// Creates a client for the store described by `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ShopifyError::InvalidBaseUrl`] if the
    /// store domain does not form a valid URL.
    pub fn new(
        credentials: &ShopifyCredentials,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ShopifyError> {
        Self::with_base_url(
            &credentials.access_token,
            timeout_secs,
            user_agent,
            &credentials.admin_base_url(),
        )
    }

    /// Creates a client against an explicit API base (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ShopifyError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ShopifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A single trailing slash makes `Url::join` append below the version
        // segment instead of replacing it.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ShopifyError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url,
        })
    }

    /// Looks up the product with exactly this handle.
    ///
    /// Returns the first match, or `None` when the filtered list is empty.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::Http`] on network or TLS failure.
    /// - [`ShopifyError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ShopifyError::Deserialize`] if the body is not a product list.
    pub async fn find_product_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<AdminProduct>, ShopifyError> {
        let url = self.products_url(Some(handle))?;

        let response = self
            .client
            .get(url.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShopifyError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<AdminProductsResponse>(&body).map_err(|e| {
            ShopifyError::Deserialize {
                context: format!("product lookup for handle {handle}"),
                source: e,
            }
        })?;

        Ok(parsed.products.into_iter().next())
    }

    /// Creates a product. Returns the created product as sent back by Shopify.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::WriteRejected`] on any non-2xx status, with the raw body.
    /// - [`ShopifyError::Http`] on network or TLS failure.
    /// - [`ShopifyError::Deserialize`] if a 2xx body is not JSON.
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<Value, ShopifyError> {
        let url = self.products_url(None)?;
        let response = self
            .client
            .post(url)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&ProductEnvelope { product: payload })
            .send()
            .await?;

        Self::read_write_response(response, WriteKind::Create, &payload.handle).await
    }

    /// Replaces the mutable fields of product `product_id`.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::WriteRejected`] on any non-2xx status, with the raw body.
    /// - [`ShopifyError::Http`] on network or TLS failure.
    /// - [`ShopifyError::Deserialize`] if a 2xx body is not JSON.
    pub async fn update_product(
        &self,
        product_id: i64,
        payload: &ProductPayload,
    ) -> Result<Value, ShopifyError> {
        let url = self.product_url(product_id)?;
        let response = self
            .client
            .put(url)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&ProductEnvelope { product: payload })
            .send()
            .await?;

        Self::read_write_response(response, WriteKind::Update, &payload.handle).await
    }

    async fn read_write_response(
        response: Response,
        kind: WriteKind,
        handle: &str,
    ) -> Result<Value, ShopifyError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ShopifyError::WriteRejected {
                kind,
                status: status.as_u16(),
                body,
            });
        }

        let parsed = serde_json::from_str::<Value>(&body).map_err(|e| ShopifyError::Deserialize {
            context: format!("product {kind} response for handle {handle}"),
            source: e,
        })?;

        Ok(unwrap_product(parsed))
    }

    /// `<base>/products.json`, optionally filtered by handle.
    fn products_url(&self, handle: Option<&str>) -> Result<Url, ShopifyError> {
        let mut url = self.join("products.json")?;
        if let Some(handle) = handle {
            url.query_pairs_mut().append_pair("handle", handle);
        }
        Ok(url)
    }

    /// `<base>/products/<id>.json`.
    fn product_url(&self, product_id: i64) -> Result<Url, ShopifyError> {
        self.join(&format!("products/{product_id}.json"))
    }

    fn join(&self, path: &str) -> Result<Url, ShopifyError> {
        self.base_url
            .join(path)
            .map_err(|e| ShopifyError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Returns the `product` member of a write response, or the whole body when
/// that member is missing or null.
fn unwrap_product(body: Value) -> Value {
    match body {
        Value::Object(mut fields) => match fields.remove("product") {
            Some(product) if !product.is_null() => product,
            _ => Value::Object(fields),
        },
        other => other,
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
