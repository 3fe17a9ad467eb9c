//! Admin API response types.
//!
//! Only the fields the sync reads are typed. Write responses are passed back
//! to the webhook caller untouched as `serde_json::Value`.

use serde::Deserialize;

/// Response from `GET /products.json`.
#[derive(Debug, Deserialize)]
pub struct AdminProductsResponse {
    #[serde(default)]
    pub products: Vec<AdminProduct>,
}

/// An existing product as returned by the handle lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminProduct {
    /// Numeric product id assigned by Shopify at creation.
    pub id: i64,

    pub handle: String,

    #[serde(default)]
    pub title: Option<String>,
}
