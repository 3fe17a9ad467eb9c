//! Resource locator: find the product already published under a handle.

use crate::client::ShopifyAdminClient;
use crate::error::ShopifyError;
use crate::types::AdminProduct;

/// Result of looking a handle up before writing.
#[derive(Debug)]
pub enum LocateOutcome {
    Found(AdminProduct),
    NotFound,
    /// The lookup itself failed. The sync carries on as if nothing was found
    /// and creates the product, accepting a possible duplicate over turning
    /// the webhook away.
    Degraded(ShopifyError),
}

impl LocateOutcome {
    /// The product to update, if any. `Degraded` counts as absent.
    #[must_use]
    pub fn existing(&self) -> Option<&AdminProduct> {
        match self {
            LocateOutcome::Found(product) => Some(product),
            LocateOutcome::NotFound | LocateOutcome::Degraded(_) => None,
        }
    }
}

/// Issues a single handle-filtered lookup. Never fails; see [`LocateOutcome`].
pub async fn locate(client: &ShopifyAdminClient, handle: &str) -> LocateOutcome {
    match client.find_product_by_handle(handle).await {
        Ok(Some(product)) => LocateOutcome::Found(product),
        Ok(None) => LocateOutcome::NotFound,
        Err(e) => LocateOutcome::Degraded(e),
    }
}
