pub mod client;
pub mod error;
pub mod locate;
pub mod observer;
pub mod sync;
pub mod types;

pub use client::ShopifyAdminClient;
pub use error::{ShopifyError, WriteKind};
pub use locate::LocateOutcome;
pub use observer::{SyncObserver, TracingObserver};
pub use sync::{prepare, DogSync, PreparedSync, SyncAction, SyncError, SyncOutcome};
pub use types::{AdminProduct, AdminProductsResponse};
