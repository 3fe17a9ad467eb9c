pub mod app_config;
pub mod availability;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod handle;
pub mod mapping;
pub mod payload;
pub mod record;

pub use app_config::{AppConfig, Environment, ShopifyCredentials, ShopifySettings};
pub use availability::{normalize_availability, AVAILABLE_NOW};
pub use config::{load_app_config, load_app_config_from_env};
pub use diagnostics::EnvDiagnostics;
pub use error::ConfigError;
pub use handle::derive_handle;
pub use mapping::map_raw_record;
pub use payload::{build_product_payload, ImageRef, ProductPayload};
pub use record::DogRecord;
