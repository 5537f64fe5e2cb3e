pub mod app_config;
pub mod comparison;
pub mod config;
pub mod credentials;
pub mod ean;
pub mod products;
pub mod suppliers;

use thiserror::Error;

pub use app_config::AppConfig;
pub use comparison::{compare_records, ComparisonResult, UNKNOWN_PRODUCT_NAME};
pub use config::{load_app_config, load_app_config_from_env};
pub use credentials::Credentials;
pub use ean::{normalize_ean, EanError};
pub use products::ProductRecord;
pub use suppliers::SupplierId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
