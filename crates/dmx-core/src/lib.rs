use thiserror::Error;

mod app_config;
mod config;
mod item;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use item::{CatalogItem, PriceTag, ProductLink};

/// A record failed to match the normalized shape the pipeline requires.
///
/// Produced by the transformer when a kept item cannot be normalized, and by
/// the CSV writer when a required scalar cannot be extracted from a retained
/// descriptor.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("item {item}: missing required field `{field}`")]
    MissingField { item: String, field: &'static str },

    #[error("item {item}: field `{field}` has incompatible shape: {reason}")]
    IncompatibleShape {
        item: String,
        field: &'static str,
        reason: String,
    },
}

/// Errors produced while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
