use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read regions file {path}: {source}")]
    RegionsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse regions file: {0}")]
    RegionsFileParse(#[from] serde_yaml::Error),
    #[error("regions file validation failed: {0}")]
    Validation(String),
}

pub mod app_config;
pub mod config;
pub mod regions;
pub mod shop;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use regions::{load_regions, RegionConfig, RegionsFile};
pub use shop::{Coordinates, NewImportedReview, NewShopRecord};
