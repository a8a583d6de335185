//! Shared configuration and domain types for postwatch.
//!
//! [`load_app_config`] reads the process environment into an [`AppConfig`];
//! [`load_creators`] reads and validates the tracked creator list.

pub mod app_config;
pub mod config;
pub mod creators;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use creators::{load_creators, parse_creators, Creator, CreatorsFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read creators file {path}: {source}")]
    CreatorsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse creators file: {0}")]
    CreatorsFileParse(#[from] serde_yaml::Error),

    #[error("creators validation failed: {0}")]
    Validation(String),
}
