//! Shared domain model and configuration for newsdesk.
//!
//! Holds the news item model produced by the ingest pipeline, the process
//! configuration read from the environment, and the YAML-backed source and
//! keyword configuration injected into the pipeline at startup.

pub mod app_config;
pub mod config;
pub mod news;
pub mod sources;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use news::{Category, CategoryParseError, CategoryResult, NewsItem};
pub use sources::{load_sources, parse_sources, FeedSource, KeywordGroup, SourcesConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sources file {path}: {source}")]
    SourcesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sources file: {0}")]
    SourcesFileParse(#[from] serde_yaml::Error),

    #[error("sources validation error: {0}")]
    Validation(String),
}
