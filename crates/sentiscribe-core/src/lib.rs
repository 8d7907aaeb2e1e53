//! Shared domain types and configuration for sentiscribe.
//!
//! Holds the only first-party decision logic in the system: the classifier
//! label table ([`normalize_label`]) and the score bucketing
//! ([`score_to_rank`]). Everything else delegates to external models.

pub mod app_config;
pub mod config;
pub mod label;
pub mod rank;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use label::{normalize_label, SentimentLabel};
pub use rank::{score_to_rank, Rank};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown classifier label: {0}")]
    UnknownLabel(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
