//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::features::Feature;
use crate::ranking::RankingError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric variable could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    InvalidNumber {
        name: String,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("failed to parse {name}='{value}': {source}")]
    InvalidFloat {
        name: String,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("failed to parse {name}='{value}': expected true/false")]
    InvalidBool { name: String, value: String },

    /// A weight override was rejected by the weight table.
    #[error("invalid weight override {name}: {source}")]
    InvalidWeight {
        name: String,
        #[source]
        source: RankingError,
    },

    #[error("top_k must be at least 1")]
    InvalidTopK,

    /// The coarse prefix must be able to hold the final shortlist.
    #[error("coarse_k ({coarse_k}) must be >= top_k ({top_k})")]
    CoarseBelowTop { coarse_k: usize, top_k: usize },

    #[error("max_contributors must be at least 1")]
    InvalidContributorCap,

    #[error("judge timeout must be at least 1 second")]
    InvalidTimeout,

    /// A semantic feature is weighted but no encoder directory is configured.
    #[error(
        "{feature} needs a sentence encoder: set {} or {weight_var}=0",
        crate::embedding::EncoderConfig::ENV_MODEL_DIR
    )]
    EncoderRequired { feature: Feature, weight_var: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
