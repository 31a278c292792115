use thiserror::Error;

use crate::config::ConfigError;
use crate::embedding::EmbeddingError;
use crate::features::FeatureError;
use crate::ranking::RankingError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("duplicate paper title: '{title}'")]
    DuplicatePaper { title: String },

    #[error("feature extraction failed: {0}")]
    Feature(#[from] FeatureError),

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("ranking failed: {0}")]
    Ranking(#[from] RankingError),

    #[error("invalid settings: {0}")]
    Config(#[from] ConfigError),
}
