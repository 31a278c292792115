use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("paper '{title}' has no contributors")]
    EmptyContributorSet { title: String },

    #[error("unknown feature name: {name}")]
    UnknownFeature { name: String },

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
}
