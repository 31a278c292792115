use thiserror::Error;

use crate::features::Feature;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("feature {feature} produced a non-finite score for {key}")]
    NonFiniteScore { feature: Feature, key: String },

    #[error("ranking for {feature} is not a permutation of the item set")]
    IncompleteRanking { feature: Feature },

    #[error("no weight configured for feature {feature}")]
    UnknownFeatureWeight { feature: Feature },

    #[error("invalid weight {weight} for feature {feature}: must be finite and non-negative")]
    InvalidWeight { feature: Feature, weight: f64 },

    #[error("item {key} appears more than once")]
    DuplicateItem { key: String },

    #[error("invalid selection bound {bound}: must be at least 1")]
    InvalidBound { bound: usize },
}
