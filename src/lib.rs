//! Sift library crate (used by the `sift` binary and integration tests).
//!
//! Ranks a day's paper listing against a reader's stated interests: six per-paper signals are
//! turned into per-signal rankings, merged with a weighted Copeland vote, cut to a coarse
//! shortlist, and finally handed to an LLM judge that picks and annotates the top few.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Paper`], [`Contributor`], [`PaperKey`] - Input records and identity
//! - [`PaperRanker`], [`RankSettings`], [`RankedShortlist`] - One ranking run
//! - [`Config`], [`ConfigError`] - Environment configuration
//!
//! ## Ranking
//! - [`Feature`], [`FeatureScore`] - Per-paper signals
//! - [`Ranking`], [`build_ranking`], [`aggregate`], [`select`], [`WeightTable`] - Coarse stage
//!
//! ## Embedding
//! - [`EmbeddingProvider`] - Provider seam
//! - [`SentenceEmbedder`], [`EncoderConfig`] - candle sentence encoder
//! - [`CachedEmbedder`] - Per-text memoization
//!
//! ## Judgment
//! - [`JudgmentProvider`], [`GenaiJudge`] - External judge
//! - [`JudgmentReranker`], [`RerankOutcome`], [`FallbackReason`] - Final stage
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod features;
pub mod judgment;
pub mod paper;
pub mod pipeline;
pub mod ranking;

pub use config::{Config, ConfigError};
pub use embedding::{
    CachedEmbedder, EmbeddingError, EmbeddingProvider, EncoderConfig, SentenceEmbedder,
    l2_distance, l2_similarity,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use features::{Feature, FeatureError, FeatureScore, SemanticContext, score_papers};
pub use judgment::{
    Candidate, FallbackReason, GenaiJudge, JudgmentError, JudgmentProvider, JudgmentRequest,
    JudgmentReranker, Recommendation, RerankOutcome,
};
#[cfg(any(test, feature = "mock"))]
pub use judgment::MockJudge;
pub use paper::{Contributor, FeedError, FeedLoader, Paper, PaperKey};
pub use pipeline::{JudgmentStatus, PaperRanker, PipelineError, RankSettings, RankedShortlist};
pub use ranking::{
    Consensus, Ranking, RankingError, WeightTable, aggregate, build_ranking, select,
};
