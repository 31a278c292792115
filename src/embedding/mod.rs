//! Embedding provider + similarity.
//!
//! - [`provider`] defines the [`EmbeddingProvider`] seam the features are written against.
//! - [`encoder`] is the candle-backed sentence encoder (with a stub mode).
//! - [`cache`] memoizes provider calls per distinct text.
//! - [`similarity`] is the single metric every semantic feature uses.

/// BERT encoder with mean pooling.
pub mod bert;
/// Per-text memoization.
pub mod cache;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Sentence encoder.
pub mod encoder;
mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
/// Provider trait.
pub mod provider;
/// L2-distance similarity.
pub mod similarity;
/// Tokenizer loading helpers.
pub mod utils;

pub use cache::CachedEmbedder;
pub use encoder::{ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EncoderConfig, SentenceEmbedder};
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;
pub use provider::EmbeddingProvider;
pub use similarity::{l2_distance, l2_similarity};
