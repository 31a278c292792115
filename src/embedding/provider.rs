use std::sync::Arc;

use super::error::EmbeddingError;

/// Maps text to a fixed-dimension vector.
///
/// Every text within one run must go through the same provider (same model, same settings);
/// similarities between vectors from different providers are meaningless.
pub trait EmbeddingProvider: Send + Sync {
    /// Encodes a single text.
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Output dimension of [`encode`](Self::encode).
    fn embedding_dim(&self) -> usize;

    /// Encodes several texts, failing on the first error.
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.encode(text)).collect()
    }
}

impl<E: EmbeddingProvider + ?Sized> EmbeddingProvider for Arc<E> {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).encode(text)
    }

    fn embedding_dim(&self) -> usize {
        (**self).embedding_dim()
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).encode_batch(texts)
    }
}
