//! Memoizing wrapper around an [`EmbeddingProvider`].
//!
//! Keys are BLAKE3 hashes of the text. Lead authors recur across papers and the preference
//! statement is compared against every paper, so one run asks for the same text many times;
//! the wrapper makes sure the inner provider sees each distinct text once.

use std::sync::Arc;

use moka::sync::Cache;
use tracing::debug;

use super::error::EmbeddingError;
use super::provider::EmbeddingProvider;
use crate::constants::DEFAULT_EMBEDDING_CACHE_CAPACITY;

pub struct CachedEmbedder<E> {
    inner: E,
    entries: Cache<[u8; 32], Arc<Vec<f32>>>,
}

impl<E: std::fmt::Debug> std::fmt::Debug for CachedEmbedder<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedEmbedder")
            .field("inner", &self.inner)
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

impl<E: EmbeddingProvider> CachedEmbedder<E> {
    pub fn new(inner: E) -> Self {
        Self::with_capacity(inner, DEFAULT_EMBEDDING_CACHE_CAPACITY)
    }

    /// Capacity should exceed the number of distinct texts in one run.
    pub fn with_capacity(inner: E, capacity: u64) -> Self {
        Self {
            inner,
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Returns the cached vector for `text`, encoding it on first use.
    pub fn encode_shared(&self, text: &str) -> Result<Arc<Vec<f32>>, EmbeddingError> {
        let key = *blake3::hash(text.as_bytes()).as_bytes();

        if let Some(hit) = self.entries.get(&key) {
            return Ok(hit);
        }

        let vector = Arc::new(self.inner.encode(text)?);
        if vector.len() != self.inner.embedding_dim() {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.inner.embedding_dim(),
                actual: vector.len(),
            });
        }

        debug!(text_len = text.len(), "Embedding cached");
        self.entries.insert(key, Arc::clone(&vector));
        Ok(vector)
    }

    /// Drops every memoized vector.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

impl<E: EmbeddingProvider> EmbeddingProvider for CachedEmbedder<E> {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.encode_shared(text).map(|v| v.as_ref().clone())
    }

    fn embedding_dim(&self) -> usize {
        self.inner.embedding_dim()
    }
}
