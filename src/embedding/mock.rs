//! Scriptable in-memory embedder for tests.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::error::EmbeddingError;
use super::provider::EmbeddingProvider;

/// Returns fixed vectors for registered texts and a hash-derived vector otherwise.
/// Records every call so tests can assert on provider traffic.
#[derive(Debug)]
pub struct MockEmbedder {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl MockEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: HashMap::new(),
            failing: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Registers the vector returned for `text`.
    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.into(), vector);
        self
    }

    /// Makes `encode(text)` fail with an inference error.
    pub fn failing_on(mut self, text: impl Into<String>) -> Self {
        self.failing.push(text.into());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn derived_vector(&self, text: &str) -> Vec<f32> {
        let digest = blake3::hash(text.as_bytes());
        digest
            .as_bytes()
            .iter()
            .cycle()
            .take(self.dim)
            .map(|b| f32::from(*b) / 255.0)
            .collect()
    }
}

impl EmbeddingProvider for MockEmbedder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.lock().push(text.to_string());

        if self.failing.iter().any(|t| t == text) {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("mock failure for {text:?}"),
            });
        }

        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.derived_vector(text)))
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }
}
