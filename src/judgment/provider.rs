use async_trait::async_trait;

use super::error::JudgmentError;
use super::types::{JudgmentRequest, Recommendation};

/// External judge that picks the most relevant papers from a shortlist.
///
/// Recommendations are returned in the judge's preferred order. Titles need not match the
/// shortlist exactly; the reranker reconciles them.
#[async_trait]
pub trait JudgmentProvider: Send + Sync {
    async fn judge(&self, request: &JudgmentRequest)
    -> Result<Vec<Recommendation>, JudgmentError>;
}
