//! Final-stage judgment reranking.
//!
//! The coarse shortlist is sent to an external judge (a chat model via [`GenaiJudge`]) that
//! picks the best `top_k` papers and summarises each. The judge is advisory: whatever goes
//! wrong, [`JudgmentReranker::rerank`] returns a usable [`RerankOutcome`] and the caller
//! can inspect [`FallbackReason`] to see why the coarse order was kept.

pub mod error;
pub mod genai_judge;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod provider;
pub mod reranker;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::JudgmentError;
pub use genai_judge::GenaiJudge;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockJudge;
pub use provider::JudgmentProvider;
pub use reranker::JudgmentReranker;
pub use types::{Candidate, FallbackReason, JudgmentRequest, Recommendation, RerankOutcome};
