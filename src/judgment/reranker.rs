use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::constants::DEFAULT_JUDGE_TIMEOUT_SECS;
use crate::paper::Paper;

use super::error::JudgmentError;
use super::provider::JudgmentProvider;
use super::types::{FallbackReason, JudgmentRequest, Recommendation, RerankOutcome};

/// Final-stage reranker: asks an external judge to pick from the coarse shortlist.
#[derive(Clone)]
pub struct JudgmentReranker {
    provider: Option<Arc<dyn JudgmentProvider>>,
    enabled: bool,
    timeout: Duration,
}

impl std::fmt::Debug for JudgmentReranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JudgmentReranker")
            .field("has_provider", &self.provider.is_some())
            .field("enabled", &self.enabled)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl JudgmentReranker {
    pub fn new(provider: Arc<dyn JudgmentProvider>, timeout: Duration) -> Self {
        Self {
            provider: Some(provider),
            enabled: true,
            timeout,
        }
    }

    /// A reranker that always falls back to the coarse order.
    pub fn disabled() -> Self {
        Self {
            provider: None,
            enabled: false,
            timeout: Duration::from_secs(DEFAULT_JUDGE_TIMEOUT_SECS),
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled && self.provider.is_some()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Picks up to `top_k` papers from `shortlist`.
    ///
    /// Never fails: a disabled reranker, a provider error, a timeout, or a reply that
    /// matches no shortlisted title all yield the first `top_k` shortlist papers.
    pub async fn rerank(
        &self,
        shortlist: Vec<Paper>,
        top_k: usize,
        preference: &str,
    ) -> RerankOutcome {
        let provider = match (&self.provider, self.enabled) {
            (Some(provider), true) => provider,
            _ => {
                debug!("External judgment disabled; keeping coarse order");
                return fallback(shortlist, top_k, FallbackReason::Disabled);
            }
        };

        if shortlist.is_empty() {
            debug!("Empty shortlist; skipping judgment");
            return fallback(shortlist, top_k, FallbackReason::NoMatches);
        }

        let request = JudgmentRequest::new(preference, &shortlist, top_k);

        let result = match tokio::time::timeout(self.timeout, provider.judge(&request)).await {
            Ok(result) => result,
            Err(_) => Err(JudgmentError::Timeout {
                secs: self.timeout.as_secs(),
            }),
        };

        let recommendations = match result {
            Ok(recs) => recs,
            Err(JudgmentError::Timeout { secs }) => {
                warn!(timeout_secs = secs, "Judgment timed out; keeping coarse order");
                return fallback(shortlist, top_k, FallbackReason::Timeout);
            }
            Err(e) => {
                warn!(error = %e, "Judgment failed; keeping coarse order");
                return fallback(
                    shortlist,
                    top_k,
                    FallbackReason::ProviderFailed(e.to_string()),
                );
            }
        };

        let received = recommendations.len();
        let papers = match_recommendations(shortlist.clone(), recommendations, top_k);

        if papers.is_empty() {
            warn!(
                recommendations = received,
                "No recommended title matched the shortlist; keeping coarse order"
            );
            return fallback(shortlist, top_k, FallbackReason::NoMatches);
        }

        info!(
            recommendations = received,
            matched = papers.len(),
            "Judgment applied"
        );

        RerankOutcome::Judged { papers }
    }
}

fn fallback(mut shortlist: Vec<Paper>, top_k: usize, reason: FallbackReason) -> RerankOutcome {
    shortlist.truncate(top_k);
    RerankOutcome::Fallback {
        papers: shortlist,
        reason,
    }
}

fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Maps recommendations back onto shortlist papers in recommendation order.
///
/// Unmatched titles are dropped; a paper recommended twice is kept once (first summary wins).
fn match_recommendations(
    shortlist: Vec<Paper>,
    recommendations: Vec<Recommendation>,
    top_k: usize,
) -> Vec<Paper> {
    let mut slots: Vec<Option<Paper>> = shortlist.into_iter().map(Some).collect();
    let mut by_title: HashMap<String, usize> = HashMap::with_capacity(slots.len());
    for (i, paper) in slots.iter().enumerate() {
        if let Some(paper) = paper {
            by_title.entry(normalize_title(&paper.title)).or_insert(i);
        }
    }

    let mut picked = Vec::with_capacity(top_k.min(slots.len()));
    for rec in recommendations {
        if picked.len() == top_k {
            break;
        }
        let Some(&i) = by_title.get(&normalize_title(&rec.title)) else {
            debug!(title = %rec.title, "Dropping unmatched recommendation");
            continue;
        };
        // None once the paper has been taken
        let Some(mut paper) = slots[i].take() else {
            continue;
        };
        if let Some(summary) = rec.summary {
            paper.annotate(summary);
        }
        picked.push(paper);
    }

    picked
}
