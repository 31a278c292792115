//! End-to-end ranking run.
//!
//! ```text
//! papers -> features (x weight table) -> rankings -> consensus -> coarse_k prefix -> judge -> top_k
//! ```
//!
//! [`PaperRanker`] owns its collaborators (embedder, weights, judgment reranker); nothing is
//! resolved from globals. Input problems abort the run with a [`PipelineError`]. Judgment
//! problems never do: they show up as [`JudgmentStatus::Fallback`].

pub mod error;


pub use error::PipelineError;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ConfigError;
use crate::constants::{DEFAULT_COARSE_K, DEFAULT_NAMESPACE, DEFAULT_PREFERENCE, DEFAULT_TOP_K};
use crate::embedding::{CachedEmbedder, EmbeddingProvider};
use crate::features::{SemanticContext, score_papers};
use crate::judgment::{FallbackReason, JudgmentReranker, RerankOutcome};
use crate::paper::{Paper, PaperKey};
use crate::ranking::{WeightTable, aggregate, build_ranking, select};

/// Per-run knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct RankSettings {
    pub namespace: String,
    pub preference: String,
    pub top_k: usize,
    pub coarse_k: usize,
}

impl Default for RankSettings {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            preference: DEFAULT_PREFERENCE.to_string(),
            top_k: DEFAULT_TOP_K,
            coarse_k: DEFAULT_COARSE_K,
        }
    }
}

impl RankSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_k == 0 {
            return Err(ConfigError::InvalidTopK);
        }
        if self.coarse_k < self.top_k {
            return Err(ConfigError::CoarseBelowTop {
                coarse_k: self.coarse_k,
                top_k: self.top_k,
            });
        }
        Ok(())
    }
}

/// How the final order was decided.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum JudgmentStatus {
    Judged,
    Fallback { reason: FallbackReason },
    /// Nothing to judge (empty feed).
    Skipped,
}

impl From<&RerankOutcome> for JudgmentStatus {
    fn from(outcome: &RerankOutcome) -> Self {
        match outcome {
            RerankOutcome::Judged { .. } => JudgmentStatus::Judged,
            RerankOutcome::Fallback { reason, .. } => JudgmentStatus::Fallback {
                reason: reason.clone(),
            },
        }
    }
}

/// Output of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RankedShortlist {
    pub run_id: Uuid,
    pub namespace: String,
    pub generated_at: DateTime<Utc>,
    /// Final papers, best first (at most `top_k`).
    pub papers: Vec<Paper>,
    pub judgment: JudgmentStatus,
    /// Consensus scores of the coarse prefix, best first.
    pub consensus: Vec<(PaperKey, f64)>,
}

impl RankedShortlist {
    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.papers.iter().map(|p| p.title.as_str())
    }
}

pub struct PaperRanker<E> {
    embedder: Arc<CachedEmbedder<E>>,
    weights: WeightTable,
    reranker: JudgmentReranker,
    settings: RankSettings,
}

impl<E: std::fmt::Debug> std::fmt::Debug for PaperRanker<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaperRanker")
            .field("embedder", &self.embedder)
            .field("weights", &self.weights)
            .field("reranker", &self.reranker)
            .field("settings", &self.settings)
            .finish()
    }
}

impl<E: EmbeddingProvider> PaperRanker<E> {
    pub fn new(
        embedder: Arc<CachedEmbedder<E>>,
        weights: WeightTable,
        reranker: JudgmentReranker,
        settings: RankSettings,
    ) -> Result<Self, PipelineError> {
        settings.validate()?;
        Ok(Self {
            embedder,
            weights,
            reranker,
            settings,
        })
    }

    pub fn settings(&self) -> &RankSettings {
        &self.settings
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn embedder(&self) -> &CachedEmbedder<E> {
        &self.embedder
    }

    /// Ranks one listing and returns the final shortlist.
    pub async fn rank(&self, papers: Vec<Paper>) -> Result<RankedShortlist, PipelineError> {
        let run_id = Uuid::new_v4();
        let keys = unique_keys(&papers)?;

        info!(
            %run_id,
            namespace = %self.settings.namespace,
            papers = papers.len(),
            features = self.weights.len(),
            "Ranking run started"
        );

        if papers.is_empty() {
            info!(%run_id, "Empty listing; nothing to rank");
            return Ok(self.shortlist(run_id, vec![], JudgmentStatus::Skipped, vec![]));
        }

        let coarse = self.coarse_rank(&papers, &keys)?;

        debug!(
            %run_id,
            coarse = coarse.len(),
            top_score = coarse.first().map(|(_, s)| *s),
            "Coarse shortlist selected"
        );

        let mut by_key: HashMap<PaperKey, Paper> =
            papers.into_iter().map(|p| (p.key(), p)).collect();
        let shortlist: Vec<Paper> = coarse
            .iter()
            .filter_map(|(key, _)| by_key.remove(key))
            .collect();

        let outcome = self
            .reranker
            .rerank(shortlist, self.settings.top_k, &self.settings.preference)
            .await;
        let judgment = JudgmentStatus::from(&outcome);

        info!(
            %run_id,
            status = outcome.debug_status(),
            selected = outcome.papers().len(),
            "Ranking run finished"
        );

        Ok(self.shortlist(run_id, outcome.into_papers(), judgment, coarse))
    }

    /// Scores, ranks and aggregates every paper, then keeps the `coarse_k` best.
    fn coarse_rank(
        &self,
        papers: &[Paper],
        keys: &[PaperKey],
    ) -> Result<Vec<(PaperKey, f64)>, PipelineError> {
        // embedded once per run, shared by both semantic features
        let preference = if self.weights.features().any(|f| f.is_semantic()) {
            self.embedder.encode_shared(&self.settings.preference)?
        } else {
            Arc::new(Vec::new())
        };
        let ctx = SemanticContext::new(self.embedder.as_ref(), preference.as_slice());

        let mut rankings = BTreeMap::new();
        for feature in self.weights.features() {
            let scores = score_papers(feature, papers, &ctx)?;
            rankings.insert(feature, build_ranking(feature, scores)?);
        }

        let consensus = aggregate(&rankings, &self.weights, keys)?;
        Ok(select(consensus.into_entries(), self.settings.coarse_k)?)
    }

    fn shortlist(
        &self,
        run_id: Uuid,
        papers: Vec<Paper>,
        judgment: JudgmentStatus,
        consensus: Vec<(PaperKey, f64)>,
    ) -> RankedShortlist {
        RankedShortlist {
            run_id,
            namespace: self.settings.namespace.clone(),
            generated_at: Utc::now(),
            papers,
            judgment,
            consensus,
        }
    }
}

/// Keys in input order. Titles that differ only in case count as duplicates, since the
/// judge's picks are matched back case-insensitively.
fn unique_keys(papers: &[Paper]) -> Result<Vec<PaperKey>, PipelineError> {
    let mut seen = HashSet::with_capacity(papers.len());
    papers
        .iter()
        .map(|paper| {
            let key = paper.key();
            if !seen.insert(key.as_str().to_lowercase()) {
                return Err(PipelineError::DuplicatePaper {
                    title: paper.title.clone(),
                });
            }
            Ok(key)
        })
        .collect()
}
