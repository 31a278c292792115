//! Feature extraction: one scalar per paper per signal.
//!
//! The four metric features are pure functions of the paper. The two semantic features
//! compare an embedding against the preference vector through a [`CachedEmbedder`], so a
//! text shared by several papers (a recurring lead author's interests, for instance) hits
//! the provider once.

pub mod error;
pub mod extractors;


pub use error::FeatureError;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embedding::{CachedEmbedder, EmbeddingProvider};
use crate::paper::{Paper, PaperKey};

/// One ranking signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    FirstAuthorCitations,
    FirstAuthorHIndex,
    MeanAuthorCitations,
    MeanAuthorHIndex,
    FirstAuthorInterestMatch,
    AbstractMatch,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::FirstAuthorCitations,
        Feature::FirstAuthorHIndex,
        Feature::MeanAuthorCitations,
        Feature::MeanAuthorHIndex,
        Feature::FirstAuthorInterestMatch,
        Feature::AbstractMatch,
    ];

    /// Stable snake_case name (used in config keys and logs).
    pub fn name(&self) -> &'static str {
        match self {
            Feature::FirstAuthorCitations => "first_author_citations",
            Feature::FirstAuthorHIndex => "first_author_h_index",
            Feature::MeanAuthorCitations => "mean_author_citations",
            Feature::MeanAuthorHIndex => "mean_author_h_index",
            Feature::FirstAuthorInterestMatch => "first_author_interest_match",
            Feature::AbstractMatch => "abstract_match",
        }
    }

    /// Returns `true` if scoring this feature calls the embedding provider.
    pub fn is_semantic(&self) -> bool {
        matches!(
            self,
            Feature::FirstAuthorInterestMatch | Feature::AbstractMatch
        )
    }

    /// Scores one paper.
    pub fn score<E: EmbeddingProvider>(
        &self,
        paper: &Paper,
        ctx: &SemanticContext<'_, E>,
    ) -> Result<f64, FeatureError> {
        match self {
            Feature::FirstAuthorCitations => extractors::first_author_citations(paper),
            Feature::FirstAuthorHIndex => extractors::first_author_h_index(paper),
            Feature::MeanAuthorCitations => extractors::mean_author_citations(paper),
            Feature::MeanAuthorHIndex => extractors::mean_author_h_index(paper),
            Feature::FirstAuthorInterestMatch => {
                extractors::first_author_interest_match(paper, ctx.embedder, ctx.preference)
            }
            Feature::AbstractMatch => {
                extractors::abstract_match(paper, ctx.embedder, ctx.preference)
            }
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Feature::ALL
            .into_iter()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| FeatureError::UnknownFeature {
                name: s.to_string(),
            })
    }
}

/// Score of one item under one feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureScore<K> {
    pub key: K,
    pub value: f64,
}

impl<K> FeatureScore<K> {
    pub fn new(key: K, value: f64) -> Self {
        Self { key, value }
    }
}

/// Embedding provider and preference vector shared by the semantic features of one run.
pub struct SemanticContext<'a, E> {
    pub embedder: &'a CachedEmbedder<E>,
    pub preference: &'a [f32],
}

impl<'a, E: EmbeddingProvider> SemanticContext<'a, E> {
    pub fn new(embedder: &'a CachedEmbedder<E>, preference: &'a [f32]) -> Self {
        Self {
            embedder,
            preference,
        }
    }
}

/// Scores every paper under `feature`, in input order.
pub fn score_papers<E: EmbeddingProvider>(
    feature: Feature,
    papers: &[Paper],
    ctx: &SemanticContext<'_, E>,
) -> Result<Vec<FeatureScore<PaperKey>>, FeatureError> {
    let scores = papers
        .iter()
        .map(|paper| Ok(FeatureScore::new(paper.key(), feature.score(paper, ctx)?)))
        .collect::<Result<Vec<_>, FeatureError>>()?;

    debug!(
        feature = %feature,
        papers = scores.len(),
        "Feature scored"
    );

    Ok(scores)
}
