//! Per-signal scoring functions. Higher is always better.

use crate::embedding::{CachedEmbedder, EmbeddingProvider, l2_similarity};
use crate::paper::{Contributor, Paper};

use super::error::FeatureError;

fn lead(paper: &Paper) -> Result<&Contributor, FeatureError> {
    paper
        .lead_contributor()
        .ok_or_else(|| FeatureError::EmptyContributorSet {
            title: paper.title.clone(),
        })
}

fn mean_over_contributors(
    paper: &Paper,
    metric: impl Fn(&Contributor) -> u64,
) -> Result<f64, FeatureError> {
    if paper.contributors.is_empty() {
        return Err(FeatureError::EmptyContributorSet {
            title: paper.title.clone(),
        });
    }
    let total: f64 = paper.contributors.iter().map(|c| metric(c) as f64).sum();
    Ok(total / paper.contributors.len() as f64)
}

pub fn first_author_citations(paper: &Paper) -> Result<f64, FeatureError> {
    Ok(lead(paper)?.citations as f64)
}

pub fn first_author_h_index(paper: &Paper) -> Result<f64, FeatureError> {
    Ok(lead(paper)?.h_index as f64)
}

pub fn mean_author_citations(paper: &Paper) -> Result<f64, FeatureError> {
    mean_over_contributors(paper, |c| c.citations)
}

pub fn mean_author_h_index(paper: &Paper) -> Result<f64, FeatureError> {
    mean_over_contributors(paper, |c| c.h_index)
}

/// Similarity between the lead author's interests and the preference vector.
pub fn first_author_interest_match<E: EmbeddingProvider>(
    paper: &Paper,
    embedder: &CachedEmbedder<E>,
    preference: &[f32],
) -> Result<f64, FeatureError> {
    let interests = embedder.encode_shared(&lead(paper)?.interests)?;
    Ok(l2_similarity(&interests, preference)?)
}

/// Similarity between the abstract and the preference vector.
pub fn abstract_match<E: EmbeddingProvider>(
    paper: &Paper,
    embedder: &CachedEmbedder<E>,
    preference: &[f32],
) -> Result<f64, FeatureError> {
    let abstract_vec = embedder.encode_shared(&paper.abstract_text)?;
    Ok(l2_similarity(&abstract_vec, preference)?)
}
