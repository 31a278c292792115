use std::cmp::Ordering;
use std::fmt::Debug;

use tracing::debug;

use crate::features::{Feature, FeatureScore};

use super::error::RankingError;

/// A best-first total order over one run's items under one feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<K> {
    feature: Feature,
    order: Vec<K>,
}

impl<K> Ranking<K> {
    /// Wraps an existing best-first order. [`aggregate`](super::aggregate) checks that it is
    /// a permutation of the item set.
    pub fn from_order(feature: Feature, order: Vec<K>) -> Self {
        Self { feature, order }
    }

    pub fn feature(&self) -> Feature {
        self.feature
    }

    pub fn order(&self) -> &[K] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_order(self) -> Vec<K> {
        self.order
    }
}

impl<K: PartialEq> Ranking<K> {
    /// Zero-based position of `key` (linear scan).
    pub fn position(&self, key: &K) -> Option<usize> {
        self.order.iter().position(|k| k == key)
    }
}

/// Orders items by score, highest first. Tied items keep their input order.
pub fn build_ranking<K: Debug>(
    feature: Feature,
    mut scores: Vec<FeatureScore<K>>,
) -> Result<Ranking<K>, RankingError> {
    if let Some(bad) = scores.iter().find(|s| !s.value.is_finite()) {
        return Err(RankingError::NonFiniteScore {
            feature,
            key: format!("{:?}", bad.key),
        });
    }

    // sort_by is stable
    scores.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));

    debug!(
        feature = %feature,
        items = scores.len(),
        top = scores.first().map(|s| s.value),
        "Ranking built"
    );

    Ok(Ranking {
        feature,
        order: scores.into_iter().map(|s| s.key).collect(),
    })
}
