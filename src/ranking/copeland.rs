//! Weighted Copeland aggregation of per-feature rankings.
//!
//! Every unordered pair of items meets once per feature: the item ranked earlier gains the
//! feature's weight and the other loses it. An item's consensus score is the signed sum of
//! all its contests.
//!
//! Within one ranking of `P` items, the item at position `p` beats the `P - 1 - p` items
//! behind it and loses to the `p` ahead of it, so its net contribution is
//! `weight * (P - 1 - 2p)`. Summing that positional term gives exactly the pairwise total
//! without the `O(P²)` double loop; the only super-linear cost left is sorting the rankings.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::features::Feature;

use super::builder::Ranking;
use super::error::RankingError;
use super::weights::WeightTable;

/// Scores are rounded to this many steps per unit before sorting, so that sums which are
/// equal in exact arithmetic compare equal despite float accumulation order.
const SCORE_RESOLUTION: f64 = 1e9;

/// Items ordered by consensus score (best first) with their scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Consensus<K> {
    entries: Vec<(K, f64)>,
}

impl<K> Consensus<K> {
    /// `(item, score)` pairs, best first.
    pub fn entries(&self) -> &[(K, f64)] {
        &self.entries
    }

    /// Items, best first.
    pub fn order(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_order(self) -> Vec<K> {
        self.entries.into_iter().map(|(k, _)| k).collect()
    }

    pub fn into_entries(self) -> Vec<(K, f64)> {
        self.entries
    }
}

impl<K: PartialEq> Consensus<K> {
    pub fn score(&self, key: &K) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, s)| *s)
    }

    pub fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

/// Combines per-feature rankings into one consensus order.
///
/// Every ranking must be a permutation of `items` and every ranked feature must have a
/// weight. Items with equal scores keep their order from `items`.
pub fn aggregate<K>(
    rankings: &BTreeMap<Feature, Ranking<K>>,
    weights: &WeightTable,
    items: &[K],
) -> Result<Consensus<K>, RankingError>
where
    K: Eq + Hash + Clone + Debug,
{
    let n = items.len();

    let mut index: HashMap<&K, usize> = HashMap::with_capacity(n);
    for (i, key) in items.iter().enumerate() {
        if index.insert(key, i).is_some() {
            return Err(RankingError::DuplicateItem {
                key: format!("{:?}", key),
            });
        }
    }

    let mut scores = vec![0.0f64; n];

    for (&feature, ranking) in rankings {
        let weight = weights
            .get(feature)
            .ok_or(RankingError::UnknownFeatureWeight { feature })?;

        if ranking.len() != n {
            return Err(RankingError::IncompleteRanking { feature });
        }

        let mut seen = vec![false; n];
        for (position, key) in ranking.order().iter().enumerate() {
            let i = *index
                .get(key)
                .ok_or(RankingError::IncompleteRanking { feature })?;
            if std::mem::replace(&mut seen[i], true) {
                return Err(RankingError::IncompleteRanking { feature });
            }

            let wins = (n - 1 - position) as f64;
            let losses = position as f64;
            scores[i] += weight * (wins - losses);
        }
    }

    for score in &mut scores {
        *score = snap(*score);
    }

    let mut order: Vec<usize> = (0..n).collect();
    // sort_by is stable: equal scores keep input order
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

    debug!(
        items = n,
        features = rankings.len(),
        top_score = order.first().map(|&i| scores[i]),
        "Consensus computed"
    );

    Ok(Consensus {
        entries: order
            .into_iter()
            .map(|i| (items[i].clone(), scores[i]))
            .collect(),
    })
}

fn snap(score: f64) -> f64 {
    (score * SCORE_RESOLUTION).round() / SCORE_RESOLUTION
}
