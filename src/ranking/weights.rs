//! Per-feature importance weights for the Copeland aggregation.
//!
//! The defaults are hand-tuned priors with no derivation behind them; treat them as tunable
//! configuration. Abstract relevance weighs most, averaged citations least.

use std::collections::BTreeMap;

use crate::features::Feature;

use super::error::RankingError;

#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    weights: BTreeMap<Feature, f64>,
}

impl Default for WeightTable {
    fn default() -> Self {
        let weights = BTreeMap::from([
            (Feature::FirstAuthorCitations, 0.8),
            (Feature::FirstAuthorHIndex, 1.0),
            (Feature::MeanAuthorCitations, 0.6),
            (Feature::MeanAuthorHIndex, 0.8),
            (Feature::FirstAuthorInterestMatch, 1.0),
            (Feature::AbstractMatch, 1.4),
        ]);
        Self { weights }
    }
}

impl WeightTable {
    /// An empty table (no feature will be ranked).
    pub fn empty() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    /// The same weight for every listed feature.
    pub fn uniform(
        features: impl IntoIterator<Item = Feature>,
        weight: f64,
    ) -> Result<Self, RankingError> {
        features
            .into_iter()
            .try_fold(Self::empty(), |table, feature| table.with(feature, weight))
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, feature: Feature, weight: f64) -> Result<Self, RankingError> {
        self.set(feature, weight)?;
        Ok(self)
    }

    /// Sets or replaces a weight. Rejects negative and non-finite values.
    pub fn set(&mut self, feature: Feature, weight: f64) -> Result<(), RankingError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(RankingError::InvalidWeight { feature, weight });
        }
        self.weights.insert(feature, weight);
        Ok(())
    }

    /// Removes a feature from the table.
    pub fn remove(&mut self, feature: Feature) -> Option<f64> {
        self.weights.remove(&feature)
    }

    pub fn get(&self, feature: Feature) -> Option<f64> {
        self.weights.get(&feature).copied()
    }

    /// Features with an entry, in [`Feature`] order.
    pub fn features(&self) -> impl Iterator<Item = Feature> + '_ {
        self.weights.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
