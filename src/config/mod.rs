//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SIFT_*` environment variables; per-feature
//! weights use `SIFT_WEIGHT_<FEATURE>` (e.g. `SIFT_WEIGHT_ABSTRACT_MATCH=1.2`).

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_COARSE_K, DEFAULT_JUDGE_MODEL, DEFAULT_JUDGE_TIMEOUT_SECS, DEFAULT_MAX_CONTRIBUTORS,
    DEFAULT_NAMESPACE, DEFAULT_PREFERENCE, DEFAULT_TOP_K,
};
use crate::embedding::EncoderConfig;
use crate::features::Feature;
use crate::pipeline::RankSettings;
use crate::ranking::WeightTable;

/// Run configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SIFT_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listing section to rank. Default: `cs.AI`.
    pub namespace: String,

    /// Free-text statement of the reader's interests.
    pub preference: String,

    /// Final shortlist size. Default: `10`.
    pub top_k: usize,

    /// Consensus prefix handed to the judge. Default: `20`.
    pub coarse_k: usize,

    /// Whether to call the external judge. Default: `true`.
    pub use_judgment: bool,

    /// Model name routed by `genai`. Default: `gpt-4o-mini`.
    pub judge_model: String,

    /// Upper bound on the judgment round trip. Default: 60s.
    pub judge_timeout: Duration,

    /// Sentence encoder directory. `None` selects the deterministic stub embedder.
    pub embedder_path: Option<PathBuf>,

    /// Contributors kept per paper by the feed loader. Default: `2`.
    pub max_contributors: usize,

    pub weights: WeightTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            preference: DEFAULT_PREFERENCE.to_string(),
            top_k: DEFAULT_TOP_K,
            coarse_k: DEFAULT_COARSE_K,
            use_judgment: true,
            judge_model: DEFAULT_JUDGE_MODEL.to_string(),
            judge_timeout: Duration::from_secs(DEFAULT_JUDGE_TIMEOUT_SECS),
            embedder_path: None,
            max_contributors: DEFAULT_MAX_CONTRIBUTORS,
            weights: WeightTable::default(),
        }
    }
}

impl Config {
    const ENV_NAMESPACE: &'static str = "SIFT_NAMESPACE";
    const ENV_PREFERENCE: &'static str = "SIFT_PREFERENCE";
    const ENV_TOP_K: &'static str = "SIFT_TOP_K";
    const ENV_COARSE_K: &'static str = "SIFT_COARSE_K";
    const ENV_USE_JUDGMENT: &'static str = "SIFT_USE_JUDGMENT";
    const ENV_JUDGE_MODEL: &'static str = "SIFT_JUDGE_MODEL";
    const ENV_JUDGE_TIMEOUT_SECS: &'static str = "SIFT_JUDGE_TIMEOUT_SECS";
    const ENV_EMBEDDER_PATH: &'static str = EncoderConfig::ENV_MODEL_DIR;
    const ENV_MAX_CONTRIBUTORS: &'static str = "SIFT_MAX_CONTRIBUTORS";
    const ENV_WEIGHT_PREFIX: &'static str = "SIFT_WEIGHT_";

    /// Loads configuration from environment variables (falling back to defaults).
    ///
    /// Malformed values are errors; bounds are checked separately by [`Config::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let namespace = Self::parse_string_from_env(Self::ENV_NAMESPACE, defaults.namespace);
        let preference = Self::parse_string_from_env(Self::ENV_PREFERENCE, defaults.preference);
        let top_k = Self::parse_usize_from_env(Self::ENV_TOP_K, defaults.top_k)?;
        let coarse_k = Self::parse_usize_from_env(Self::ENV_COARSE_K, defaults.coarse_k)?;
        let use_judgment = Self::parse_bool_from_env(Self::ENV_USE_JUDGMENT, defaults.use_judgment)?;
        let judge_model = Self::parse_string_from_env(Self::ENV_JUDGE_MODEL, defaults.judge_model);
        let judge_timeout = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_JUDGE_TIMEOUT_SECS,
            defaults.judge_timeout.as_secs(),
        )?);
        let embedder_path = Self::parse_optional_path_from_env(Self::ENV_EMBEDDER_PATH);
        let max_contributors =
            Self::parse_usize_from_env(Self::ENV_MAX_CONTRIBUTORS, defaults.max_contributors)?;
        let weights = Self::parse_weights_from_env(defaults.weights)?;

        Ok(Self {
            namespace,
            preference,
            top_k,
            coarse_k,
            use_judgment,
            judge_model,
            judge_timeout,
            embedder_path,
            max_contributors,
            weights,
        })
    }

    /// Checks bounds and paths (does not load anything).
    ///
    /// Without an encoder directory every semantic feature must carry a zero weight: the
    /// stub encoder's vectors are not allowed to influence a ranking.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rank_settings().validate()?;
        if self.max_contributors == 0 {
            return Err(ConfigError::InvalidContributorCap);
        }
        if self.judge_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }

        match self.embedder_path {
            Some(ref path) => {
                if !path.exists() {
                    return Err(ConfigError::PathNotFound { path: path.clone() });
                }
                if !path.is_dir() {
                    return Err(ConfigError::NotADirectory { path: path.clone() });
                }
            }
            None => {
                if let Some(feature) = self.weighted_semantic_features().next() {
                    return Err(ConfigError::EncoderRequired {
                        feature,
                        weight_var: Self::weight_var(feature),
                    });
                }
            }
        }

        Ok(())
    }

    /// Semantic features with a positive weight.
    pub fn weighted_semantic_features(&self) -> impl Iterator<Item = Feature> + '_ {
        self.weights.features().filter(|feature| {
            feature.is_semantic() && self.weights.get(*feature).is_some_and(|w| w > 0.0)
        })
    }

    /// Encoder settings for [`SentenceEmbedder::load`](crate::embedding::SentenceEmbedder::load).
    pub fn encoder_config(&self) -> EncoderConfig {
        match &self.embedder_path {
            Some(dir) => EncoderConfig::new(dir.clone()),
            None => EncoderConfig::stub(),
        }
    }

    /// Pipeline settings for [`PaperRanker`](crate::pipeline::PaperRanker).
    pub fn rank_settings(&self) -> RankSettings {
        RankSettings {
            namespace: self.namespace.clone(),
            preference: self.preference.clone(),
            top_k: self.top_k,
            coarse_k: self.coarse_k,
        }
    }

    /// Env var name that overrides `feature`'s weight.
    pub fn weight_var(feature: Feature) -> String {
        format!(
            "{}{}",
            Self::ENV_WEIGHT_PREFIX,
            feature.name().to_ascii_uppercase()
        )
    }

    fn parse_weights_from_env(mut weights: WeightTable) -> Result<WeightTable, ConfigError> {
        for feature in Feature::ALL {
            let name = Self::weight_var(feature);
            let Some(value) = Self::read_trimmed(&name) else {
                continue;
            };
            let weight: f64 = value.parse().map_err(|e| ConfigError::InvalidFloat {
                name: name.clone(),
                value: value.clone(),
                source: e,
            })?;
            weights
                .set(feature, weight)
                .map_err(|e| ConfigError::InvalidWeight { name, source: e })?;
        }
        Ok(weights)
    }

    fn read_trimmed(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        Self::read_trimmed(var_name).map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        Self::read_trimmed(var_name).unwrap_or(default)
    }

    fn parse_usize_from_env(var_name: &str, default: usize) -> Result<usize, ConfigError> {
        match Self::read_trimmed(var_name) {
            Some(value) => value.parse().map_err(|e| ConfigError::InvalidNumber {
                name: var_name.to_string(),
                value,
                source: e,
            }),
            None => Ok(default),
        }
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> Result<u64, ConfigError> {
        match Self::read_trimmed(var_name) {
            Some(value) => value.parse().map_err(|e| ConfigError::InvalidNumber {
                name: var_name.to_string(),
                value,
                source: e,
            }),
            None => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> Result<bool, ConfigError> {
        match Self::read_trimmed(var_name) {
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidBool {
                    name: var_name.to_string(),
                    value,
                }),
            },
            None => Ok(default),
        }
    }
}
