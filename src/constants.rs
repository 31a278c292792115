//! Cross-cutting, shared constants.
//!
//! Defaults here back [`crate::config::Config`]; prefer reading the config at runtime over
//! referencing these directly.

/// Output dimension of the all-MiniLM-L6-v2 sentence encoder.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the sentence encoder (longer abstracts are truncated).
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Default final shortlist size.
pub const DEFAULT_TOP_K: usize = 10;

/// Default size of the consensus prefix handed to the judgment step.
pub const DEFAULT_COARSE_K: usize = 20;

/// Default cap on contributors considered per paper.
///
/// Keeps heavily multi-author papers from dominating the averaged metrics.
pub const DEFAULT_MAX_CONTRIBUTORS: usize = 2;

/// Default listing section.
pub const DEFAULT_NAMESPACE: &str = "cs.AI";

/// Default judgment model (any model name `genai` can route).
pub const DEFAULT_JUDGE_MODEL: &str = "gpt-4o-mini";

/// Default upper bound on the judgment round trip, in seconds.
pub const DEFAULT_JUDGE_TIMEOUT_SECS: u64 = 60;

/// Default capacity of the per-run embedding memo.
pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: u64 = 4_096;

/// Default preference statement.
pub const DEFAULT_PREFERENCE: &str = "I like papers with innovations in model architectures, \
multimodal methods, symbolic reasoning and automation. Other general ML topics are welcome, \
while direct sub-field applications are less interesting.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coarse_prefix_covers_final_shortlist() {
        assert!(DEFAULT_COARSE_K >= DEFAULT_TOP_K);
        assert!(DEFAULT_TOP_K >= 1);
    }

    #[test]
    fn test_default_preference_is_not_blank() {
        assert!(!DEFAULT_PREFERENCE.trim().is_empty());
    }
}
