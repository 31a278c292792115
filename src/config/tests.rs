use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_sift_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("SIFT_NAMESPACE");
        env::remove_var("SIFT_PREFERENCE");
        env::remove_var("SIFT_TOP_K");
        env::remove_var("SIFT_COARSE_K");
        env::remove_var("SIFT_USE_JUDGMENT");
        env::remove_var("SIFT_JUDGE_MODEL");
        env::remove_var("SIFT_JUDGE_TIMEOUT_SECS");
        env::remove_var("SIFT_EMBEDDER_PATH");
        env::remove_var("SIFT_MAX_CONTRIBUTORS");
        for feature in Feature::ALL {
            env::remove_var(Config::weight_var(feature));
        }
    }
}

/// Defaults with the semantic features switched off, valid without an encoder directory.
fn metric_only_config() -> Config {
    let mut config = Config::default();
    config.weights.set(Feature::FirstAuthorInterestMatch, 0.0).unwrap();
    config.weights.set(Feature::AbstractMatch, 0.0).unwrap();
    config
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.namespace, "cs.AI");
    assert_eq!(config.top_k, 10);
    assert_eq!(config.coarse_k, 20);
    assert!(config.use_judgment);
    assert_eq!(config.judge_model, "gpt-4o-mini");
    assert_eq!(config.judge_timeout, Duration::from_secs(60));
    assert!(config.embedder_path.is_none());
    assert_eq!(config.max_contributors, 2);
    assert_eq!(config.weights, WeightTable::default());
}

#[test]
fn test_weight_var_names() {
    assert_eq!(
        Config::weight_var(Feature::AbstractMatch),
        "SIFT_WEIGHT_ABSTRACT_MATCH"
    );
    assert_eq!(
        Config::weight_var(Feature::FirstAuthorHIndex),
        "SIFT_WEIGHT_FIRST_AUTHOR_H_INDEX"
    );
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_sift_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.top_k, 10);
    assert_eq!(config.coarse_k, 20);
    assert!(config.embedder_path.is_none());
    assert!(config.encoder_config().testing_stub);
}

#[test]
#[serial]
fn test_full_config_parse() {
    clear_sift_env();

    with_env_vars(
        &[
            ("SIFT_NAMESPACE", "cs.CL"),
            ("SIFT_PREFERENCE", "  retrieval augmented generation  "),
            ("SIFT_TOP_K", "5"),
            ("SIFT_COARSE_K", "15"),
            ("SIFT_USE_JUDGMENT", "false"),
            ("SIFT_JUDGE_MODEL", "claude-3-5-haiku-latest"),
            ("SIFT_JUDGE_TIMEOUT_SECS", "30"),
            ("SIFT_EMBEDDER_PATH", "/models/all-MiniLM-L6-v2"),
            ("SIFT_MAX_CONTRIBUTORS", "4"),
            ("SIFT_WEIGHT_ABSTRACT_MATCH", "2.5"),
        ],
        || {
            let config = Config::from_env().expect("should parse full config");

            assert_eq!(config.namespace, "cs.CL");
            assert_eq!(config.preference, "retrieval augmented generation");
            assert_eq!(config.top_k, 5);
            assert_eq!(config.coarse_k, 15);
            assert!(!config.use_judgment);
            assert_eq!(config.judge_model, "claude-3-5-haiku-latest");
            assert_eq!(config.judge_timeout, Duration::from_secs(30));
            assert_eq!(
                config.embedder_path,
                Some(PathBuf::from("/models/all-MiniLM-L6-v2"))
            );
            assert_eq!(config.max_contributors, 4);
            assert_eq!(config.weights.get(Feature::AbstractMatch), Some(2.5));
            assert_eq!(config.weights.get(Feature::FirstAuthorHIndex), Some(1.0));

            let settings = config.rank_settings();
            assert_eq!(settings.namespace, "cs.CL");
            assert_eq!(settings.top_k, 5);
            assert_eq!(settings.coarse_k, 15);

            let encoder = config.encoder_config();
            assert!(!encoder.testing_stub);
            assert_eq!(encoder.model_dir, PathBuf::from("/models/all-MiniLM-L6-v2"));
        },
    );
}

#[test]
#[serial]
fn test_blank_values_use_defaults() {
    clear_sift_env();

    with_env_vars(&[("SIFT_TOP_K", "   "), ("SIFT_EMBEDDER_PATH", "")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.top_k, 10);
        assert!(config.embedder_path.is_none());
    });
}

#[test]
#[serial]
fn test_invalid_top_k_not_number() {
    clear_sift_env();

    with_env_vars(&[("SIFT_TOP_K", "ten")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { ref name, .. } if name == "SIFT_TOP_K"));
    });
}

#[test]
#[serial]
fn test_negative_coarse_k_rejected_at_parse() {
    clear_sift_env();

    with_env_vars(&[("SIFT_COARSE_K", "-3")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    });
}

#[test]
#[serial]
fn test_bool_parsing() {
    clear_sift_env();

    for (raw, expected) in [("1", true), ("YES", true), ("off", false), ("False", false)] {
        with_env_vars(&[("SIFT_USE_JUDGMENT", raw)], || {
            let config = Config::from_env().expect("should parse bool");
            assert_eq!(config.use_judgment, expected, "raw value {raw}");
        });
    }

    with_env_vars(&[("SIFT_USE_JUDGMENT", "maybe")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBool { .. }));
    });
}

#[test]
#[serial]
fn test_weight_override_errors() {
    clear_sift_env();

    with_env_vars(&[("SIFT_WEIGHT_MEAN_AUTHOR_H_INDEX", "heavy")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFloat { .. }));
    });

    with_env_vars(&[("SIFT_WEIGHT_MEAN_AUTHOR_H_INDEX", "-1")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWeight { .. }));
    });

    with_env_vars(&[("SIFT_WEIGHT_MEAN_AUTHOR_H_INDEX", "0")], || {
        let config = Config::from_env().expect("zero weight is allowed");
        assert_eq!(config.weights.get(Feature::MeanAuthorHIndex), Some(0.0));
    });
}

#[test]
fn test_validate_success_metric_only() {
    assert!(metric_only_config().validate().is_ok());
}

#[test]
fn test_validate_defaults_require_encoder() {
    let err = Config::default().validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::EncoderRequired {
            feature: Feature::FirstAuthorInterestMatch,
            ..
        }
    ));
    let message = err.to_string();
    assert!(message.contains("SIFT_EMBEDDER_PATH"));
    assert!(message.contains("SIFT_WEIGHT_FIRST_AUTHOR_INTEREST_MATCH=0"));
}

#[test]
fn test_validate_single_semantic_weight_requires_encoder() {
    let mut config = metric_only_config();
    config.weights.set(Feature::AbstractMatch, 1.4).unwrap();

    assert!(matches!(
        config.validate(),
        Err(ConfigError::EncoderRequired {
            feature: Feature::AbstractMatch,
            ..
        })
    ));
    assert_eq!(
        config.weighted_semantic_features().collect::<Vec<_>>(),
        vec![Feature::AbstractMatch]
    );

    config.weights.remove(Feature::AbstractMatch);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_from_env_zeroed_semantic_weights_validate_without_encoder() {
    clear_sift_env();

    with_env_vars(
        &[
            ("SIFT_WEIGHT_FIRST_AUTHOR_INTEREST_MATCH", "0"),
            ("SIFT_WEIGHT_ABSTRACT_MATCH", "0.0"),
        ],
        || {
            let config = Config::from_env().unwrap();
            assert!(config.embedder_path.is_none());
            assert!(config.validate().is_ok());
        },
    );
}

#[test]
fn test_validate_zero_top_k() {
    let config = Config {
        top_k: 0,
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidTopK)));
}

#[test]
fn test_validate_coarse_below_top() {
    let config = Config {
        top_k: 8,
        coarse_k: 5,
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::CoarseBelowTop {
            coarse_k: 5,
            top_k: 8
        }
    ));

    let config = Config {
        top_k: 5,
        coarse_k: 5,
        ..metric_only_config()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_shares_rank_settings_bounds() {
    let config = Config {
        top_k: 4,
        coarse_k: 3,
        ..metric_only_config()
    };
    let from_settings = config.rank_settings().validate().unwrap_err();
    let from_config = config.validate().unwrap_err();
    assert_eq!(from_settings.to_string(), from_config.to_string());
}

#[test]
fn test_validate_zero_contributors_and_timeout() {
    let config = Config {
        max_contributors: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidContributorCap)
    ));

    let config = Config {
        judge_timeout: Duration::ZERO,
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeout)));
}

#[test]
fn test_validate_nonexistent_embedder_path() {
    let config = Config {
        embedder_path: Some(PathBuf::from("/nonexistent/encoder")),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_embedder_path_is_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let config = Config {
        embedder_path: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));
}

#[test]
fn test_validate_embedder_path_is_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        embedder_path: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = ConfigError::CoarseBelowTop {
        coarse_k: 3,
        top_k: 7,
    };
    assert!(err.to_string().contains("coarse_k (3)"));
    assert!(err.to_string().contains("top_k (7)"));

    let err = ConfigError::PathNotFound {
        path: PathBuf::from("/some/path"),
    };
    assert!(err.to_string().contains("/some/path"));

    let err = ConfigError::InvalidBool {
        name: "SIFT_USE_JUDGMENT".to_string(),
        value: "maybe".to_string(),
    };
    assert!(err.to_string().contains("SIFT_USE_JUDGMENT='maybe'"));
}
