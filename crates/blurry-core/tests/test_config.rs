use std::str::FromStr;

use blurry_core::consts::DEFAULT_SAMPLE_COVERAGE;
use blurry_core::error::BlurryError;
use blurry_core::pipeline::{BatchConfig, SampleCoverage};

// ---------------------------------------------------------------------------
// SampleCoverage
// ---------------------------------------------------------------------------

#[test]
fn test_coverage_default() {
    assert_eq!(SampleCoverage::default().value(), DEFAULT_SAMPLE_COVERAGE);
    assert_eq!(SampleCoverage::default().value(), 0.01);
}

#[test]
fn test_coverage_accepts_open_closed_range() {
    assert!(SampleCoverage::new(1.0).is_ok());
    assert!(SampleCoverage::new(0.5).is_ok());
    assert!(SampleCoverage::new(f32::MIN_POSITIVE).is_ok());
    assert_eq!(SampleCoverage::full().value(), 1.0);
}

#[test]
fn test_coverage_rejects_out_of_range() {
    for value in [0.0, -0.1, 1.0001, 2.0, f32::NAN, f32::INFINITY] {
        let err = SampleCoverage::new(value).unwrap_err();
        assert!(matches!(err, BlurryError::InvalidSampleCoverage(_)), "{value}");
    }
}

#[test]
fn test_coverage_from_str() {
    assert_eq!(SampleCoverage::from_str("0.25").unwrap().value(), 0.25);
    assert_eq!(SampleCoverage::from_str(" 1 ").unwrap().value(), 1.0);
}

#[test]
fn test_coverage_from_str_not_a_number() {
    let err = SampleCoverage::from_str("abc").unwrap_err();
    assert_eq!(err, "\"abc\" is not a parsable float number");
}

#[test]
fn test_coverage_from_str_out_of_range() {
    let err = SampleCoverage::from_str("1.5").unwrap_err();
    assert!(err.contains("1.5"), "{err}");
}

#[test]
fn test_coverage_display() {
    assert_eq!(SampleCoverage::new(0.05).unwrap().to_string(), "0.05");
}

// ---------------------------------------------------------------------------
// BatchConfig
// ---------------------------------------------------------------------------

#[test]
fn test_batch_config_default() {
    let config = BatchConfig::default();
    assert_eq!(config.sample_coverage, SampleCoverage::default());
    assert_eq!(config.threads, None);
    assert!(!config.recursive);
}

#[test]
fn test_batch_config_toml_roundtrip() {
    let config = BatchConfig {
        sample_coverage: SampleCoverage::new(0.2).unwrap(),
        threads: Some(3),
        recursive: true,
    };
    let text = toml::to_string_pretty(&config).unwrap();
    let parsed: BatchConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_batch_config_default_omits_threads() {
    let text = toml::to_string_pretty(&BatchConfig::default()).unwrap();
    assert!(text.contains("sample_coverage"));
    assert!(!text.contains("threads"));
}

#[test]
fn test_batch_config_missing_fields_use_defaults() {
    let parsed: BatchConfig = toml::from_str("recursive = true\n").unwrap();
    assert_eq!(parsed.sample_coverage, SampleCoverage::default());
    assert!(parsed.recursive);

    let empty: BatchConfig = toml::from_str("").unwrap();
    assert_eq!(empty, BatchConfig::default());
}

#[test]
fn test_batch_config_rejects_invalid_coverage() {
    assert!(toml::from_str::<BatchConfig>("sample_coverage = 0.0\n").is_err());
    assert!(toml::from_str::<BatchConfig>("sample_coverage = 3.5\n").is_err());
}

#[test]
fn test_effective_threads_is_capped() {
    let available = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    let config = BatchConfig {
        threads: Some(available + 100),
        ..Default::default()
    };
    assert_eq!(config.effective_threads(), available);

    let config = BatchConfig {
        threads: Some(0),
        ..Default::default()
    };
    assert_eq!(config.effective_threads(), 1);

    assert_eq!(BatchConfig::default().effective_threads(), available);
}
