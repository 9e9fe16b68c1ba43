//! # Configuration Tests: SimulationConfig, SimulationBuilder
//!
//! Every configuration problem must surface before a single sample is read.

use dualpred_core::{ConfigurationError, DualPredError, PredictorKind, SimulationBuilder, SimulationConfig};
use std::io::Write;
use std::time::Instant;

/// Verifies that `SimulationConfig::default()` returns the one-dimensional preset.
#[test]
fn test_simulation_config_defaults() {
    let t = Instant::now();

    let config = SimulationConfig::default();
    assert_eq!(config.input.to_str(), Some("measurements.csv"));
    assert_eq!(config.predictor_kind().unwrap(), PredictorKind::Linear);
    assert_eq!(config.channel_names(), vec!["temperature".to_string()]);
    assert_eq!(config.channels[0].threshold, 10.0);
    assert!(config.validate().is_ok());

    let two = SimulationConfig::two_dimensional();
    assert_eq!(two.predictor_kind().unwrap(), PredictorKind::MovingAverage);
    assert_eq!(two.channel_names(), vec!["temperature".to_string(), "pressure".to_string()]);
    assert_eq!(two.channels[0].threshold, two.channels[1].threshold);

    let overhead = t.elapsed();
    println!("test_simulation_config_defaults: Testing Overhead = {:?}", overhead);
}

#[test]
fn test_toml_round_trip() {
    let config = SimulationConfig::from_toml_str(
        r#"
        input = "data/run7.csv"
        predictor = "weighted-moving-average"

        [[channels]]
        name = "temperature"
        threshold = 2.5

        [[channels]]
        name = "pressure"
        threshold = 40.0
        "#,
    )
    .unwrap();

    assert_eq!(config.predictor_kind().unwrap(), PredictorKind::WeightedMovingAverage);
    assert_eq!(config.channels.len(), 2);
    assert_eq!(config.channels[1].threshold, 40.0);

    let registry = config.registry().unwrap();
    assert_eq!(registry.names(), vec!["temperature".to_string(), "pressure".to_string()]);
}

#[test]
fn test_omitted_fields_take_defaults() {
    let config = SimulationConfig::from_toml_str(r#"predictor = "moving-average""#).unwrap();
    assert_eq!(config.channel_names(), vec!["temperature".to_string()]);
    assert_eq!(config.input.to_str(), Some("measurements.csv"));
}

#[test]
fn test_unsupported_predictor_is_rejected() {
    let err = SimulationConfig::from_toml_str(r#"predictor = "kalman""#).unwrap_err();
    assert_eq!(err, ConfigurationError::UnsupportedPredictor("kalman".into()));
}

#[test]
fn test_non_positive_thresholds_are_rejected() {
    for bad in ["0.0", "-1.5"] {
        let raw = format!("[[channels]]\nname = \"temperature\"\nthreshold = {}\n", bad);
        let err = SimulationConfig::from_toml_str(&raw).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidThreshold { .. }), "{:?}", err);
    }

    let mut config = SimulationConfig::default();
    config.set_threshold(f64::INFINITY);
    assert!(matches!(config.validate(), Err(ConfigurationError::InvalidThreshold { .. })));
}

#[test]
fn test_empty_and_duplicate_channel_sets_are_rejected() {
    let err = SimulationConfig::from_toml_str("channels = []").unwrap_err();
    assert_eq!(err, ConfigurationError::EmptyChannelSet);

    let err = SimulationBuilder::new()
        .channel("temperature", 1.0)
        .channel("temperature", 2.0)
        .build()
        .unwrap_err();
    assert_eq!(err, ConfigurationError::DuplicateChannel("temperature".into()));

    assert_eq!(SimulationBuilder::new().build().unwrap_err(), ConfigurationError::EmptyChannelSet);
}

#[test]
fn test_malformed_toml_is_a_configuration_error() {
    let err = SimulationConfig::from_toml_str("predictor = [").unwrap_err();
    assert!(matches!(err, ConfigurationError::Parse(_)));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "predictor = \"linear\"\n[[channels]]\nname = \"pressure\"\nthreshold = 3.0").unwrap();

    let config = SimulationConfig::load(file.path()).unwrap();
    assert_eq!(config.channel_names(), vec!["pressure".to_string()]);

    let missing = SimulationConfig::load("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(missing, DualPredError::Io(_)));
}

#[test]
fn test_builder_with_config_overrides() {
    let engine = SimulationBuilder::new()
        .channel("humidity", 1.0)
        .with_config(SimulationConfig::two_dimensional())
        .build()
        .unwrap();
    assert_eq!(*engine.predictor(), PredictorKind::MovingAverage);
    assert_eq!(engine.channels().len(), 2);
    assert!(!engine.channels().contains("humidity"));
}
