//! # Codec Tests: MeasurementCodec, SummaryReport
//!
//! Header handling, column binding, and the all-or-nothing failure modes of
//! the measurement source; rendering of the run summary.

use dualpred_codec::{MeasurementCodec, SummaryReport};
use dualpred_core::{
    simulate_series, DualPredError, InputFormatError, PredictorKind, RunSummary, SimulationBuilder,
};
use std::io::{Cursor, Write};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn decode(raw: &str, channels: &[&str]) -> Result<dualpred_core::Measurements, DualPredError> {
    MeasurementCodec::decode(Cursor::new(raw), &names(channels))
}

fn input_error(result: Result<dualpred_core::Measurements, DualPredError>) -> InputFormatError {
    match result {
        Err(DualPredError::InputFormat(e)) => e,
        other => panic!("expected an input format error, got {:?}", other),
    }
}

#[test]
fn test_header_is_skipped() {
    let m = decode("temperature,pressure\n10,1000\n12,1001\n", &["temperature"]).unwrap();
    assert_eq!(m.len(), 2);
    assert_eq!(m.channel("temperature").unwrap(), &[10.0, 12.0]);
}

#[test]
fn test_binds_by_header_name() {
    let m = decode("pressure,temperature\n1000,10\n1001,12\n", &["temperature", "pressure"]).unwrap();
    assert_eq!(m.channel("temperature").unwrap(), &[10.0, 12.0]);
    assert_eq!(m.channel("pressure").unwrap(), &[1000.0, 1001.0]);
    // order follows the requested channels, not the file
    assert_eq!(m.series()[0].name(), "temperature");
}

#[test]
fn test_binds_positionally_when_header_names_differ() {
    let m = decode("t_celsius,p_hpa\n10, 1000\n 12,1001\n", &["temperature", "pressure"]).unwrap();
    assert_eq!(m.channel("temperature").unwrap(), &[10.0, 12.0]);
    assert_eq!(m.channel("pressure").unwrap(), &[1000.0, 1001.0]);
}

/// One requested name matches the header, the other does not: no fallback to position.
#[test]
fn test_partial_header_match_names_the_missing_channel() {
    let err = input_error(decode(
        "temperature,pressure\n10,1000\n12,1001\n",
        &["pressure", "humidity"],
    ));
    assert_eq!(err, InputFormatError::MissingChannel("humidity".into()));
}

#[test]
fn test_invalid_utf8_record_is_an_input_error() {
    let mut raw = b"temperature\n10\n".to_vec();
    raw.extend_from_slice(&[0xff, 0xfe, b'\n']);
    let result = MeasurementCodec::decode(Cursor::new(raw), &names(&["temperature"]));
    assert_eq!(input_error(result), InputFormatError::InvalidEncoding { line: 3 });
}

#[test]
fn test_blank_lines_are_ignored() {
    let m = decode("temperature\n1.5\n\n2.5\n\n", &["temperature"]).unwrap();
    assert_eq!(m.channel("temperature").unwrap(), &[1.5, 2.5]);
}

#[test]
fn test_empty_inputs_fail() {
    assert_eq!(input_error(decode("", &["temperature"])), InputFormatError::MissingHeader);
    assert_eq!(input_error(decode("temperature\n", &["temperature"])), InputFormatError::EmptyInput);
}

#[test]
fn test_wrong_field_count_fails() {
    let err = input_error(decode("temperature,pressure\n10,1000\n12\n", &["temperature"]));
    assert_eq!(err, InputFormatError::FieldCount { line: 3, expected: 2, found: 1 });

    let err = input_error(decode("temperature\n10\n", &["temperature", "pressure"]));
    assert_eq!(err, InputFormatError::FieldCount { line: 1, expected: 2, found: 1 });
}

#[test]
fn test_non_numeric_fails() {
    let err = input_error(decode("temperature\n10\nwarm\n", &["temperature"]));
    assert_eq!(
        err,
        InputFormatError::NonNumeric { line: 3, column: "temperature".into(), value: "warm".into() }
    );

    let err = input_error(decode("temperature\nNaN\n", &["temperature"]));
    assert!(matches!(err, InputFormatError::NonNumeric { line: 2, .. }));
}

#[test]
fn test_load_from_file_and_simulate() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "temperature,pressure").unwrap();
    for (t, p) in [(10.0, 1000.0), (12.0, 1000.0), (35.0, 1001.0), (13.0, 1001.0)] {
        writeln!(file, "{},{}", t, p).unwrap();
    }

    let channels = names(&["temperature", "pressure"]);
    let measurements = MeasurementCodec::load(file.path(), &channels).unwrap();
    let engine = SimulationBuilder::new()
        .channel("temperature", 10.0)
        .channel("pressure", 10.0)
        .predictor(PredictorKind::Linear)
        .build()
        .unwrap();
    let summary = RunSummary::score(&engine.run(&measurements).unwrap());
    assert_eq!(summary.transmissions, 3);

    let missing = MeasurementCodec::load("/no/such/measurements.csv", &channels).unwrap_err();
    assert!(matches!(missing, DualPredError::Io(_)));
}

#[test]
fn test_report_renders_every_field() {
    let outcome = simulate_series(PredictorKind::Linear, &[10.0, 12.0, 35.0, 13.0], 10.0).unwrap();
    let summary = RunSummary::score(&outcome);
    let report = SummaryReport::new(&summary);

    let text = report.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["series rmse = 1", "transmissions = 3 / 4", "fraction sent = 0.75"]);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["efficiency"], 0.75);
}
