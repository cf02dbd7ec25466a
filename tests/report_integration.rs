//! Integration tests for report save/load

use lobe0::core::{build_report, load_report, save_report};
use lobe0::types::{AnalysisRequest, ReportError, SpeedRange, SpeedSpec};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn test_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("lobe0_{}_{}", name, std::process::id()))
}

fn small_request() -> AnalysisRequest {
    AnalysisRequest {
        speeds: SpeedSpec::Range(SpeedRange::new(2000.0, 18000.0, 80)),
        ..AnalysisRequest::default()
    }
}

#[test]
fn test_save_then_load() {
    let dir = test_dir("save_load");
    let report = build_report(&small_request()).unwrap();

    let path = save_report(&report, &dir).unwrap();
    assert!(path.ends_with(&format!("{}.json", report.id)));

    let loaded = load_report(&path).unwrap();
    assert_eq!(loaded.id, report.id);
    assert_eq!(loaded.input_digest, report.input_digest);
    assert_eq!(loaded.method, report.method);
    assert_eq!(loaded.curve.len(), 80);
    assert_eq!(loaded.analysis.valid_count, report.analysis.valid_count);
    for (a, b) in loaded.curve.points().iter().zip(report.curve.points()) {
        match (a.depth, b.depth) {
            (Some(x), Some(y)) => assert!((x - y).abs() < 1e-9),
            (x, y) => assert_eq!(x, y),
        }
    }

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_same_request_same_digest() {
    let a = build_report(&small_request()).unwrap();
    let b = build_report(&small_request()).unwrap();
    assert_eq!(a.input_digest, b.input_digest);
}

#[test]
fn test_report_json_field_names() {
    let report = build_report(&small_request()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["method"], "empirical");
    assert_eq!(json["metadata"]["N"], 4);
    assert!(json["metadata"]["Kt"].is_number());
    assert!(json["curve"]["points"].is_array());
}

#[test]
fn test_load_missing_file() {
    let err = load_report(test_dir("missing").join("nope.json")).unwrap_err();
    assert!(matches!(err, ReportError::Storage(_)));
}

#[test]
fn test_load_corrupt_file() {
    let dir = test_dir("corrupt");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = load_report(&path).unwrap_err();
    assert!(matches!(err, ReportError::Serialize(_)));

    std::fs::remove_dir_all(&dir).ok();
}
