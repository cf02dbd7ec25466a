//! Integration tests for lobe analysis on hand-built curves

use lobe0::core::analyze;
use lobe0::types::{CurvePoint, DepthRange, SpeedBand, StabilityCurve};
use pretty_assertions::assert_eq;

fn curve_at(speeds: &[f64], depths: &[Option<f64>]) -> StabilityCurve {
    StabilityCurve::new(
        speeds
            .iter()
            .zip(depths)
            .map(|(s, d)| CurvePoint::new(*s, *d))
            .collect(),
    )
}

#[test]
fn test_small_curve_full_analysis() {
    let c = curve_at(
        &[1000.0, 1100.0, 1200.0, 1300.0, 1400.0],
        &[Some(1.0), Some(3.0), Some(2.0), Some(4.0), Some(1.0)],
    );
    let r = analyze(&c);

    assert_eq!(r.valid_count, 5);
    assert_eq!(r.depth_range, Some(DepthRange { min: 1.0, max: 4.0 }));

    let best = r.best.unwrap();
    assert_eq!((best.index, best.speed), (3, 1300.0));
    // Two points share the minimum depth; the first one wins
    let worst = r.worst.unwrap();
    assert_eq!((worst.index, worst.speed), (0, 1000.0));

    assert_eq!(r.minima.iter().map(|p| p.index).collect::<Vec<_>>(), vec![2]);
    assert_eq!(r.maxima.iter().map(|p| p.index).collect::<Vec<_>>(), vec![1, 3]);

    // mean 2.2: only 1100 and 1300 are above it, 200 RPM apart
    assert!((r.mean_depth.unwrap() - 2.2).abs() < 1e-12);
    assert_eq!(
        r.stable_bands,
        vec![
            SpeedBand { start: 1100.0, end: 1100.0 },
            SpeedBand { start: 1300.0, end: 1300.0 },
        ]
    );
    assert!((r.recommended_depth.unwrap() - 3.2).abs() < 1e-12);
}

#[test]
fn test_best_dominates_with_ties() {
    let depths = [Some(2.0), Some(5.0), None, Some(5.0), Some(1.0), Some(5.0), Some(3.0)];
    let speeds: Vec<f64> = (0..depths.len()).map(|i| 1000.0 + 100.0 * i as f64).collect();
    let c = curve_at(&speeds, &depths);
    let r = analyze(&c);

    let best = r.best.unwrap();
    for d in c.depths().into_iter().flatten() {
        assert!(best.depth >= d);
    }
    // First of the three tied maxima
    assert_eq!((best.index, best.depth), (1, 5.0));
    assert_eq!(r.depth_range.unwrap().max, 5.0);
}

#[test]
fn test_undefined_points_are_skipped() {
    let c = curve_at(
        &[1000.0, 1010.0, 1020.0, 1030.0, 1040.0],
        &[Some(2.0), None, Some(1.0), None, Some(3.0)],
    );
    let r = analyze(&c);

    assert_eq!(r.valid_count, 3);
    // Neighbours of index 2 are the defined points 0 and 4
    assert_eq!(r.minima.len(), 1);
    assert_eq!(r.minima[0].index, 2);
    assert!(r.maxima.is_empty());
}

#[test]
fn test_close_stable_speeds_form_one_band() {
    let speeds: Vec<f64> = (0..6).map(|i| 1000.0 + 20.0 * i as f64).collect();
    let c = curve_at(
        &speeds,
        &[Some(1.0), Some(1.0), Some(5.0), Some(5.0), Some(5.0), Some(1.0)],
    );
    let r = analyze(&c);

    assert_eq!(r.stable_bands, vec![SpeedBand { start: 1040.0, end: 1080.0 }]);
    assert_eq!(r.stable_bands[0].width(), 40.0);
}

#[test]
fn test_all_undefined_curve_is_empty() {
    let c = curve_at(&[1000.0, 2000.0], &[None, None]);
    let r = analyze(&c);

    assert!(r.is_empty());
    assert_eq!(r.best, None);
    assert_eq!(r.recommended_depth, None);
    assert!(r.stable_bands.is_empty());
    assert!(r.to_parseable_string().contains("valid=0"));
}

#[test]
fn test_curve_json_with_nulls() {
    let json = r#"{"points":[
        {"speed":1000.0,"depth":1.5},
        {"speed":1100.0,"depth":null},
        {"speed":1200.0,"depth":2.5}
    ]}"#;
    let c: StabilityCurve = serde_json::from_str(json).unwrap();
    let r = analyze(&c);

    assert_eq!(c.defined_count(), 2);
    assert_eq!(r.best.unwrap().speed, 1200.0);
}
