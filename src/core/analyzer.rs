//! Lobe diagram analysis
//!
//! Works on the defined points of a curve only; undefined speeds are skipped
//! for extrema, statistics and bands alike.

use tracing::warn;

use crate::types::{DepthRange, LobeAnalysisResult, OperatingPoint, SpeedBand, StabilityCurve};
use crate::{BAND_GAP_THRESHOLD, MAX_EXTREMA, MAX_STABLE_BANDS};

/// Analyze a stability curve
pub fn analyze(curve: &StabilityCurve) -> LobeAnalysisResult {
    let valid: Vec<OperatingPoint> = curve
        .defined()
        .map(|(index, speed, depth)| OperatingPoint { index, speed, depth })
        .collect();

    if valid.is_empty() {
        warn!(points = curve.len(), "no defined depths to analyze");
        return LobeAnalysisResult::empty();
    }

    let (minima, maxima) = find_extrema(&valid);
    let best = argmax(&valid);
    let worst = argmin(&valid);
    let mean = valid.iter().map(|p| p.depth).sum::<f64>() / valid.len() as f64;

    LobeAnalysisResult {
        valid_count: valid.len(),
        depth_range: Some(DepthRange {
            min: worst.depth,
            max: best.depth,
        }),
        best: Some(best),
        worst: Some(worst),
        minima,
        maxima,
        mean_depth: Some(mean),
        stable_bands: stable_bands(&valid, mean),
        recommended_depth: LobeAnalysisResult::recommended_for(Some(&best)),
    }
}

/// Strict interior extrema; plateaus are never flagged
fn find_extrema(valid: &[OperatingPoint]) -> (Vec<OperatingPoint>, Vec<OperatingPoint>) {
    let mut minima = Vec::new();
    let mut maxima = Vec::new();

    for w in valid.windows(3) {
        let (prev, mid, next) = (w[0].depth, w[1].depth, w[2].depth);
        if mid < prev && mid < next {
            if minima.len() < MAX_EXTREMA {
                minima.push(w[1]);
            }
        } else if mid > prev && mid > next && maxima.len() < MAX_EXTREMA {
            maxima.push(w[1]);
        }
    }

    (minima, maxima)
}

/// First point with the largest depth. `valid` is non-empty.
fn argmax(valid: &[OperatingPoint]) -> OperatingPoint {
    valid
        .iter()
        .skip(1)
        .fold(valid[0], |best, p| if p.depth > best.depth { *p } else { best })
}

/// First point with the smallest depth. `valid` is non-empty.
fn argmin(valid: &[OperatingPoint]) -> OperatingPoint {
    valid
        .iter()
        .skip(1)
        .fold(valid[0], |worst, p| if p.depth < worst.depth { *p } else { worst })
}

/// Runs of above-mean speeds, split where consecutive stable speeds are more
/// than BAND_GAP_THRESHOLD apart
fn stable_bands(valid: &[OperatingPoint], mean: f64) -> Vec<SpeedBand> {
    let mut stable = valid.iter().filter(|p| p.depth > mean).map(|p| p.speed);

    let Some(first) = stable.next() else {
        return Vec::new();
    };

    let mut bands = Vec::new();
    let mut current = SpeedBand { start: first, end: first };
    for speed in stable {
        if speed - current.end > BAND_GAP_THRESHOLD {
            bands.push(current);
            current = SpeedBand { start: speed, end: speed };
        } else {
            current.end = speed;
        }
    }
    bands.push(current);

    bands.truncate(MAX_STABLE_BANDS);
    bands
}
