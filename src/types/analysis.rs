//! Lobe analysis results

use serde::{Deserialize, Serialize};

use crate::SAFETY_FACTOR;

/// A point on the curve picked out by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    /// Index into the analyzed curve
    pub index: usize,
    /// Spindle speed (RPM)
    pub speed: f64,
    /// Critical depth (mm)
    pub depth: f64,
}

/// Closed range of critical depths (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthRange {
    pub min: f64,
    pub max: f64,
}

/// Contiguous run of stable speeds (RPM)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedBand {
    pub start: f64,
    pub end: f64,
}

impl SpeedBand {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Everything the analyzer derives from one stability curve
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LobeAnalysisResult {
    /// Number of defined points
    pub valid_count: usize,
    /// Min/max defined depth
    pub depth_range: Option<DepthRange>,
    /// Deepest stable cut (first on ties)
    pub best: Option<OperatingPoint>,
    /// Shallowest stable cut (first on ties)
    pub worst: Option<OperatingPoint>,
    /// First strict local minima, speed ascending
    pub minima: Vec<OperatingPoint>,
    /// First strict local maxima, speed ascending
    pub maxima: Vec<OperatingPoint>,
    /// Mean of the defined depths
    pub mean_depth: Option<f64>,
    /// Speed bands whose depth exceeds the mean
    pub stable_bands: Vec<SpeedBand>,
    /// best.depth * SAFETY_FACTOR
    pub recommended_depth: Option<f64>,
}

impl LobeAnalysisResult {
    /// Result for a curve with no defined points
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.valid_count == 0
    }

    pub(crate) fn recommended_for(best: Option<&OperatingPoint>) -> Option<f64> {
        best.map(|p| p.depth * SAFETY_FACTOR)
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let fmt_point = |p: Option<&OperatingPoint>| match p {
            Some(p) => format!("{:.0}rpm@{:.3}mm", p.speed, p.depth),
            None => "none".to_string(),
        };
        let range = match self.depth_range {
            Some(r) => format!("{:.3}..{:.3}", r.min, r.max),
            None => "none".to_string(),
        };
        let recommended = match self.recommended_depth {
            Some(d) => format!("{:.3}", d),
            None => "none".to_string(),
        };
        let bands = self
            .stable_bands
            .iter()
            .map(|b| format!("{:.0}-{:.0}", b.start, b.end))
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "valid={} | range={} | best={} | worst={} | recommended={} | bands=[{}]",
            self.valid_count,
            range,
            fmt_point(self.best.as_ref()),
            fmt_point(self.worst.as_ref()),
            recommended,
            bands
        )
    }
}
