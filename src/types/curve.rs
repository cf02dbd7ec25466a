//! Spindle speed series and stability curves

use serde::{Deserialize, Serialize};

use crate::types::LobeError;
use crate::MAX_SPEED_POINTS;

fn check_point_count(points: usize) -> Result<(), LobeError> {
    if points > MAX_SPEED_POINTS {
        return Err(LobeError::invalid(
            "speeds",
            format!("{} speeds requested, at most {} allowed", points, MAX_SPEED_POINTS),
        ));
    }
    Ok(())
}

/// Ordered spindle speeds (RPM), all strictly positive
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct SpeedSeries(Vec<f64>);

impl SpeedSeries {
    /// Wrap caller-built speeds. Every speed must be finite and > 0, and
    /// there may be at most [`MAX_SPEED_POINTS`] of them.
    /// An empty series is representable; evaluators reject it.
    pub fn new(speeds: Vec<f64>) -> Result<Self, LobeError> {
        check_point_count(speeds.len())?;
        if let Some(bad) = speeds.iter().find(|s| !s.is_finite() || **s <= 0.0) {
            return Err(LobeError::invalid(
                "speeds",
                format!("spindle speeds must be finite and > 0, got {}", bad),
            ));
        }
        Ok(Self(speeds))
    }

    /// `points` evenly spaced speeds from `start` to `end` inclusive
    pub fn linspace(start: f64, end: f64, points: usize) -> Result<Self, LobeError> {
        check_point_count(points)?;
        let speeds = match points {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (points - 1) as f64;
                let mut v: Vec<f64> = (0..points).map(|i| start + i as f64 * step).collect();
                v[points - 1] = end;
                v
            }
        };
        Self::new(speeds)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }
}

impl TryFrom<Vec<f64>> for SpeedSeries {
    type Error = LobeError;

    fn try_from(speeds: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(speeds)
    }
}

impl From<SpeedSeries> for Vec<f64> {
    fn from(series: SpeedSeries) -> Self {
        series.0
    }
}

/// Inclusive, evenly spaced speed range, the usual way to request a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub start: f64,
    pub end: f64,
    pub points: usize,
}

impl SpeedRange {
    pub fn new(start: f64, end: f64, points: usize) -> Self {
        Self { start, end, points }
    }

    pub fn to_series(&self) -> Result<SpeedSeries, LobeError> {
        SpeedSeries::linspace(self.start, self.end, self.points)
    }
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self::new(1000.0, 20000.0, 1500)
    }
}

/// Speeds as requested: an evenly spaced range or an explicit list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpeedSpec {
    Range(SpeedRange),
    List(Vec<f64>),
}

impl SpeedSpec {
    pub fn to_series(&self) -> Result<SpeedSeries, LobeError> {
        match self {
            SpeedSpec::Range(range) => range.to_series(),
            SpeedSpec::List(speeds) => SpeedSeries::new(speeds.clone()),
        }
    }
}

impl Default for SpeedSpec {
    fn default() -> Self {
        SpeedSpec::Range(SpeedRange::default())
    }
}

/// One point of a stability curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Spindle speed (RPM)
    pub speed: f64,
    /// Critical axial depth (mm), None where no stable depth exists
    pub depth: Option<f64>,
}

impl CurvePoint {
    pub fn new(speed: f64, depth: Option<f64>) -> Self {
        Self { speed, depth }
    }

    pub fn is_defined(&self) -> bool {
        self.depth.is_some()
    }
}

/// Critical depth per spindle speed, parallel to the evaluated [`SpeedSeries`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StabilityCurve {
    points: Vec<CurvePoint>,
}

impl StabilityCurve {
    pub fn new(points: Vec<CurvePoint>) -> Self {
        Self { points }
    }

    /// Zip a speed series with per-speed depths (same length)
    pub(crate) fn from_depths(speeds: &SpeedSeries, depths: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(speeds.len(), depths.len());
        let points = speeds
            .iter()
            .zip(depths)
            .map(|(&speed, depth)| CurvePoint::new(speed, depth))
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points with a defined depth
    pub fn defined_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_defined()).count()
    }

    /// Defined points as (curve index, speed, depth)
    pub fn defined(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.depth.map(|d| (i, p.speed, d)))
    }

    pub fn speeds(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.speed).collect()
    }

    pub fn depths(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.depth).collect()
    }
}
