//! Damping comparison: the same machine evaluated at several damping ratios

use serde::{Deserialize, Serialize};

use crate::types::{
    AnalysisRequest, BoundaryMethod, CuttingGeometry, LobeAnalysisResult, LobeError,
    SpeedRange, SpeedSpec, StabilityCurve, SystemSpec,
};

/// Ratios compared by default
pub const DEFAULT_DAMPING_RATIOS: [f64; 3] = [0.01, 0.02, 0.03];

/// Sweep definition. Missing JSON fields take the default sweep's values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DampingSweep {
    pub natural_frequency_hz: f64,
    pub damping_ratios: Vec<f64>,
    pub geometry: CuttingGeometry,
    pub speeds: SpeedSpec,
    pub method: BoundaryMethod,
}

impl Default for DampingSweep {
    fn default() -> Self {
        Self {
            natural_frequency_hz: 1000.0,
            damping_ratios: DEFAULT_DAMPING_RATIOS.to_vec(),
            geometry: CuttingGeometry::default(),
            speeds: SpeedSpec::Range(SpeedRange::new(1000.0, 20000.0, 1000)),
            method: BoundaryMethod::Empirical,
        }
    }
}

/// One curve of the sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepCurve {
    pub damping_ratio: f64,
    pub curve: StabilityCurve,
    pub analysis: LobeAnalysisResult,
}

impl SweepCurve {
    /// Legend label
    pub fn label(&self) -> String {
        format!("zeta = {}", self.damping_ratio)
    }
}

impl DampingSweep {
    /// Evaluate every ratio, in order
    pub fn run(&self) -> Result<Vec<SweepCurve>, LobeError> {
        self.damping_ratios
            .iter()
            .map(|&zeta| {
                let request = AnalysisRequest {
                    system: SystemSpec::Modal {
                        natural_frequency_hz: self.natural_frequency_hz,
                        damping_ratio: zeta,
                    },
                    geometry: self.geometry,
                    speeds: self.speeds.clone(),
                    method: self.method,
                };
                let run = request.run()?;
                Ok(SweepCurve {
                    damping_ratio: zeta,
                    curve: run.curve,
                    analysis: run.analysis,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_more_damping_raises_the_boundary() {
        let curves = DampingSweep::default().run().unwrap();
        assert_eq!(curves.len(), 3);

        let best: Vec<f64> = curves
            .iter()
            .map(|c| c.analysis.best.unwrap().depth)
            .collect();
        assert!(best[0] < best[1] && best[1] < best[2]);
        assert_eq!(curves[1].label(), "zeta = 0.02");
    }

    #[test]
    fn test_invalid_ratio_fails_the_sweep() {
        let sweep = DampingSweep {
            damping_ratios: vec![0.01, -0.5],
            ..DampingSweep::default()
        };
        assert_eq!(sweep.run().unwrap_err().parameter(), "damping_ratio");
    }
}
