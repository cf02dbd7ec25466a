//! Analysis requests: the input side of one lobe run
//!
//! Used as the JSON config file format (`--config`) and as the body of
//! `POST /lobes`.

use serde::{Deserialize, Serialize};

use crate::types::{BoundaryMethod, CuttingGeometry, PhysicalSystem, SpeedSpec};

/// Machine dynamics, given either physically or as modal data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SystemSpec {
    Physical(PhysicalSystem),
    Modal {
        natural_frequency_hz: f64,
        damping_ratio: f64,
    },
}

impl Default for SystemSpec {
    fn default() -> Self {
        SystemSpec::Physical(PhysicalSystem::new(0.5, 80.0, 2e7))
    }
}

/// Everything needed to evaluate and analyze one stability curve
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub system: SystemSpec,
    #[serde(default)]
    pub geometry: CuttingGeometry,
    #[serde(default)]
    pub speeds: SpeedSpec,
    #[serde(default)]
    pub method: BoundaryMethod,
}
