//! Cutting geometry and directional coefficients

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Engagement and cutting-force description of the milling operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CuttingGeometry {
    /// Entry (start) angle φ_st (rad)
    pub entry_angle: f64,
    /// Exit angle φ_ex (rad)
    pub exit_angle: f64,
    /// Number of teeth N
    pub teeth: u32,
    /// Tangential cutting coefficient Kt (N/m²)
    pub kt: f64,
    /// Radial / tangential force ratio Kr
    pub kr: f64,
}

impl CuttingGeometry {
    /// Slotting: entry 0, exit π
    pub fn full_immersion(teeth: u32, kt: f64, kr: f64) -> Self {
        Self {
            entry_angle: 0.0,
            exit_angle: PI,
            teeth,
            kt,
            kr,
        }
    }

    /// Engagement arc (rad)
    pub fn engagement(&self) -> f64 {
        self.exit_angle - self.entry_angle
    }
}

impl Default for CuttingGeometry {
    fn default() -> Self {
        Self::full_immersion(4, 6e8, 0.3)
    }
}

/// Orientation factors of the zeroth-order directional force matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalCoefficients {
    /// Average directional factor over the engagement arc
    pub g0: f64,
    /// Alternating (once per revolution) factor
    pub h0: f64,
    /// Net amplitude of the force-direction oscillation, >= 0
    pub lambda: f64,
}
