//! Machining system dynamics: physical and modal parameters

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::types::LobeError;

/// Single-degree-of-freedom physical system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSystem {
    /// Modal mass (kg), > 0
    pub mass: f64,
    /// Damping coefficient (N·s/m), >= 0
    pub damping: f64,
    /// Stiffness (N/m), > 0
    pub stiffness: f64,
}

impl PhysicalSystem {
    pub fn new(mass: f64, damping: f64, stiffness: f64) -> Self {
        Self {
            mass,
            damping,
            stiffness,
        }
    }
}

/// Modal quantities derived from a [`PhysicalSystem`] or supplied directly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModalParameters {
    /// ω_n (rad/s)
    pub natural_frequency_rad_s: f64,
    /// f_n (Hz)
    pub natural_frequency_hz: f64,
    /// ζ (dimensionless)
    pub damping_ratio: f64,
}

impl ModalParameters {
    /// Build modal data directly from a natural frequency in Hz and a damping ratio
    pub fn from_frequency(natural_frequency_hz: f64, damping_ratio: f64) -> Result<Self, LobeError> {
        if !natural_frequency_hz.is_finite() || natural_frequency_hz <= 0.0 {
            return Err(LobeError::invalid(
                "natural_frequency_hz",
                format!("must be finite and > 0, got {}", natural_frequency_hz),
            ));
        }
        if !damping_ratio.is_finite() || damping_ratio < 0.0 {
            return Err(LobeError::invalid(
                "damping_ratio",
                format!("must be finite and >= 0, got {}", damping_ratio),
            ));
        }

        Ok(Self {
            natural_frequency_rad_s: 2.0 * PI * natural_frequency_hz,
            natural_frequency_hz,
            damping_ratio,
        })
    }
}
