//! Dynamics: physical (m, c, k) → modal (ω_n, f_n, ζ)
//!
//! ω_n = sqrt(k / m), ζ = c / (2 sqrt(k m)), f_n = ω_n / 2π

use std::f64::consts::PI;

use crate::types::{LobeError, ModalParameters, PhysicalSystem};

/// Derive modal parameters from a physical system
pub fn derive_modal(system: &PhysicalSystem) -> Result<ModalParameters, LobeError> {
    if !system.mass.is_finite() || system.mass <= 0.0 {
        return Err(LobeError::invalid(
            "mass",
            format!("must be finite and > 0, got {}", system.mass),
        ));
    }
    if !system.stiffness.is_finite() || system.stiffness <= 0.0 {
        return Err(LobeError::invalid(
            "stiffness",
            format!("must be finite and > 0, got {}", system.stiffness),
        ));
    }
    if !system.damping.is_finite() || system.damping < 0.0 {
        return Err(LobeError::invalid(
            "damping",
            format!("must be finite and >= 0, got {}", system.damping),
        ));
    }

    let omega_n = (system.stiffness / system.mass).sqrt();
    let zeta = system.damping / (2.0 * (system.stiffness * system.mass).sqrt());

    Ok(ModalParameters {
        natural_frequency_rad_s: omega_n,
        natural_frequency_hz: omega_n / (2.0 * PI),
        damping_ratio: zeta,
    })
}
