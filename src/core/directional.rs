//! Directional coefficients of the zeroth-order cutting force matrix
//!
//! g0 = (φ_ex - φ_st) / 2π
//! h0 = (sin 2φ_st - sin 2φ_ex + 2(φ_ex - φ_st)) / 4π
//! Λ  = sqrt((g0 + Kr h0)² + (h0 - Kr g0)²)

use std::f64::consts::{PI, TAU};

use crate::types::{CuttingGeometry, DirectionalCoefficients, LobeError};

/// Compute g0, h0 and Λ for an engagement arc
pub fn directional_coefficients(geometry: &CuttingGeometry) -> Result<DirectionalCoefficients, LobeError> {
    let (entry, exit) = (geometry.entry_angle, geometry.exit_angle);

    if !entry.is_finite() || !(0.0..=TAU).contains(&entry) {
        return Err(LobeError::invalid(
            "entry_angle",
            format!("must lie in [0, 2π], got {}", entry),
        ));
    }
    if !exit.is_finite() || !(0.0..=TAU).contains(&exit) {
        return Err(LobeError::invalid(
            "exit_angle",
            format!("must lie in [0, 2π], got {}", exit),
        ));
    }
    let arc = geometry.engagement();
    if arc <= 0.0 {
        return Err(LobeError::invalid(
            "entry_angle",
            format!("entry ({}) must be less than exit ({})", entry, exit),
        ));
    }
    if !geometry.kr.is_finite() {
        return Err(LobeError::invalid("kr", "must be finite"));
    }

    let kr = geometry.kr;
    let g0 = arc / (2.0 * PI);
    let h0 = ((2.0 * entry).sin() - (2.0 * exit).sin() + 2.0 * arc) / (4.0 * PI);
    let lambda = ((g0 + kr * h0).powi(2) + (h0 - kr * g0).powi(2)).sqrt();

    Ok(DirectionalCoefficients { g0, h0, lambda })
}
