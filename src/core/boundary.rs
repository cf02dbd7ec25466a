//! Stability boundary evaluation: critical axial depth per spindle speed
//!
//! Two strategies share one contract: same inputs, a curve parallel to the
//! speed series, `None` wherever no positive depth exists.
//!
//! - [`ZoaStrategy`]: closed-form zero-order approximation
//! - [`EmpiricalStrategy`]: harmonic-matching approximation. Illustrative only,
//!   it produces plausible looking lobes and is not a physical model.

use std::f64::consts::PI;

use tracing::debug;

use crate::types::{
    BoundaryMethod, CuttingGeometry, DirectionalCoefficients, LobeError, ModalParameters,
    SpeedSeries, StabilityCurve,
};
use crate::{
    EMPIRICAL_DEPTH_GAIN, LOBE_SHARPNESS, MM_PER_M, PERTURBATION_AMPLITUDE,
    SMOOTHING_MIN_DEFINED, SMOOTHING_WINDOW,
};

/// A way of turning machine dynamics into a stability boundary
pub trait StabilityBoundaryStrategy: Send + Sync {
    /// Which method this strategy implements
    fn method(&self) -> BoundaryMethod;

    /// Evaluate the critical depth (mm) at every speed of `speeds`.
    ///
    /// Uses `geometry.teeth` and `geometry.kt`; the engagement arc enters
    /// only through `coefficients`.
    fn evaluate(
        &self,
        modal: &ModalParameters,
        coefficients: &DirectionalCoefficients,
        geometry: &CuttingGeometry,
        speeds: &SpeedSeries,
    ) -> Result<StabilityCurve, LobeError>;
}

/// Closed-form zero-order approximation
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoaStrategy;

/// Harmonic-matching approximation with 5-point smoothing
#[derive(Debug, Clone, Copy, Default)]
pub struct EmpiricalStrategy;

static ZOA: ZoaStrategy = ZoaStrategy;
static EMPIRICAL: EmpiricalStrategy = EmpiricalStrategy;

impl BoundaryMethod {
    /// The strategy implementing this method
    pub fn strategy(&self) -> &'static dyn StabilityBoundaryStrategy {
        match self {
            BoundaryMethod::Zoa => &ZOA,
            BoundaryMethod::Empirical => &EMPIRICAL,
        }
    }
}

/// Evaluate with an explicitly selected method
pub fn evaluate_boundary(
    method: BoundaryMethod,
    modal: &ModalParameters,
    coefficients: &DirectionalCoefficients,
    geometry: &CuttingGeometry,
    speeds: &SpeedSeries,
) -> Result<StabilityCurve, LobeError> {
    method.strategy().evaluate(modal, coefficients, geometry, speeds)
}

impl StabilityBoundaryStrategy for ZoaStrategy {
    fn method(&self) -> BoundaryMethod {
        BoundaryMethod::Zoa
    }

    fn evaluate(
        &self,
        modal: &ModalParameters,
        coefficients: &DirectionalCoefficients,
        geometry: &CuttingGeometry,
        speeds: &SpeedSeries,
    ) -> Result<StabilityCurve, LobeError> {
        validate_inputs(modal, coefficients, geometry, speeds)?;

        let omega_n = modal.natural_frequency_rad_s;
        let zeta = modal.damping_ratio;
        let n = geometry.teeth as f64;
        let gain = n * geometry.kt * coefficients.lambda;

        let depths: Vec<Option<f64>> = speeds
            .iter()
            .map(|&rpm| {
                // Tooth-passing period (s); ω_n T is the phase lag between passes
                let t = 60.0 / (n * rpm);
                let numerator = -2.0 * PI * zeta * omega_n.powi(2) * (1.0 + (zeta * omega_n * t).powi(2));
                let denominator =
                    gain * (omega_n.powi(2) * t * (1.0 + zeta.powi(2)) + 2.0 * zeta * omega_n);
                let a_lim = numerator / denominator;
                (a_lim > 0.0).then(|| a_lim * MM_PER_M)
            })
            .collect();

        let curve = StabilityCurve::from_depths(speeds, depths);
        debug!(
            method = %self.method(),
            points = curve.len(),
            defined = curve.defined_count(),
            "evaluated stability boundary"
        );
        Ok(curve)
    }
}

impl StabilityBoundaryStrategy for EmpiricalStrategy {
    fn method(&self) -> BoundaryMethod {
        BoundaryMethod::Empirical
    }

    fn evaluate(
        &self,
        modal: &ModalParameters,
        coefficients: &DirectionalCoefficients,
        geometry: &CuttingGeometry,
        speeds: &SpeedSeries,
    ) -> Result<StabilityCurve, LobeError> {
        validate_inputs(modal, coefficients, geometry, speeds)?;

        let f_n = modal.natural_frequency_hz;
        let omega_n = 2.0 * PI * f_n;
        let zeta = modal.damping_ratio;
        let n = geometry.teeth as f64;
        let n_points = speeds.len() as f64;

        let base_depth = (MM_PER_M * zeta * omega_n) / (n * geometry.kt * coefficients.lambda);

        let raw: Vec<Option<f64>> = speeds
            .iter()
            .enumerate()
            .map(|(i, &rpm)| {
                let f_tooth = n * rpm / 60.0;
                let harmonic = (f_n / f_tooth).round_ties_even();
                if harmonic <= 0.0 {
                    return None;
                }

                let error = (f_n - harmonic * f_tooth).abs() / f_n;
                let lobe_factor = 1.0 / (1.0 + LOBE_SHARPNESS * error.powi(2));
                let perturbation =
                    1.0 + PERTURBATION_AMPLITUDE * (2.0 * PI * i as f64 / n_points).sin();

                Some(base_depth * lobe_factor * perturbation * EMPIRICAL_DEPTH_GAIN)
            })
            .collect();

        let curve = StabilityCurve::from_depths(speeds, smooth_defined(raw));
        debug!(
            method = %self.method(),
            points = curve.len(),
            defined = curve.defined_count(),
            "evaluated stability boundary"
        );
        Ok(curve)
    }
}

fn validate_inputs(
    modal: &ModalParameters,
    coefficients: &DirectionalCoefficients,
    geometry: &CuttingGeometry,
    speeds: &SpeedSeries,
) -> Result<(), LobeError> {
    // Same invariants as ModalParameters::from_frequency, plus ω_n
    if !modal.natural_frequency_hz.is_finite() || modal.natural_frequency_hz <= 0.0 {
        return Err(LobeError::invalid(
            "natural_frequency_hz",
            format!("must be finite and > 0, got {}", modal.natural_frequency_hz),
        ));
    }
    if !modal.natural_frequency_rad_s.is_finite() || modal.natural_frequency_rad_s <= 0.0 {
        return Err(LobeError::invalid(
            "natural_frequency_rad_s",
            format!("must be finite and > 0, got {}", modal.natural_frequency_rad_s),
        ));
    }
    if !modal.damping_ratio.is_finite() || modal.damping_ratio < 0.0 {
        return Err(LobeError::invalid(
            "damping_ratio",
            format!("must be finite and >= 0, got {}", modal.damping_ratio),
        ));
    }
    if geometry.teeth < 1 {
        return Err(LobeError::invalid("teeth", "tool needs at least one tooth"));
    }
    if !geometry.kt.is_finite() || geometry.kt <= 0.0 {
        return Err(LobeError::invalid(
            "kt",
            format!("tangential coefficient must be finite and > 0, got {}", geometry.kt),
        ));
    }
    if !coefficients.lambda.is_finite() || coefficients.lambda <= 0.0 {
        return Err(LobeError::invalid(
            "lambda",
            format!("orientation factor must be finite and > 0, got {}", coefficients.lambda),
        ));
    }
    if speeds.is_empty() {
        return Err(LobeError::invalid("speeds", "speed series is empty"));
    }
    Ok(())
}

/// Replace the defined values by their moving average, in order, leaving the
/// undefined positions where they are. Short runs are returned untouched.
fn smooth_defined(depths: Vec<Option<f64>>) -> Vec<Option<f64>> {
    let defined: Vec<f64> = depths.iter().flatten().copied().collect();
    if defined.len() <= SMOOTHING_MIN_DEFINED {
        return depths;
    }

    let mut smoothed = moving_average(&defined, SMOOTHING_WINDOW).into_iter();
    depths
        .into_iter()
        .map(|d| d.and_then(|_| smoothed.next()))
        .collect()
}

/// Centered moving average with zero padding; output has the input's length.
/// Edge values are still divided by the full window.
fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let half = window / 2;
    let weight = 1.0 / window as f64;
    (0..values.len())
        .map(|j| {
            let lo = j.saturating_sub(half);
            let hi = (j + half).min(values.len() - 1);
            values[lo..=hi].iter().map(|v| v * weight).sum()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{derive_modal, directional_coefficients};
    use crate::types::PhysicalSystem;

    fn reference() -> (ModalParameters, DirectionalCoefficients, CuttingGeometry) {
        let modal = derive_modal(&PhysicalSystem::new(0.5, 80.0, 2e7)).unwrap();
        let geometry = CuttingGeometry::full_immersion(4, 6e8, 0.3);
        let coefficients = directional_coefficients(&geometry).unwrap();
        (modal, coefficients, geometry)
    }

    #[test]
    fn test_moving_average_zero_pads_edges() {
        let out = moving_average(&[5.0, 5.0, 5.0, 5.0, 5.0, 5.0], 5);
        assert!((out[0] - 3.0).abs() < 1e-12);
        assert!((out[1] - 4.0).abs() < 1e-12);
        assert!((out[2] - 5.0).abs() < 1e-12);
        assert!((out[5] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_smoothing_keeps_undefined_positions() {
        let mut raw: Vec<Option<f64>> = (0..20).map(|i| Some(i as f64)).collect();
        raw[3] = None;
        raw[11] = None;
        let smoothed = smooth_defined(raw.clone());

        assert_eq!(smoothed.len(), raw.len());
        for (a, b) in raw.iter().zip(&smoothed) {
            assert_eq!(a.is_some(), b.is_some());
        }
    }

    #[test]
    fn test_short_runs_are_not_smoothed() {
        let raw = vec![Some(1.0), None, Some(9.0), Some(2.0)];
        assert_eq!(smooth_defined(raw.clone()), raw);
    }

    #[test]
    fn test_zoa_length_and_positivity() {
        let (modal, coefficients, geometry) = reference();
        let speeds = SpeedSeries::linspace(1000.0, 20000.0, 200).unwrap();
        let curve = ZoaStrategy.evaluate(&modal, &coefficients, &geometry, &speeds).unwrap();

        assert_eq!(curve.len(), speeds.len());
        assert!(curve.defined().all(|(_, _, d)| d > 0.0));
    }

    #[test]
    fn test_zoa_undamped_limit_is_zero_so_undefined() {
        // ζ = 0 makes the numerator exactly zero; only a_lim > 0 is kept
        let modal = ModalParameters::from_frequency(1000.0, 0.0).unwrap();
        let (_, coefficients, geometry) = reference();
        let speeds = SpeedSeries::new(vec![6000.0, 12000.0]).unwrap();
        let curve = ZoaStrategy.evaluate(&modal, &coefficients, &geometry, &speeds).unwrap();

        assert_eq!(curve.depths(), vec![None, None]);
    }

    #[test]
    fn test_rejects_hand_built_modal_data() {
        let (_, coefficients, geometry) = reference();
        let speeds = SpeedSeries::new(vec![6000.0, 13000.0]).unwrap();
        let valid = ModalParameters::from_frequency(1000.0, 0.02).unwrap();

        let negative_zeta = ModalParameters { damping_ratio: -0.02, ..valid };
        let nan_frequency = ModalParameters { natural_frequency_hz: f64::NAN, ..valid };
        let zero_omega = ModalParameters { natural_frequency_rad_s: 0.0, ..valid };

        for method in [BoundaryMethod::Zoa, BoundaryMethod::Empirical] {
            let err = evaluate_boundary(method, &negative_zeta, &coefficients, &geometry, &speeds)
                .unwrap_err();
            assert_eq!(err.parameter(), "damping_ratio");
            let err = evaluate_boundary(method, &nan_frequency, &coefficients, &geometry, &speeds)
                .unwrap_err();
            assert_eq!(err.parameter(), "natural_frequency_hz");
            let err = evaluate_boundary(method, &zero_omega, &coefficients, &geometry, &speeds)
                .unwrap_err();
            assert_eq!(err.parameter(), "natural_frequency_rad_s");
        }
    }

    #[test]
    fn test_empirical_far_from_resonance_is_undefined() {
        let modal = ModalParameters::from_frequency(100.0, 0.02).unwrap();
        let (_, coefficients, geometry) = reference();
        let speeds = SpeedSeries::new(vec![5000.0]).unwrap();
        let curve = EmpiricalStrategy.evaluate(&modal, &coefficients, &geometry, &speeds).unwrap();

        assert_eq!(curve.len(), 1);
        assert_eq!(curve.points()[0].depth, None);
    }

    #[test]
    fn test_empirical_peaks_at_harmonic_alignment() {
        // f_n = 1000 Hz, N = 4: 15000 rpm gives f_tooth = 1000 Hz exactly
        let modal = ModalParameters::from_frequency(1000.0, 0.02).unwrap();
        let (_, coefficients, geometry) = reference();
        let speeds = SpeedSeries::new(vec![15000.0, 13000.0]).unwrap();
        let curve = EmpiricalStrategy.evaluate(&modal, &coefficients, &geometry, &speeds).unwrap();

        let aligned = curve.points()[0].depth.unwrap();
        let off = curve.points()[1].depth.unwrap();
        assert!(aligned > off);

        let base = 1000.0 * 0.02 * 2.0 * PI * 1000.0 / (4.0 * 6e8 * coefficients.lambda);
        assert!((aligned - base * 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_harmonic_rounds_half_to_even() {
        // f_n / f_tooth = 0.5 rounds to harmonic 0, not 1
        let modal = ModalParameters::from_frequency(500.0, 0.02).unwrap();
        let (_, coefficients, geometry) = reference();
        let speeds = SpeedSeries::new(vec![15000.0]).unwrap();
        let curve = EmpiricalStrategy.evaluate(&modal, &coefficients, &geometry, &speeds).unwrap();
        assert_eq!(curve.points()[0].depth, None);
    }

    #[test]
    fn test_rejects_structural_errors() {
        let (modal, coefficients, geometry) = reference();
        let speeds = SpeedSeries::new(vec![1000.0]).unwrap();
        let bad_kt = CuttingGeometry { kt: 0.0, ..geometry };
        let no_teeth = CuttingGeometry { teeth: 0, ..geometry };

        for method in [BoundaryMethod::Zoa, BoundaryMethod::Empirical] {
            let err = evaluate_boundary(method, &modal, &coefficients, &bad_kt, &speeds).unwrap_err();
            assert_eq!(err.parameter(), "kt");
            let err = evaluate_boundary(method, &modal, &coefficients, &no_teeth, &speeds).unwrap_err();
            assert_eq!(err.parameter(), "teeth");
            let err = evaluate_boundary(method, &modal, &coefficients, &geometry, &SpeedSeries::default())
                .unwrap_err();
            assert_eq!(err.parameter(), "speeds");
        }
    }

    #[test]
    fn test_strategy_lookup_matches_method() {
        for method in [BoundaryMethod::Zoa, BoundaryMethod::Empirical] {
            assert_eq!(method.strategy().method(), method);
        }
    }
}
