//! One full lobe run: dynamics → coefficients → boundary → analysis

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{analyze, derive_modal, directional_coefficients, evaluate_boundary};
use crate::types::{
    AnalysisRequest, BoundaryMethod, CuttingGeometry, DirectionalCoefficients, LobeAnalysisResult,
    LobeError, ModalParameters, RenderMetadata, StabilityCurve, SystemSpec,
};

/// Everything a run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobeRun {
    pub method: BoundaryMethod,
    pub modal: ModalParameters,
    pub geometry: CuttingGeometry,
    pub coefficients: DirectionalCoefficients,
    pub curve: StabilityCurve,
    pub analysis: LobeAnalysisResult,
}

impl LobeRun {
    /// Labels for a plot of this run
    pub fn metadata(&self) -> RenderMetadata {
        RenderMetadata {
            f_n: self.modal.natural_frequency_hz,
            zeta: self.modal.damping_ratio,
            teeth: self.geometry.teeth,
            kt: self.geometry.kt,
        }
    }
}

impl SystemSpec {
    /// Modal parameters, deriving them if the system is given physically
    pub fn modal(&self) -> Result<ModalParameters, LobeError> {
        match self {
            SystemSpec::Physical(system) => derive_modal(system),
            SystemSpec::Modal {
                natural_frequency_hz,
                damping_ratio,
            } => ModalParameters::from_frequency(*natural_frequency_hz, *damping_ratio),
        }
    }
}

impl AnalysisRequest {
    /// Evaluate and analyze the requested curve
    pub fn run(&self) -> Result<LobeRun, LobeError> {
        let modal = self.system.modal()?;
        let coefficients = directional_coefficients(&self.geometry)?;
        let speeds = self.speeds.to_series()?;

        let curve = evaluate_boundary(self.method, &modal, &coefficients, &self.geometry, &speeds)?;
        let analysis = analyze(&curve);

        info!(
            method = %self.method,
            f_n = modal.natural_frequency_hz,
            zeta = modal.damping_ratio,
            points = curve.len(),
            valid = analysis.valid_count,
            "lobe run complete"
        );

        Ok(LobeRun {
            method: self.method,
            modal,
            geometry: self.geometry,
            coefficients,
            curve,
            analysis,
        })
    }
}
