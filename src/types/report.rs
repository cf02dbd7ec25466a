//! Lobe report types
//!
//! A report bundles one evaluated curve with its analysis and the metadata a
//! plotting tool needs to label it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    BoundaryMethod, DirectionalCoefficients, LobeAnalysisResult, ModalParameters, StabilityCurve,
};

/// Labels handed to a renderer alongside the curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderMetadata {
    /// Natural frequency (Hz)
    pub f_n: f64,
    /// Damping ratio
    pub zeta: f64,
    /// Number of teeth
    #[serde(rename = "N")]
    pub teeth: u32,
    /// Tangential cutting coefficient (N/m²)
    #[serde(rename = "Kt")]
    pub kt: f64,
}

/// One complete, persisted lobe computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LobeReport {
    /// Unique identifier
    pub id: String,
    /// When this report was created
    pub timestamp: DateTime<Utc>,
    /// SHA-256 of the serialized request (hex)
    pub input_digest: String,
    /// Strategy that produced the curve
    pub method: BoundaryMethod,
    pub metadata: RenderMetadata,
    pub modal: ModalParameters,
    pub coefficients: DirectionalCoefficients,
    pub curve: StabilityCurve,
    pub analysis: LobeAnalysisResult,
}
