//! Error types

use thiserror::Error;

/// Errors raised by the lobe computation core.
///
/// An undefined depth at a given speed is not an error; it is carried as
/// `None` in the curve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LobeError {
    /// Structurally invalid input (non-positive mass, degenerate angles, ...)
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl LobeError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Name of the offending parameter
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidParameter { name, .. } => name,
        }
    }
}

/// Errors raised while building, saving or loading lobe reports
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Lobe(#[from] LobeError),
    #[error("report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("report storage failed: {0}")]
    Storage(#[from] std::io::Error),
}
