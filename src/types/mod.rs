//! Core types for Lobe0

mod error;
mod system;
mod geometry;
mod curve;
mod analysis;
mod method;
mod request;
mod report;

pub use error::{LobeError, ReportError};
pub use system::{PhysicalSystem, ModalParameters};
pub use geometry::{CuttingGeometry, DirectionalCoefficients};
pub use curve::{SpeedSeries, SpeedRange, SpeedSpec, CurvePoint, StabilityCurve};
pub use analysis::{LobeAnalysisResult, OperatingPoint, DepthRange, SpeedBand};
pub use method::BoundaryMethod;
pub use request::{AnalysisRequest, SystemSpec};
pub use report::{LobeReport, RenderMetadata};
