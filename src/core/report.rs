//! Lobe reports: build, summarize, save and load
//!
//! A report is identified by the SHA-256 of the request that produced it,
//! so identical requests share a digest across runs.

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::info;

use crate::core::LobeRun;
use crate::types::{AnalysisRequest, LobeReport, ReportError};

/// Run a request and wrap the result in a report
pub fn build_report(request: &AnalysisRequest) -> Result<LobeReport, ReportError> {
    let run = request.run()?;
    from_run(request, run)
}

/// Wrap an existing run
pub fn from_run(request: &AnalysisRequest, run: LobeRun) -> Result<LobeReport, ReportError> {
    let digest = input_digest(request)?;
    let now = chrono::Utc::now();
    let id = format!("lobes_{}_{}", now.format("%Y%m%d_%H%M%S"), &digest[..8]);

    Ok(LobeReport {
        id,
        timestamp: now,
        input_digest: digest,
        method: run.method,
        metadata: run.metadata(),
        modal: run.modal,
        coefficients: run.coefficients,
        curve: run.curve,
        analysis: run.analysis,
    })
}

/// Hex SHA-256 of the serialized request
pub fn input_digest(request: &AnalysisRequest) -> Result<String, ReportError> {
    let bytes = serde_json::to_vec(request)?;
    let hash: [u8; 32] = Sha256::digest(&bytes).into();
    Ok(hash.iter().map(|b| format!("{:02x}", b)).collect())
}

/// Save report as pretty JSON into `dir`, returning the file path
pub fn save_report(report: &LobeReport, dir: impl AsRef<Path>) -> Result<String, ReportError> {
    let dir = dir.as_ref();
    let path = dir.join(format!("{}.json", report.id));

    let json = serde_json::to_string_pretty(report)?;
    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, json)?;

    let path = path.display().to_string();
    info!(id = %report.id, path = %path, "report saved");
    Ok(path)
}

/// Load report from a JSON file
pub fn load_report(path: impl AsRef<Path>) -> Result<LobeReport, ReportError> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

impl LobeReport {
    /// One-line summary (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "id={} | method={} | f_n={:.1}Hz | zeta={:.4} | {}",
            self.id,
            self.method,
            self.metadata.f_n,
            self.metadata.zeta,
            self.analysis.to_parseable_string()
        )
    }
}
