//! HTTP API for lobe computation
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /modal - Modal parameters from a physical system
//! - POST /lobes - Evaluate + analyze a request, returns a report
//! - POST /analyze - Analyze a posted curve
//! - POST /sweep - Damping comparison
//! - GET /reports/:id - Cached report

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::core::{analyze, build_report, derive_modal, save_report, DampingSweep, SweepCurve};
use crate::types::{
    AnalysisRequest, LobeAnalysisResult, LobeError, LobeReport, ModalParameters, PhysicalSystem,
    ReportError, StabilityCurve,
};

/// Bounded report cache; past `capacity` the oldest report is dropped
pub struct ReportCache {
    reports: HashMap<String, LobeReport>,
    order: VecDeque<String>,
    capacity: usize,
}

impl ReportCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            reports: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    /// Insert or replace by id
    pub fn insert(&mut self, report: LobeReport) {
        let id = report.id.clone();
        if self.reports.insert(id.clone(), report).is_none() {
            self.order.push_back(id);
        }
        while self.order.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.reports.remove(&oldest);
            debug!(id = %oldest, "evicted cached report");
        }
    }

    pub fn get(&self, id: &str) -> Option<&LobeReport> {
        self.reports.get(id)
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

/// App state
pub struct AppState {
    pub reports: RwLock<ReportCache>,
    pub report_dir: Option<String>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub reports_cached: usize,
}

/// Error body for rejected requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub parameter: Option<String>,
}

/// Lobes response: the report plus where it was saved, if anywhere
#[derive(Debug, Serialize)]
pub struct LobesResponse {
    #[serde(flatten)]
    pub report: LobeReport,
    pub saved_path: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(err: LobeError) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: err.to_string(),
            parameter: Some(err.parameter().to_string()),
        }),
    )
}

fn internal(message: impl ToString) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
            parameter: None,
        }),
    )
}

/// Create the API router. Reports are saved under `report_dir` when given.
pub fn create_router(report_dir: Option<String>) -> Router {
    let state = Arc::new(AppState {
        reports: RwLock::new(ReportCache::new(crate::MAX_CACHED_REPORTS)),
        report_dir,
    });

    Router::new()
        .route("/health", get(health))
        .route("/modal", post(modal))
        .route("/lobes", post(lobes))
        .route("/analyze", post(analyze_curve))
        .route("/sweep", post(sweep))
        .route("/reports/:id", get(get_report))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let reports = state.reports.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        reports_cached: reports.len(),
    })
}

/// Derive modal parameters
async fn modal(Json(system): Json<PhysicalSystem>) -> Result<Json<ModalParameters>, ApiError> {
    derive_modal(&system).map(Json).map_err(bad_request)
}

/// Evaluate, analyze, cache and optionally save
async fn lobes(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<LobesResponse>, ApiError> {
    let report = tokio::task::spawn_blocking(move || build_report(&req))
        .await
        .map_err(internal)?
        .map_err(|e| match e {
            ReportError::Lobe(e) => bad_request(e),
            other => internal(other),
        })?;

    let saved_path = match &state.report_dir {
        Some(dir) => match save_report(&report, dir) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(id = %report.id, error = %e, "report save failed");
                None
            }
        },
        None => None,
    };

    info!(id = %report.id, valid = report.analysis.valid_count, "lobes computed");
    let mut reports = state.reports.write().await;
    reports.insert(report.clone());

    Ok(Json(LobesResponse { report, saved_path }))
}

/// Analyze a caller-supplied curve
async fn analyze_curve(Json(curve): Json<StabilityCurve>) -> Json<LobeAnalysisResult> {
    Json(analyze(&curve))
}

/// Damping comparison
async fn sweep(Json(sweep): Json<DampingSweep>) -> Result<Json<Vec<SweepCurve>>, ApiError> {
    tokio::task::spawn_blocking(move || sweep.run())
        .await
        .map_err(internal)?
        .map(Json)
        .map_err(bad_request)
}

/// Get a cached report
async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LobeReport>, StatusCode> {
    let reports = state.reports.read().await;
    let report = reports.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(report.clone()))
}

/// Run the API server
pub async fn run_server(addr: &str, report_dir: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(report_dir);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "lobe0 API listening");
    println!("Lobe0 API running on {}", addr);
    println!("  GET  /health       - Health check");
    println!("  POST /modal        - Modal parameters");
    println!("  POST /lobes        - Evaluate + analyze");
    println!("  POST /analyze      - Analyze a curve");
    println!("  POST /sweep        - Damping comparison");
    println!("  GET  /reports/:id  - Cached report");
    axum::serve(listener, router).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::build_report;
    use crate::types::{AnalysisRequest, SpeedRange, SpeedSpec};

    fn report_with_points(points: usize) -> LobeReport {
        let request = AnalysisRequest {
            speeds: SpeedSpec::Range(SpeedRange::new(1000.0, 20000.0, points)),
            ..AnalysisRequest::default()
        };
        build_report(&request).unwrap()
    }

    #[test]
    fn test_cache_evicts_oldest_first() {
        let mut cache = ReportCache::new(2);
        let a = report_with_points(10);
        let b = report_with_points(11);
        let c = report_with_points(12);

        cache.insert(a.clone());
        cache.insert(b.clone());
        cache.insert(c.clone());

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&a.id).is_none());
        assert!(cache.get(&b.id).is_some());
        assert!(cache.get(&c.id).is_some());
    }

    #[test]
    fn test_cache_replacing_an_id_keeps_one_slot() {
        let mut cache = ReportCache::new(2);
        let a = report_with_points(10);

        cache.insert(a.clone());
        cache.insert(a.clone());

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.order.len(), 1);
    }
}
