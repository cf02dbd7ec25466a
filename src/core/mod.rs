//! Core modules for Lobe0

pub mod dynamics;
pub mod directional;
pub mod boundary;
pub mod analyzer;
pub mod speed_range;
pub mod pipeline;
pub mod sweep;
pub mod report;
pub mod trace_init;
pub mod api;

pub use dynamics::derive_modal;
pub use directional::directional_coefficients;
pub use boundary::{StabilityBoundaryStrategy, ZoaStrategy, EmpiricalStrategy, evaluate_boundary};
pub use analyzer::analyze;
pub use speed_range::{parse_speed_spec, DEFAULT_RANGE_POINTS};
pub use pipeline::LobeRun;
pub use sweep::{DampingSweep, SweepCurve, DEFAULT_DAMPING_RATIOS};
pub use report::{build_report, from_run, input_digest, save_report, load_report};
pub use trace_init::init_tracing;
pub use api::{create_router, run_server, ReportCache};
