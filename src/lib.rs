//! Lobe0: milling chatter stability lobe diagrams
//!
//! physical system → modal parameters → directional coefficients →
//! critical depth per spindle speed → lobe analysis

pub mod core;
pub mod types;

// =============================================================================
// EMPIRICAL LOBES - harmonic matching constants
// =============================================================================

/// Sharpness of the U-shaped lobe factor: 1 / (1 + k * error^2)
pub const LOBE_SHARPNESS: f64 = 100.0;

/// Amplitude of the sinusoidal perturbation across the speed series
pub const PERTURBATION_AMPLITUDE: f64 = 0.1;

/// Gain applied to the empirical base depth
pub const EMPIRICAL_DEPTH_GAIN: f64 = 50.0;

/// Moving-average window for empirical smoothing (points)
pub const SMOOTHING_WINDOW: usize = 5;

/// Smoothing only runs when more defined points than this exist
pub const SMOOTHING_MIN_DEFINED: usize = 10;

// =============================================================================
// ANALYZER
// =============================================================================

/// Recommended depth = best stable depth * safety factor
pub const SAFETY_FACTOR: f64 = 0.8;

/// Gap between stable speeds that starts a new band (speed units, RPM)
pub const BAND_GAP_THRESHOLD: f64 = 50.0;

/// Number of stable bands reported
pub const MAX_STABLE_BANDS: usize = 3;

/// Number of minima and of maxima reported
pub const MAX_EXTREMA: usize = 2;

// =============================================================================
// LIMITS
// =============================================================================

/// Largest speed series accepted from a range or an explicit list
pub const MAX_SPEED_POINTS: usize = 100_000;

/// Reports kept in the API's in-memory cache; the oldest is evicted first
pub const MAX_CACHED_REPORTS: usize = 64;

// =============================================================================
// UNITS
// =============================================================================

/// Metres → millimetres
pub const MM_PER_M: f64 = 1000.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
