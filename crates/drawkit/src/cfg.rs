//! Tolerance defaults for the kernel (internal).
//!
//! Policy
//! - Defaults are fixed constants to avoid “tolerance juggling” across call
//!   sites. Coordinates are expected in user units of roughly 1..10⁴.

/// Source chords shorter than this reject a connection shape at construction.
pub(crate) const DEGENERATE_CHORD_EPS: f64 = 1e-6;
/// Below this source-chord length the per-query transform is undefined.
pub(crate) const SOURCE_CHORD_EPS: f64 = 1e-9;
/// Central-difference step (in parameter space) for tangents.
pub(crate) const TANGENT_EPS: f64 = 1e-6;
/// Control points stay within this fraction of the chord from their anchor.
pub const MAX_CONTROL_RATIO: f64 = 0.75;
/// Polyline samples for arc-length estimates of general pathables.
pub const ARC_LENGTH_SAMPLES: usize = 200;
/// Segment count used when a path shape does not specify one.
pub const DEFAULT_PATH_SEGMENTS: usize = 16;
/// Coefficients below this are treated as zero by the extrema solvers.
pub(crate) const ROOT_EPS: f64 = 1e-12;
