//! Corner-extraction knobs.
//!
//! Policy
//! - Fixed tolerances live here as constants; `IntersectCfg::default()` is what
//!   every caller uses unless it has a concrete reason to deviate.

use crate::types::GeoPoint;

/// Extreme-point matching and dedup tolerance in degrees (about 11 m).
pub const CORNER_TOL: f64 = 1e-4;
/// Upper bound on reported corners.
pub const MAX_CORNERS: usize = 4;

/// How corner points are picked from the overlap.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CornerStrategy {
    /// Points where an edge of A crosses an edge of B, in overlap boundary
    /// order. Falls back to bounding-box extremes when fewer than 2 exist.
    #[default]
    Crossings,
    /// Legacy heuristic: up to 2 overlap vertices on the bounding-box extremes,
    /// then the caller's `retained` points. Uses raw overlap vertices when
    /// fewer than 2 extremes are found.
    Extremes { retained: Vec<GeoPoint> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntersectCfg {
    pub max_corners: usize,
    pub corner_tolerance: f64,
    pub strategy: CornerStrategy,
}

impl Default for IntersectCfg {
    fn default() -> Self {
        Self {
            max_corners: MAX_CORNERS,
            corner_tolerance: CORNER_TOL,
            strategy: CornerStrategy::Crossings,
        }
    }
}

impl IntersectCfg {
    /// Legacy extreme-point corners with the given retained points.
    pub fn extremes(retained: Vec<GeoPoint>) -> Self {
        Self {
            strategy: CornerStrategy::Extremes { retained },
            ..Self::default()
        }
    }
}
