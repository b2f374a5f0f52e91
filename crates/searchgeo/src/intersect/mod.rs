//! Polygon intersection and cut-corner extraction.
//!
//! Purpose
//! - Intersect two search regions (lat/lon treated as Cartesian) and report the
//!   overlap boundary plus up to `max_corners` "cut corners": points where one
//!   input's boundary crosses the other's.
//!
//! Why this design
//! - The boolean op is delegated to `geo`'s sweep-line `BooleanOps`; we only
//!   convert rings in and out. Absence of overlap is a normal result
//!   (`IntersectionResult::is_empty`), never an error.
//! - Multi-part or holed results are reduced to the largest component by area
//!   and flagged `is_simple_polygon = false`. This is best effort, not exact.
//! - Corner picking is pluggable (`CornerStrategy`): true edge crossings by
//!   default, with the bounding-box extreme heuristic kept for callers that
//!   want the legacy corners.

mod cfg;
mod corners;

pub use cfg::{CornerStrategy, IntersectCfg, CORNER_TOL, MAX_CORNERS};

use geo::{Area, BooleanOps, Coord, LineString};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{GeoPoint, Polygon, CLOSE_EPS};
use corners::extract_corners;

/// Overlap of two regions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntersectionResult {
    /// Closed boundary of the overlap; empty when the inputs are disjoint.
    pub overlap_polygon: Polygon,
    pub corner_points: Vec<GeoPoint>,
    pub is_simple_polygon: bool,
}

impl IntersectionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.overlap_polygon.is_empty()
    }
}

/// `intersect_with` under `IntersectCfg::default()`.
pub fn intersect(a: &Polygon, b: &Polygon) -> Result<IntersectionResult> {
    intersect_with(a, b, &IntersectCfg::default())
}

/// Planar intersection of `a` and `b` with corner extraction per `cfg`.
///
/// Fails with `MalformedPolygon` when either ring has non-finite coordinates
/// or fewer than 3 distinct vertices.
pub fn intersect_with(a: &Polygon, b: &Polygon, cfg: &IntersectCfg) -> Result<IntersectionResult> {
    a.check_ring()?;
    b.check_ring()?;

    // P ∩ P is P itself, ring order untouched
    if a.approx_eq(b, CLOSE_EPS) {
        let overlap = a.clone();
        let corner_points = extract_corners(a, b, &overlap, cfg);
        return Ok(IntersectionResult {
            is_simple_polygon: overlap.is_simple(),
            overlap_polygon: overlap,
            corner_points,
        });
    }

    let pieces = to_geo(a).intersection(&to_geo(b));
    let Some(largest) = pieces
        .0
        .iter()
        .max_by(|l, r| l.unsigned_area().total_cmp(&r.unsigned_area()))
    else {
        tracing::debug!("regions do not overlap");
        return Ok(IntersectionResult::empty());
    };

    let overlap: Polygon = largest
        .exterior()
        .coords()
        .map(|c| GeoPoint::new(c.y, c.x))
        .collect::<Polygon>()
        .closed();
    let is_simple_polygon =
        pieces.0.len() == 1 && largest.interiors().is_empty() && overlap.is_simple();
    let corner_points = extract_corners(a, b, &overlap, cfg);
    tracing::debug!(
        parts = pieces.0.len(),
        vertices = overlap.len(),
        corners = corner_points.len(),
        simple = is_simple_polygon,
        "intersected regions"
    );
    Ok(IntersectionResult {
        overlap_polygon: overlap,
        corner_points,
        is_simple_polygon,
    })
}

fn to_geo(p: &Polygon) -> geo::Polygon<f64> {
    let coords: Vec<Coord<f64>> = p
        .ring_xy()
        .into_iter()
        .map(|v| Coord { x: v.x, y: v.y })
        .collect();
    geo::Polygon::new(LineString::new(coords), vec![])
}
