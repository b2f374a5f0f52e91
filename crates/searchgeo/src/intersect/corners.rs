//! Corner extraction from an overlap region.

use nalgebra::Vector2;

use super::cfg::{CornerStrategy, IntersectCfg};
use crate::planar::segment_crossing;
use crate::types::{GeoPoint, Polygon};

/// Corners of `overlap` per `cfg.strategy`, at most `cfg.max_corners`.
pub(crate) fn extract_corners(
    a: &Polygon,
    b: &Polygon,
    overlap: &Polygon,
    cfg: &IntersectCfg,
) -> Vec<GeoPoint> {
    if overlap.is_empty() || cfg.max_corners == 0 {
        return Vec::new();
    }
    match &cfg.strategy {
        CornerStrategy::Crossings => {
            let mut found = boundary_crossings(a, b, overlap, cfg.corner_tolerance);
            if found.len() < 2 {
                return extremes(overlap, &[], cfg);
            }
            found.truncate(cfg.max_corners);
            found
        }
        CornerStrategy::Extremes { retained } => extremes(overlap, retained, cfg),
    }
}

fn push_unique(out: &mut Vec<GeoPoint>, p: GeoPoint, tol: f64) {
    if !out.iter().any(|q| q.approx_eq(&p, tol)) {
        out.push(p);
    }
}

/// Every proper crossing of an edge of `a` with an edge of `b` that lies on
/// the overlap ring (within `tol`), deduplicated within `tol` and sorted by
/// position along that ring. Crossings on discarded overlap parts are dropped.
fn boundary_crossings(a: &Polygon, b: &Polygon, overlap: &Polygon, tol: f64) -> Vec<GeoPoint> {
    let ra = a.ring_xy();
    let rb = b.ring_xy();
    let ro = overlap.ring_xy();
    let mut hits: Vec<(f64, Vector2<f64>)> = Vec::new();
    for i in 0..ra.len() {
        let (p0, p1) = (ra[i], ra[(i + 1) % ra.len()]);
        for j in 0..rb.len() {
            let (q0, q1) = (rb[j], rb[(j + 1) % rb.len()]);
            if let Some((x, _, _)) = segment_crossing(p0, p1, q0, q1) {
                let (dist, pos) = ring_position(&ro, x);
                if dist <= tol {
                    hits.push((pos, x));
                }
            }
        }
    }
    hits.sort_by(|l, r| l.0.total_cmp(&r.0));
    let mut out = Vec::with_capacity(hits.len());
    for (_, x) in hits {
        push_unique(&mut out, GeoPoint::from_xy(x), tol);
    }
    out
}

/// Distance from `x` to the ring and the position of the closest ring point,
/// as `edge index + parameter`.
fn ring_position(ring: &[Vector2<f64>], x: Vector2<f64>) -> (f64, f64) {
    let n = ring.len();
    let mut best = (f64::INFINITY, 0.0);
    for i in 0..n {
        let (a, b) = (ring[i], ring[(i + 1) % n]);
        let ab = b - a;
        let len2 = ab.norm_squared();
        let t = if len2 > 0.0 {
            ((x - a).dot(&ab) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let d = (a + ab * t - x).norm();
        if d < best.0 {
            best = (d, i as f64 + t);
        }
    }
    best
}

/// Up to 2 overlap vertices on a bounding-box extreme, then `retained`.
fn extremes(overlap: &Polygon, retained: &[GeoPoint], cfg: &IntersectCfg) -> Vec<GeoPoint> {
    let Some(bbox) = overlap.bounding_box() else {
        return Vec::new();
    };
    let tol = cfg.corner_tolerance;
    let mut found = Vec::new();
    for &p in overlap.vertices() {
        let on_extreme = (p.latitude - bbox.north).abs() <= tol
            || (p.latitude - bbox.south).abs() <= tol
            || (p.longitude - bbox.east).abs() <= tol
            || (p.longitude - bbox.west).abs() <= tol;
        if on_extreme {
            push_unique(&mut found, p, tol);
        }
    }
    if found.len() < 2 {
        tracing::debug!(found = found.len(), "too few extremes, using raw vertices");
        return overlap
            .vertices()
            .iter()
            .take(cfg.max_corners)
            .copied()
            .collect();
    }
    found.truncate(2.min(cfg.max_corners));
    let room = cfg.max_corners - found.len();
    found.extend(retained.iter().take(room).copied());
    found
}
