//! Planar predicates on `(x, y) = (longitude, latitude)` vectors.
//!
//! Small, allocation-free helpers shared by polygon validation, corner
//! extraction and buffered containment.

use nalgebra::Vector2;

/// Determinant threshold below which two segments count as parallel.
const PARALLEL_EPS: f64 = 1e-15;

/// z-component of `(b - a) × (c - a)`; positive when `a → b → c` turns left.
#[inline]
pub(crate) fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

#[inline]
fn perp_dot(u: Vector2<f64>, v: Vector2<f64>) -> f64 {
    u.x * v.y - u.y * v.x
}

/// Crossing point of segments `[p0, p1]` and `[q0, q1]`, with their parameters.
///
/// Parameters are half-open: `t ∈ [0, 1)` on p and `u ∈ [0, 1)` on q, so a
/// vertex shared by consecutive edges is reported once. Parallel and collinear
/// segments never cross.
pub(crate) fn segment_crossing(
    p0: Vector2<f64>,
    p1: Vector2<f64>,
    q0: Vector2<f64>,
    q1: Vector2<f64>,
) -> Option<(Vector2<f64>, f64, f64)> {
    let r = p1 - p0;
    let s = q1 - q0;
    let denom = perp_dot(r, s);
    if denom.abs() <= PARALLEL_EPS * r.norm().max(1.0) * s.norm().max(1.0) {
        return None;
    }
    let qp = q0 - p0;
    let t = perp_dot(qp, s) / denom;
    let u = perp_dot(qp, r) / denom;
    if (0.0..1.0).contains(&t) && (0.0..1.0).contains(&u) {
        Some((p0 + r * t, t, u))
    } else {
        None
    }
}

/// True when the open segments cross at a single interior point.
pub(crate) fn segments_cross_properly(
    p0: Vector2<f64>,
    p1: Vector2<f64>,
    q0: Vector2<f64>,
    q1: Vector2<f64>,
    eps: f64,
) -> bool {
    let d1 = cross(q0, q1, p0);
    let d2 = cross(q0, q1, p1);
    let d3 = cross(p0, p1, q0);
    let d4 = cross(p0, p1, q1);
    ((d1 > eps && d2 < -eps) || (d1 < -eps && d2 > eps))
        && ((d3 > eps && d4 < -eps) || (d3 < -eps && d4 > eps))
}

/// Euclidean distance from `p` to the closed segment `[a, b]`.
pub(crate) fn point_segment_distance(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}
