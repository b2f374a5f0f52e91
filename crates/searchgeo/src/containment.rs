//! Point-in-polygon tests, plain and buffered.
//!
//! - `contains`: even-odd ray casting toward +∞ longitude. Points exactly on an
//!   edge may land on either side.
//! - `contains_with_buffer`: inside, or within the buffer of any edge. The
//!   buffer is a uniform distance in degrees (same on both axes), not a true
//!   ground-distance offset; fine while buffers are small next to the region.

use crate::planar::point_segment_distance;
use crate::types::{GeoPoint, Polygon};
use crate::units::miles_to_latitude_degrees;

/// Degrees of buffer per latitude-degree of `buffer_miles`.
///
/// Reproduces the legacy rule of 0.01° of buffer per kilometre
/// (0.01 × 1.609344 km/mi × 69 mi/°).
pub const BUFFER_SCALE: f64 = 1.110_447_36;

/// Even-odd ray casting. Polygons with fewer than 3 vertices contain nothing.
pub fn contains(point: GeoPoint, polygon: &Polygon) -> bool {
    let v = polygon.vertices();
    let n = v.len();
    if n < 3 {
        return false;
    }
    let (x, y) = (point.longitude, point.latitude);
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (v[i].longitude, v[i].latitude);
        let (xj, yj) = (v[j].longitude, v[j].latitude);
        if (yi > y) != (yj > y) {
            let x_cross = xi + (y - yi) * (xj - xi) / (yj - yi);
            if x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// `contains`, widened by `buffer_miles` around every edge.
///
/// A non-positive buffer is exactly `contains`.
pub fn contains_with_buffer(point: GeoPoint, polygon: &Polygon, buffer_miles: f64) -> bool {
    if contains(point, polygon) {
        return true;
    }
    if buffer_miles <= 0.0 || polygon.vertices().len() < 2 {
        return false;
    }
    let reach = miles_to_latitude_degrees(buffer_miles) * BUFFER_SCALE;
    let p = point.xy();
    polygon
        .edges()
        .any(|(a, b)| point_segment_distance(p, a.xy(), b.xy()) <= reach)
}

/// A map feature (single node or a way's nodes) lies in the region when any
/// of its points does.
pub fn any_contained(points: &[GeoPoint], polygon: &Polygon, buffer_miles: f64) -> bool {
    points
        .iter()
        .any(|&p| contains_with_buffer(p, polygon, buffer_miles))
}
