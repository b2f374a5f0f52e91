use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::{BoundingBox, GeoPoint, CLOSE_EPS};
use crate::error::{GeoError, Result};
use crate::planar::segments_cross_properly;
use crate::units::{miles_to_latitude_degrees, miles_to_longitude_degrees};

/// Ordered ring of points; insertion order is the boundary traversal order.
///
/// Invariants:
/// - No closure is enforced. A polygon is closed when its first and last
///   points coincide within `1e-9°`; a closed, non-degenerate polygon has at
///   least 4 points (3 distinct vertices plus the closing repeat).
/// - Planar operations treat longitude as x and latitude as y; there is no
///   antimeridian handling.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    points: Vec<GeoPoint>,
}

impl Polygon {
    #[inline]
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Polygon with no points (e.g. an empty overlap).
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    #[inline]
    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point equals last point within `1e-9°`.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() >= 2 => first.coincides(last),
            _ => false,
        }
    }

    /// Same ring with the closing point appended when missing.
    pub fn closed(mut self) -> Self {
        if !self.points.is_empty() && !self.is_closed() {
            let first = self.points[0];
            self.points.push(first);
        }
        self
    }

    /// Points without the closing repeat.
    pub fn vertices(&self) -> &[GeoPoint] {
        if self.is_closed() {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points
        }
    }

    /// Ring edges `(v_i, v_{i+1})`, wrapping from the last vertex to the first.
    pub fn edges(&self) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
        let v = self.vertices();
        let n = v.len();
        (0..n).map(move |i| (v[i], v[(i + 1) % n]))
    }

    /// Planar ring (x = lon, y = lat) with consecutive duplicates removed.
    pub(crate) fn ring_xy(&self) -> Vec<Vector2<f64>> {
        let mut ring: Vec<Vector2<f64>> = Vec::with_capacity(self.points.len());
        for p in self.vertices() {
            let v = p.xy();
            if ring.last().is_none_or(|last| (last - v).amax() > CLOSE_EPS) {
                ring.push(v);
            }
        }
        while ring.len() > 1 && (ring[0] - ring[ring.len() - 1]).amax() <= CLOSE_EPS {
            ring.pop();
        }
        ring
    }

    /// Check the ring is usable as an area: finite coordinates and at least
    /// 3 distinct vertices.
    pub fn check_ring(&self) -> Result<()> {
        if let Some(p) = self
            .points
            .iter()
            .find(|p| !p.latitude.is_finite() || !p.longitude.is_finite())
        {
            return Err(GeoError::MalformedPolygon(format!(
                "non-finite coordinate ({}, {})",
                p.latitude, p.longitude
            )));
        }
        let distinct = self.ring_xy().len();
        if distinct < 3 {
            return Err(GeoError::MalformedPolygon(format!(
                "need at least 3 distinct vertices, got {distinct}"
            )));
        }
        Ok(())
    }

    /// Shoelace area in square degrees; positive for counterclockwise rings
    /// in the (lon, lat) plane.
    pub fn signed_area_deg2(&self) -> f64 {
        let ring = self.ring_xy();
        let n = ring.len();
        if n < 3 {
            return 0.0;
        }
        let mut acc = 0.0;
        for i in 0..n {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            acc += a.x * b.y - b.x * a.y;
        }
        acc / 2.0
    }

    /// Unsigned area in square statute miles, scaled at the mean latitude of
    /// the bounding box.
    pub fn area_square_miles(&self) -> Result<f64> {
        let Some(bbox) = self.bounding_box() else {
            return Ok(0.0);
        };
        let lat_deg_per_mile = miles_to_latitude_degrees(1.0);
        let lon_deg_per_mile = miles_to_longitude_degrees(1.0, bbox.center().latitude)?;
        Ok(self.signed_area_deg2().abs() / (lat_deg_per_mile * lon_deg_per_mile))
    }

    /// Mean of the distinct vertices. For convex rings this lies inside.
    pub fn vertex_centroid(&self) -> Option<GeoPoint> {
        let ring = self.ring_xy();
        if ring.is_empty() {
            return None;
        }
        let sum = ring.iter().fold(Vector2::zeros(), |acc, v| acc + v);
        Some(GeoPoint::from_xy(sum / ring.len() as f64))
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.points)
    }

    /// No two non-adjacent edges cross (zero-length edges are ignored).
    pub fn is_simple(&self) -> bool {
        let ring = self.ring_xy();
        let n = ring.len();
        if n < 3 {
            return false;
        }
        for i in 0..n {
            let (a0, a1) = (ring[i], ring[(i + 1) % n]);
            for j in (i + 2)..n {
                // first and last edges share vertex 0
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (b0, b1) = (ring[j], ring[(j + 1) % n]);
                if segments_cross_properly(a0, a1, b0, b1, 0.0) {
                    return false;
                }
            }
        }
        true
    }

    /// Pointwise equality within `tol` degrees (same length, same order).
    pub fn approx_eq(&self, other: &Polygon, tol: f64) -> bool {
        self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| a.approx_eq(b, tol))
    }
}

impl From<Vec<GeoPoint>> for Polygon {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<GeoPoint> for Polygon {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
