use serde::{Deserialize, Serialize};

use super::GeoPoint;
use crate::units::miles_to_latitude_degrees;

/// Latitude/longitude extent in decimal degrees.
///
/// # Limitations
///
/// Plain min/max logic: a region crossing the antimeridian gets a box spanning
/// almost the whole globe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Box around a slice of points; `None` if the slice is empty.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let mut bbox = Self::from(first);
        for &p in rest {
            bbox.extend(p);
        }
        Some(bbox)
    }

    /// Grow to include `point`.
    pub fn extend(&mut self, point: GeoPoint) {
        self.south = self.south.min(point.latitude);
        self.north = self.north.max(point.latitude);
        self.west = self.west.min(point.longitude);
        self.east = self.east.max(point.longitude);
    }

    /// Grow to include `other`.
    pub fn merge(&mut self, other: BoundingBox) {
        self.south = self.south.min(other.south);
        self.north = self.north.max(other.north);
        self.west = self.west.min(other.west);
        self.east = self.east.max(other.east);
    }

    /// Box grown by `miles` on every side.
    ///
    /// Both axes use the latitude conversion, as the map-data queries always have.
    pub fn padded(&self, miles: f64) -> Self {
        let pad = miles_to_latitude_degrees(miles);
        Self {
            south: self.south - pad,
            west: self.west - pad,
            north: self.north + pad,
            east: self.east + pad,
        }
    }

    /// Closed-interval membership.
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.south..=self.north).contains(&point.latitude)
            && (self.west..=self.east).contains(&point.longitude)
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}

impl From<GeoPoint> for BoundingBox {
    fn from(p: GeoPoint) -> Self {
        Self {
            south: p.latitude,
            west: p.longitude,
            north: p.latitude,
            east: p.longitude,
        }
    }
}
