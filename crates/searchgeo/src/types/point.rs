use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::CLOSE_EPS;
use crate::error::{GeoError, Result};

/// Geographic coordinate in decimal degrees.
///
/// Serialises as `[latitude, longitude]`, the order the map renderer expects.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Construct without range checks.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Construct and check `latitude ∈ [-90, 90]`, `longitude ∈ [-180, 180]`.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let p = Self::new(latitude, longitude);
        if p.is_valid() {
            Ok(p)
        } else {
            Err(GeoError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Equality within `tol` degrees on both axes.
    #[inline]
    pub fn approx_eq(&self, other: &GeoPoint, tol: f64) -> bool {
        (self.latitude - other.latitude).abs() <= tol
            && (self.longitude - other.longitude).abs() <= tol
    }

    /// Same point up to the closing tolerance.
    #[inline]
    pub fn coincides(&self, other: &GeoPoint) -> bool {
        self.approx_eq(other, CLOSE_EPS)
    }

    /// Planar view: `x = longitude`, `y = latitude`.
    #[inline]
    pub(crate) fn xy(&self) -> Vector2<f64> {
        Vector2::new(self.longitude, self.latitude)
    }

    #[inline]
    pub(crate) fn from_xy(v: Vector2<f64>) -> Self {
        Self::new(v.y, v.x)
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(p: GeoPoint) -> Self {
        [p.latitude, p.longitude]
    }
}

/// Compass bearing in degrees clockwise from true north, always in `[0, 360)`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Bearing(f64);

impl Bearing {
    pub const NORTH: Bearing = Bearing(0.0);

    /// Normalise any finite angle in degrees into `[0, 360)`.
    pub fn from_degrees(deg: f64) -> Self {
        let mut d = deg.rem_euclid(360.0);
        // rem_euclid rounds tiny negatives up to exactly 360
        if d >= 360.0 {
            d = 0.0;
        }
        Bearing(d)
    }

    #[inline]
    pub fn from_radians(rad: f64) -> Self {
        Self::from_degrees(rad.to_degrees())
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Bearing rotated by `delta` degrees (positive = clockwise).
    #[inline]
    pub fn rotated(self, delta: f64) -> Self {
        Self::from_degrees(self.0 + delta)
    }

    #[inline]
    pub fn reversed(self) -> Self {
        self.rotated(180.0)
    }

    /// Smallest absolute angle between two bearings, in `[0, 180]`.
    pub fn difference(self, other: Bearing) -> f64 {
        let d = (self.0 - other.0).rem_euclid(360.0);
        d.min(360.0 - d)
    }
}

impl From<f64> for Bearing {
    fn from(deg: f64) -> Self {
        Self::from_degrees(deg)
    }
}

impl From<Bearing> for f64 {
    fn from(b: Bearing) -> Self {
        b.0
    }
}

impl std::fmt::Display for Bearing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}
