//! Flat-earth distance/angle conversions.
//!
//! Purpose
//! - Single source of truth for turning miles into degrees of latitude and
//!   longitude. Sector arcs, drift offsets, buffers and bounding-box padding all
//!   go through these functions.
//!
//! Model
//! - One degree of latitude is 69 statute miles everywhere. Longitude degrees
//!   shrink with `cos(latitude)`. Valid over tens of miles at mid latitudes;
//!   outputs of existing search maps were produced with exactly this constant,
//!   so it must not be replaced with an ellipsoidal value.

use crate::error::{GeoError, Result};
use crate::types::GeoPoint;

/// Statute miles per degree of latitude.
const MILES_PER_DEGREE_LATITUDE: f64 = 69.0;

/// Latitudes closer than this to ±90° have no usable longitude scale.
const POLE_EPS: f64 = 1e-6;

pub const FEET_TO_METERS: f64 = 0.3048;
pub const MPH_TO_METERS_PER_SECOND: f64 = 0.44704;
pub const METERS_PER_MILE: f64 = 1609.344;

/// Degrees of latitude spanned by `miles`.
#[inline]
pub fn miles_to_latitude_degrees(miles: f64) -> f64 {
    miles / MILES_PER_DEGREE_LATITUDE
}

/// Degrees of longitude spanned by `miles` at latitude `at_latitude` (degrees).
///
/// Fails with `Singularity` within `1e-6°` of either pole.
pub fn miles_to_longitude_degrees(miles: f64, at_latitude: f64) -> Result<f64> {
    if (at_latitude.abs() - 90.0).abs() <= POLE_EPS {
        return Err(GeoError::Singularity {
            latitude: at_latitude,
        });
    }
    Ok(miles_to_latitude_degrees(miles) / at_latitude.to_radians().cos())
}

#[inline]
pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

#[inline]
pub fn feet_to_meters(feet: f64) -> f64 {
    feet * FEET_TO_METERS
}

#[inline]
pub fn mph_to_meters_per_second(mph: f64) -> f64 {
    mph * MPH_TO_METERS_PER_SECOND
}

/// Point `miles` away from `origin` along `bearing_deg`, on the flat-earth grid.
///
/// Longitude scaling uses `origin.latitude`; it is not re-derived at the
/// destination.
pub fn offset(origin: GeoPoint, bearing_deg: f64, miles: f64) -> Result<GeoPoint> {
    let b = bearing_deg.to_radians();
    let dlat = miles_to_latitude_degrees(miles) * b.cos();
    let dlon = miles_to_longitude_degrees(miles, origin.latitude)? * b.sin();
    Ok(GeoPoint::new(origin.latitude + dlat, origin.longitude + dlon))
}
