//! Value types shared by all components.
//!
//! - `GeoPoint`: decimal-degree coordinate, serialised as `[latitude, longitude]`.
//! - `Bearing`: degrees clockwise from true north, normalised to `[0, 360)`.
//! - `Polygon`: ordered ring of points; planar operations treat longitude as x
//!   and latitude as y.
//! - `BoundingBox`: latitude/longitude extent, used for queries and corner tests.

mod bounding_box;
mod point;
mod polygon;

pub use bounding_box::BoundingBox;
pub use point::{Bearing, GeoPoint};
pub use polygon::Polygon;

/// Closing tolerance in degrees (first/last point equality, vertex dedup).
pub(crate) const CLOSE_EPS: f64 = 1e-9;
