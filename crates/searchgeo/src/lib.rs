//! Search-region geometry for ground searches.
//!
//! Sector ("washer slice") construction, planar polygon intersection with
//! cut-corner extraction, buffered point-in-polygon tests and wind-drift
//! landing projection, all on a flat-earth grid (69 statute miles per degree
//! of latitude) valid over tens of miles.
//!
//! Layout
//! - `units`, `bearing`: conversions and the great-circle initial bearing.
//! - `sector`: `SectorSpec` → closed `Polygon`.
//! - `intersect`: `Polygon × Polygon` → `IntersectionResult`.
//! - `containment`: point-in-polygon, optionally buffered.
//! - `drift`: `DriftScenario` → landing point.
//!
//! API Policy
//! - Callers (map rendering, map-data queries) only consume coordinate lists;
//!   nothing in here performs I/O.

pub mod bearing;
pub mod containment;
pub mod drift;
pub mod error;
pub mod intersect;
mod planar;
pub mod sector;
pub mod types;
pub mod units;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{GeoError, Result};
pub use types::{Bearing, BoundingBox, GeoPoint, Polygon};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::bearing::{bearing, trajectory_bearing};
    pub use crate::containment::{any_contained, contains, contains_with_buffer};
    pub use crate::drift::{
        project, project_landing, CrossTrackSide, DriftProjection, DriftScenario, WindVector,
    };
    pub use crate::error::{GeoError, Result};
    pub use crate::intersect::{
        intersect, intersect_with, CornerStrategy, IntersectCfg, IntersectionResult,
    };
    pub use crate::sector::{bounds_for_sectors, build_sector_polygon, SectorSpec};
    pub use crate::types::{Bearing, BoundingBox, GeoPoint, Polygon};
    pub use crate::units::{miles_to_latitude_degrees, miles_to_longitude_degrees, offset};
}
