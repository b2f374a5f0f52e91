//! Annular sector ("washer slice") polygons.
//!
//! Purpose
//! - Turn a center point, a direction point, an angular width and an inner/outer
//!   radius into the closed polygon drawn as a search area.
//!
//! Construction
//! - Center bearing = bearing(center → direction point) + rotation (degrees).
//! - Left/right bearings = center ∓ width/2.
//! - `arc_resolution` points along the inner radius from left to right, then
//!   `arc_resolution` points along the outer radius from right back to left,
//!   then one point closing onto the first inner point. Walking the arcs in
//!   opposite directions keeps the ring simple; the center is never part of a
//!   washer ring.
//! - Every point is placed with `units::offset` from the center, so longitude
//!   scaling uses the center latitude throughout.
//! - `min_radius_miles == 0` collapses the inner arc onto the center (repeated
//!   points), giving a filled pie slice.

use serde::{Deserialize, Serialize};

use crate::bearing::bearing;
use crate::error::{GeoError, Result};
use crate::types::{Bearing, BoundingBox, GeoPoint, Polygon};
use crate::units::offset;

/// Points per arc used by the original search maps (20 segments).
pub const DEFAULT_ARC_RESOLUTION: usize = 21;

/// Parameters of one annular sector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorSpec {
    pub center: GeoPoint,
    /// Only used to derive the center bearing; never part of the polygon.
    pub direction_point: GeoPoint,
    /// Total angular width, split evenly on both sides; `0 < w < 360`.
    pub width_degrees: f64,
    pub min_radius_miles: f64,
    pub max_radius_miles: f64,
    /// Extra rotation about the center, positive = clockwise.
    #[serde(default)]
    pub rotation_degrees: f64,
    /// Points per arc, at least 2.
    #[serde(default = "default_arc_resolution")]
    pub arc_resolution: usize,
}

fn default_arc_resolution() -> usize {
    DEFAULT_ARC_RESOLUTION
}

/// The three bearings that bound a sector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectorBearings {
    pub center: Bearing,
    pub left: Bearing,
    pub right: Bearing,
}

/// Rays from the sector center to the outer radius, as drawn on the maps.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLines {
    pub center: [GeoPoint; 2],
    pub left: [GeoPoint; 2],
    pub right: [GeoPoint; 2],
}

impl SectorSpec {
    /// Sector with no rotation and the default arc resolution.
    pub fn new(
        center: GeoPoint,
        direction_point: GeoPoint,
        width_degrees: f64,
        min_radius_miles: f64,
        max_radius_miles: f64,
    ) -> Self {
        Self {
            center,
            direction_point,
            width_degrees,
            min_radius_miles,
            max_radius_miles,
            rotation_degrees: 0.0,
            arc_resolution: DEFAULT_ARC_RESOLUTION,
        }
    }

    pub fn with_rotation(mut self, rotation_degrees: f64) -> Self {
        self.rotation_degrees = rotation_degrees;
        self
    }

    pub fn with_arc_resolution(mut self, arc_resolution: usize) -> Self {
        self.arc_resolution = arc_resolution;
        self
    }

    /// Reject nonsensical geometry with `InvalidSector`.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.width_degrees,
            self.min_radius_miles,
            self.max_radius_miles,
            self.rotation_degrees,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(GeoError::InvalidSector("non-finite parameter".into()));
        }
        if self.width_degrees <= 0.0 || self.width_degrees >= 360.0 {
            return Err(GeoError::InvalidSector(format!(
                "width {}° outside (0, 360)",
                self.width_degrees
            )));
        }
        if self.min_radius_miles < 0.0 {
            return Err(GeoError::InvalidSector(format!(
                "negative inner radius {}",
                self.min_radius_miles
            )));
        }
        if self.max_radius_miles <= self.min_radius_miles {
            return Err(GeoError::InvalidSector(format!(
                "outer radius {} not greater than inner radius {}",
                self.max_radius_miles, self.min_radius_miles
            )));
        }
        if self.arc_resolution < 2 {
            return Err(GeoError::InvalidSector(format!(
                "arc resolution {} below 2",
                self.arc_resolution
            )));
        }
        // a single chord cannot follow an arc of half a turn or more
        if self.arc_resolution == 2 && self.width_degrees >= 180.0 {
            return Err(GeoError::InvalidSector(format!(
                "arc resolution 2 cannot span {}°, need at least 3",
                self.width_degrees
            )));
        }
        Ok(())
    }

    /// Center, left and right bearings (rotation applied).
    pub fn bearings(&self) -> Result<SectorBearings> {
        let center = bearing(self.center, self.direction_point)?.rotated(self.rotation_degrees);
        let half = self.width_degrees / 2.0;
        Ok(SectorBearings {
            center,
            left: center.rotated(-half),
            right: center.rotated(half),
        })
    }

    /// Center/left/right rays out to the outer radius.
    pub fn reference_lines(&self) -> Result<ReferenceLines> {
        self.validate()?;
        let b = self.bearings()?;
        let ray = |br: Bearing| -> Result<[GeoPoint; 2]> {
            Ok([
                self.center,
                offset(self.center, br.degrees(), self.max_radius_miles)?,
            ])
        };
        Ok(ReferenceLines {
            center: ray(b.center)?,
            left: ray(b.left)?,
            right: ray(b.right)?,
        })
    }
}

/// Closed polygon approximating the sector.
///
/// Output has `2 * arc_resolution + 1` points; the last equals the first.
pub fn build_sector_polygon(spec: &SectorSpec) -> Result<Polygon> {
    spec.validate()?;
    let center = bearing(spec.center, spec.direction_point)?
        .rotated(spec.rotation_degrees)
        .degrees();
    // unnormalised on purpose: interpolation must not wrap through 0°
    let left = center - spec.width_degrees / 2.0;
    let right = center + spec.width_degrees / 2.0;
    let n = spec.arc_resolution;
    let step = (right - left) / (n - 1) as f64;
    tracing::trace!(center, left, right, n, "sector bearings");

    let mut points = Vec::with_capacity(2 * n + 1);
    for i in 0..n {
        let b = left + step * i as f64;
        points.push(offset(spec.center, b, spec.min_radius_miles)?);
    }
    for i in 0..n {
        let b = right - step * i as f64;
        points.push(offset(spec.center, b, spec.max_radius_miles)?);
    }
    points.push(points[0]);
    Ok(Polygon::new(points))
}

/// Query box covering the center and direction points of every sector, grown
/// by `padding_miles`. `None` for an empty slice.
pub fn bounds_for_sectors(specs: &[SectorSpec], padding_miles: f64) -> Option<BoundingBox> {
    let points: Vec<GeoPoint> = specs
        .iter()
        .flat_map(|s| [s.center, s.direction_point])
        .collect();
    BoundingBox::from_points(&points).map(|b| b.padded(padding_miles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{miles_to_latitude_degrees, miles_to_longitude_degrees};
    use proptest::prelude::*;

    fn new_hope() -> SectorSpec {
        SectorSpec::new(
            GeoPoint::new(40.364551, -74.950404),
            GeoPoint::new(40.365207, -74.947155),
            30.0,
            10.0,
            25.0,
        )
    }

    /// Flat-earth distance in miles, using the same scaling as the generator.
    fn flat_miles(c: GeoPoint, p: GeoPoint) -> f64 {
        let dlat = (p.latitude - c.latitude) / miles_to_latitude_degrees(1.0);
        let dlon = (p.longitude - c.longitude) / miles_to_longitude_degrees(1.0, c.latitude).unwrap();
        (dlat * dlat + dlon * dlon).sqrt()
    }

    fn flat_bearing(c: GeoPoint, p: GeoPoint) -> Bearing {
        let dlat = (p.latitude - c.latitude) / miles_to_latitude_degrees(1.0);
        let dlon = (p.longitude - c.longitude) / miles_to_longitude_degrees(1.0, c.latitude).unwrap();
        Bearing::from_radians(dlon.atan2(dlat))
    }

    #[test]
    fn new_hope_first_inner_point() {
        let spec = new_hope();
        let poly = build_sector_polygon(&spec).unwrap();
        assert_eq!(poly.len(), 2 * DEFAULT_ARC_RESOLUTION + 1);
        assert!(poly.is_closed());

        let first = poly.points()[0];
        let b = spec.bearings().unwrap();
        let expected = b.center.rotated(-15.0);
        assert!(flat_bearing(spec.center, first).difference(expected) < 1e-9);
        assert!((flat_miles(spec.center, first) - 10.0).abs() < 1e-9);
        assert!((miles_to_latitude_degrees(10.0) - 0.144_927).abs() < 1e-6);

        // first outer point sits on the right bearing at 25 miles
        let outer = poly.points()[DEFAULT_ARC_RESOLUTION];
        assert!(flat_bearing(spec.center, outer).difference(b.right) < 1e-9);
        assert!((flat_miles(spec.center, outer) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn washer_ring_is_simple_and_excludes_center() {
        let poly = build_sector_polygon(&new_hope()).unwrap();
        assert!(poly.is_simple());
        assert!(poly
            .points()
            .iter()
            .all(|p| !p.approx_eq(&new_hope().center, 1e-6)));
    }

    #[test]
    fn zero_inner_radius_gives_pie_slice() {
        let mut spec = new_hope();
        spec.min_radius_miles = 0.0;
        let poly = build_sector_polygon(&spec).unwrap();
        for p in &poly.points()[..spec.arc_resolution] {
            assert!(p.approx_eq(&spec.center, 1e-12));
        }
        assert!(poly.is_simple());
        assert!(poly.check_ring().is_ok());
    }

    #[test]
    fn invalid_specs_rejected() {
        let bad = |f: fn(&mut SectorSpec)| {
            let mut s = new_hope();
            f(&mut s);
            matches!(build_sector_polygon(&s), Err(GeoError::InvalidSector(_)))
        };
        assert!(bad(|s| s.width_degrees = 0.0));
        assert!(bad(|s| s.width_degrees = -5.0));
        assert!(bad(|s| s.width_degrees = 360.0));
        assert!(bad(|s| s.max_radius_miles = s.min_radius_miles));
        assert!(bad(|s| s.min_radius_miles = -1.0));
        assert!(bad(|s| s.arc_resolution = 1));
        assert!(bad(|s| {
            s.arc_resolution = 2;
            s.width_degrees = 180.0;
        }));
        assert!(bad(|s| {
            s.arc_resolution = 2;
            s.width_degrees = 270.0;
        }));
        assert!(bad(|s| s.rotation_degrees = f64::NAN));
    }

    #[test]
    fn half_turn_needs_three_points_per_arc() {
        for dir in [0.0, 45.0, 90.0, 200.0, 315.0] {
            let center = GeoPoint::new(40.0, -74.0);
            let direction = offset(center, dir, 1.0).unwrap();
            for min_r in [0.0, 2.0, 4.999] {
                let spec = SectorSpec::new(center, direction, 180.0, min_r, 5.0);
                let poly = build_sector_polygon(&spec.clone().with_arc_resolution(3)).unwrap();
                assert!(poly.is_simple(), "dir {dir} min_r {min_r}");
                assert!(poly.area_square_miles().unwrap() > 0.0);
                assert!(build_sector_polygon(&spec.with_arc_resolution(2)).is_err());
            }
        }
        // just under half a turn a single chord is still fine
        let spec = new_hope().with_arc_resolution(2);
        assert!(build_sector_polygon(&SectorSpec { width_degrees: 170.0, ..spec })
            .unwrap()
            .is_simple());
    }

    #[test]
    fn identical_center_and_direction_is_degenerate() {
        let mut s = new_hope();
        s.direction_point = s.center;
        assert_eq!(build_sector_polygon(&s), Err(GeoError::DegenerateInput));
    }

    #[test]
    fn full_turn_rotation_reproduces_polygon() {
        let base = build_sector_polygon(&new_hope()).unwrap();
        let turned = build_sector_polygon(&new_hope().with_rotation(360.0)).unwrap();
        assert!(base.approx_eq(&turned, 1e-9));
    }

    #[test]
    fn rotation_is_clockwise() {
        let spec = new_hope();
        let b0 = spec.bearings().unwrap().center;
        let b1 = spec.clone().with_rotation(10.0).bearings().unwrap().center;
        assert!((b1.degrees() - b0.degrees() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn reference_lines_end_on_outer_radius() {
        let spec = new_hope();
        let lines = spec.reference_lines().unwrap();
        for line in [lines.center, lines.left, lines.right] {
            assert_eq!(line[0], spec.center);
            assert!((flat_miles(spec.center, line[1]) - 25.0).abs() < 1e-9);
        }
        let poly = build_sector_polygon(&spec).unwrap();
        // left ray ends on the last outer point, right ray on the first
        assert!(lines.left[1].approx_eq(&poly.points()[2 * spec.arc_resolution - 1], 1e-12));
        assert!(lines.right[1].approx_eq(&poly.points()[spec.arc_resolution], 1e-12));
    }

    #[test]
    fn bounds_cover_centers_and_directions() {
        let a = new_hope();
        let b = SectorSpec::new(
            GeoPoint::new(40.44766, -74.530389),
            GeoPoint::new(40.533969, -74.600451),
            20.0,
            4.0,
            7.0,
        );
        let bbox = bounds_for_sectors(&[a, b], 5.0).unwrap();
        let pad = miles_to_latitude_degrees(5.0);
        assert!((bbox.south - (40.364551 - pad)).abs() < 1e-12);
        assert!((bbox.north - (40.533969 + pad)).abs() < 1e-12);
        assert!((bbox.west - (-74.950404 - pad)).abs() < 1e-12);
        assert!((bbox.east - (-74.530389 + pad)).abs() < 1e-12);
        assert!(bounds_for_sectors(&[], 5.0).is_none());
    }

    #[test]
    fn spec_deserialises_with_defaults() {
        let json = r#"{
            "center": [40.364551, -74.950404],
            "directionPoint": [40.365207, -74.947155],
            "widthDegrees": 30,
            "minRadiusMiles": 10,
            "maxRadiusMiles": 25
        }"#;
        let spec: SectorSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec, new_hope());
    }

    proptest! {
        #[test]
        fn valid_sectors_are_closed_and_simple(
            lat in -60.0f64..60.0,
            lon in -170.0f64..170.0,
            dir in 0.0f64..360.0,
            width in 1.0f64..350.0,
            min_r in 0.0f64..30.0,
            extra in 0.5f64..40.0,
            rotation in -720.0f64..720.0,
            n in 2usize..40,
        ) {
            let center = GeoPoint::new(lat, lon);
            let direction = offset(center, dir, 1.0).unwrap();
            prop_assume!(n > 2 || width < 180.0);
            let spec = SectorSpec::new(center, direction, width, min_r, min_r + extra)
                .with_rotation(rotation)
                .with_arc_resolution(n);
            let poly = build_sector_polygon(&spec).unwrap();
            prop_assert!(poly.is_closed());
            prop_assert_eq!(poly.len(), 2 * n + 1);
            prop_assert!(poly.is_simple());
        }

        #[test]
        fn full_turn_round_trip(dir in 0.0f64..360.0, width in 1.0f64..359.0) {
            let center = GeoPoint::new(40.0, -74.0);
            let direction = offset(center, dir, 1.0).unwrap();
            let spec = SectorSpec::new(center, direction, width, 2.0, 9.0);
            let a = build_sector_polygon(&spec).unwrap();
            let b = build_sector_polygon(&spec.clone().with_rotation(360.0)).unwrap();
            prop_assert!(a.approx_eq(&b, 1e-9));
        }
    }
}
