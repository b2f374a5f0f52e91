//! Initial great-circle bearing between two points.
//!
//! Standard spherical formula: `atan2(sin Δλ · cos φ2, cos φ1 · sin φ2 − sin φ1 · cos φ2 · cos Δλ)`,
//! converted to degrees and normalised to `[0, 360)`. Stability near the poles
//! and across the antimeridian is not guaranteed.

use crate::error::{GeoError, Result};
use crate::types::{Bearing, GeoPoint};

/// Initial bearing from `from` to `to`.
///
/// Fails with `DegenerateInput` when the points are identical.
pub fn bearing(from: GeoPoint, to: GeoPoint) -> Result<Bearing> {
    if from == to {
        return Err(GeoError::DegenerateInput);
    }
    let (lat1, lon1) = (from.latitude.to_radians(), from.longitude.to_radians());
    let (lat2, lon2) = (to.latitude.to_radians(), to.longitude.to_radians());
    let dlon = lon2 - lon1;
    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    Ok(Bearing::from_radians(y.atan2(x)))
}

/// Current heading of a flight track: bearing from the third-to-last point
/// (second-to-last for two-point tracks) to the last point.
pub fn trajectory_bearing(track: &[GeoPoint]) -> Result<Bearing> {
    match track {
        [] | [_] => Err(GeoError::DegenerateInput),
        [a, b] => bearing(*a, *b),
        [.., a, _, b] => bearing(*a, *b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const NEW_HOPE: GeoPoint = GeoPoint::new(40.364551, -74.950404);
    const NEW_HOPE_DIR: GeoPoint = GeoPoint::new(40.365207, -74.947155);

    #[test]
    fn identical_points_are_degenerate() {
        assert_eq!(bearing(NEW_HOPE, NEW_HOPE), Err(GeoError::DegenerateInput));
    }

    #[test]
    fn cardinal_bearings() {
        let o = GeoPoint::new(0.0, 0.0);
        let north = bearing(o, GeoPoint::new(1.0, 0.0)).unwrap();
        let east = bearing(o, GeoPoint::new(0.0, 1.0)).unwrap();
        let south = bearing(o, GeoPoint::new(-1.0, 0.0)).unwrap();
        let west = bearing(o, GeoPoint::new(0.0, -1.0)).unwrap();
        assert!(north.degrees().abs() < 1e-12);
        assert!((east.degrees() - 90.0).abs() < 1e-12);
        assert!((south.degrees() - 180.0).abs() < 1e-12);
        assert!((west.degrees() - 270.0).abs() < 1e-12);
    }

    #[test]
    fn new_hope_direction_is_east_northeast() {
        let b = bearing(NEW_HOPE, NEW_HOPE_DIR).unwrap().degrees();
        // ~75° on the sphere for this short baseline
        assert!(b > 70.0 && b < 80.0, "bearing {b}");
    }

    #[test]
    fn reverse_bearing_differs_by_180() {
        // exact along a meridian and along the equator
        let a = GeoPoint::new(40.0, -74.0);
        let b = GeoPoint::new(40.3, -74.0);
        let fwd = bearing(a, b).unwrap();
        let back = bearing(b, a).unwrap();
        assert!(fwd.reversed().difference(back) < 1e-6);
        let e1 = GeoPoint::new(0.0, 10.0);
        let e2 = GeoPoint::new(0.0, 10.5);
        let fwd = bearing(e1, e2).unwrap();
        let back = bearing(e2, e1).unwrap();
        assert!(fwd.reversed().difference(back) < 1e-6);

        // elsewhere off by the meridian convergence, about Δλ·sin φ
        let fwd = bearing(NEW_HOPE, NEW_HOPE_DIR).unwrap();
        let back = bearing(NEW_HOPE_DIR, NEW_HOPE).unwrap();
        let convergence = (NEW_HOPE_DIR.longitude - NEW_HOPE.longitude).abs()
            * NEW_HOPE.latitude.to_radians().sin();
        assert!((fwd.reversed().difference(back) - convergence).abs() < 1e-5);
    }

    #[test]
    fn trajectory_uses_third_to_last_point() {
        let track = [
            GeoPoint::new(41.215671, -74.906966),
            GeoPoint::new(41.256498, -74.750476),
            GeoPoint::new(41.320632, -74.707031),
            GeoPoint::new(41.455211, -74.507323),
        ];
        let got = trajectory_bearing(&track).unwrap();
        let want = bearing(track[1], track[3]).unwrap();
        assert_eq!(got, want);
        let two = trajectory_bearing(&track[..2]).unwrap();
        assert_eq!(two, bearing(track[0], track[1]).unwrap());
        assert!(trajectory_bearing(&track[..1]).is_err());
    }

    proptest! {
        #[test]
        fn reverse_along_meridian_is_exact(
            lat in -80.0f64..80.0,
            lon in -180.0f64..180.0,
            dlat in 0.001f64..5.0,
        ) {
            let a = GeoPoint::new(lat, lon);
            let b = GeoPoint::new(lat + dlat, lon);
            let fwd = bearing(a, b).unwrap();
            let back = bearing(b, a).unwrap();
            prop_assert!(fwd.reversed().difference(back) < 1e-6);
        }

        #[test]
        fn reverse_elsewhere_differs_by_convergence(
            lat in -60.0f64..60.0,
            lon in -170.0f64..170.0,
            dlat in -0.5f64..0.5,
            dlon in 0.001f64..0.5,
        ) {
            let a = GeoPoint::new(lat, lon);
            let b = GeoPoint::new(lat + dlat, lon + dlon);
            let fwd = bearing(a, b).unwrap();
            let back = bearing(b, a).unwrap();
            let mid = (a.latitude + b.latitude) / 2.0;
            let convergence = dlon * mid.to_radians().sin().abs();
            prop_assert!((fwd.reversed().difference(back) - convergence).abs() < 1e-5);
        }
    }
}
