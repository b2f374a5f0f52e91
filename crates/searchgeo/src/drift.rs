//! Wind-drift projection of a falling object.
//!
//! Model
//! - Constant terminal velocity from release to ground:
//!   `fall_time = altitude_ft · 0.3048 / v_terminal`. No density variation.
//! - Wind is given relative to a reference track (aircraft heading): an
//!   along-track component pushing along the track and a cross-track component
//!   pushing perpendicular to it. Each blows for the whole fall.
//! - Drift metres are placed on the flat-earth grid of `units`, scaled at the
//!   release latitude.

use serde::{Deserialize, Serialize};

use crate::error::{GeoError, Result};
use crate::types::{Bearing, GeoPoint};
use crate::units::{feet_to_meters, meters_to_miles, mph_to_meters_per_second, offset};

/// Side of the track the crosswind blows FROM.
///
/// A crosswind from the left pushes the object toward `reference + 90°`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossTrackSide {
    Left,
    Right,
}

impl CrossTrackSide {
    /// Direction of the push relative to the reference bearing, in degrees.
    #[inline]
    fn push_offset_degrees(self) -> f64 {
        match self {
            CrossTrackSide::Left => 90.0,
            CrossTrackSide::Right => -90.0,
        }
    }
}

/// Wind decomposed against the reference track.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindVector {
    /// Positive = tailwind, negative = headwind.
    pub along_track_speed_mph: f64,
    pub cross_track_speed_mph: f64,
    pub cross_track_side: CrossTrackSide,
}

impl WindVector {
    pub const CALM: WindVector = WindVector {
        along_track_speed_mph: 0.0,
        cross_track_speed_mph: 0.0,
        cross_track_side: CrossTrackSide::Left,
    };
}

/// Release conditions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftScenario {
    pub release_point: GeoPoint,
    pub release_altitude_feet: f64,
    pub reference_bearing: Bearing,
    pub wind: WindVector,
    pub terminal_velocity_meters_per_second: f64,
}

/// Derived landing geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftProjection {
    pub landing_point: GeoPoint,
    pub fall_time_seconds: f64,
    pub along_track_drift_meters: f64,
    pub cross_track_drift_meters: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl DriftProjection {
    /// Ground distance between release and landing, in metres.
    pub fn drift_distance_meters(&self) -> f64 {
        self.along_track_drift_meters
            .hypot(self.cross_track_drift_meters)
    }
}

impl DriftScenario {
    /// Reject nonsensical physics with `InvalidScenario`.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.release_altitude_feet,
            self.terminal_velocity_meters_per_second,
            self.wind.along_track_speed_mph,
            self.wind.cross_track_speed_mph,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(GeoError::InvalidScenario("non-finite parameter".into()));
        }
        if self.terminal_velocity_meters_per_second <= 0.0 {
            return Err(GeoError::InvalidScenario(format!(
                "terminal velocity {} m/s must be positive",
                self.terminal_velocity_meters_per_second
            )));
        }
        if self.release_altitude_feet < 0.0 {
            return Err(GeoError::InvalidScenario(format!(
                "release altitude {} ft is negative",
                self.release_altitude_feet
            )));
        }
        Ok(())
    }

    /// Seconds from release to ground.
    pub fn fall_time_seconds(&self) -> Result<f64> {
        self.validate()?;
        Ok(feet_to_meters(self.release_altitude_feet) / self.terminal_velocity_meters_per_second)
    }
}

/// Full projection: landing point, fall time and drift components.
pub fn project(scenario: &DriftScenario) -> Result<DriftProjection> {
    let fall_time = scenario.fall_time_seconds()?;
    let wind = scenario.wind;
    let along_m = mph_to_meters_per_second(wind.along_track_speed_mph) * fall_time;
    let cross_m = mph_to_meters_per_second(wind.cross_track_speed_mph) * fall_time;

    let track = scenario.reference_bearing;
    let push = track.rotated(wind.cross_track_side.push_offset_degrees());
    let release = scenario.release_point;
    // each component placed from the release point, then summed
    let along_pt = offset(release, track.degrees(), meters_to_miles(along_m))?;
    let cross_pt = offset(release, push.degrees(), meters_to_miles(cross_m))?;
    let latitude_delta =
        (along_pt.latitude - release.latitude) + (cross_pt.latitude - release.latitude);
    let longitude_delta =
        (along_pt.longitude - release.longitude) + (cross_pt.longitude - release.longitude);
    let landing_point = GeoPoint::new(
        release.latitude + latitude_delta,
        release.longitude + longitude_delta,
    );
    tracing::debug!(
        fall_time,
        along_m,
        cross_m,
        lat = landing_point.latitude,
        lon = landing_point.longitude,
        "projected landing"
    );
    Ok(DriftProjection {
        landing_point,
        fall_time_seconds: fall_time,
        along_track_drift_meters: along_m,
        cross_track_drift_meters: cross_m,
        latitude_delta,
        longitude_delta,
    })
}

/// Landing point only.
pub fn project_landing(scenario: &DriftScenario) -> Result<GeoPoint> {
    project(scenario).map(|p| p.landing_point)
}
