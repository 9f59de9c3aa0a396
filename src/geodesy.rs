//! Spherical-Earth navigation primitives
//!
//! All angles are in degrees, all distances in nautical miles unless the name
//! says otherwise. Bearings and headings returned from this module are
//! normalized to [0, 360). Magnetic variation is east-positive, so
//! `magnetic = true - variation`.
//!
//! The approach geometry is expressed relative to a runway threshold and the
//! true course of its extended centerline (the landing direction). An aircraft
//! on approach sits on the reciprocal side of that course.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in nautical miles
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// International nautical mile in feet
pub const FEET_PER_NM: f64 = 6076.12;

pub const EARTH_RADIUS_FEET: f64 = EARTH_RADIUS_NM * FEET_PER_NM;

/// Half-width of the localizer course used by [`is_on_localizer`]
pub const LOCALIZER_HALF_WIDTH_DEG: f64 = 2.0;

/// Below this lateral offset the aircraft is treated as already on the centerline
const ON_TRACK_TOLERANCE_FT: f64 = 300.0;

/// Below this distance from the threshold the approach-side test is unreliable
const MIN_SIDE_DETERMINATION_NM: f64 = 0.1;

/// Intercept angles offered by [`three_intercept_headings`]
pub const DIRECT_INTERCEPT_ANGLE_DEG: f64 = 60.0;
pub const MEDIUM_INTERCEPT_ANGLE_DEG: f64 = 45.0;
pub const SHALLOW_INTERCEPT_ANGLE_DEG: f64 = 30.0;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another point in nautical miles
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    /// Initial true bearing to another point
    pub fn bearing_to(&self, other: &GeoPoint) -> f64 {
        bearing(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    /// Point reached by travelling `distance_nm` along the great circle
    /// starting on `true_bearing`. Negative distances travel backwards.
    pub fn destination(&self, true_bearing: f64, distance_nm: f64) -> GeoPoint {
        let (latitude, longitude) =
            destination_point(self.latitude, self.longitude, true_bearing, distance_nm);
        GeoPoint {
            latitude,
            longitude,
        }
    }
}

/// Normalize any angle into [0, 360)
pub fn normalize_heading(heading: f64) -> f64 {
    let normalized = heading.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Normalize an angular difference into (-180, 180]
pub fn signed_heading_delta(delta: f64) -> f64 {
    let normalized = normalize_heading(delta);
    if normalized > 180.0 {
        normalized - 360.0
    } else {
        normalized
    }
}

pub fn reciprocal_heading(heading: f64) -> f64 {
    normalize_heading(heading + 180.0)
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}

/// Initial true bearing along the great circle from point 1 to point 2
pub fn bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let y = delta_lon.sin() * lat2_rad.cos();
    let x = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * delta_lon.cos();

    normalize_heading(y.atan2(x).to_degrees())
}

/// Magnetic bearing from point 1 to point 2 given an east-positive variation
pub fn magnetic_bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64, variation: f64) -> f64 {
    normalize_heading(bearing(lat1, lon1, lat2, lon2) - variation)
}

/// Great-circle distance in nautical miles (haversine)
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * clamp_unit(a.sqrt()).asin();

    EARTH_RADIUS_NM * c
}

/// Destination reached from a start point on an initial true bearing.
/// Longitude of the result is wrapped into [-180, 180).
pub fn destination_point(lat: f64, lon: f64, true_bearing: f64, distance_nm: f64) -> (f64, f64) {
    let angular = distance_nm / EARTH_RADIUS_NM;
    let theta = true_bearing.to_radians();
    let lat1 = lat.to_radians();
    let lon1 = lon.to_radians();

    let lat2 =
        clamp_unit(lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * theta.cos()).asin();
    let lon2 = lon1
        + (theta.sin() * angular.sin() * lat1.cos()).atan2(angular.cos() - lat1.sin() * lat2.sin());

    let lon2_deg = (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    (lat2.to_degrees(), lon2_deg)
}

/// Decomposition of the threshold -> aircraft arc relative to the centerline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackOffsets {
    /// Signed distance along the centerline course from the threshold, positive
    /// in the landing direction (i.e. negative while on approach)
    pub along_track_nm: f64,
    /// Signed perpendicular distance, positive to the right of the course
    pub cross_track_nm: f64,
}

/// Split the great-circle arc threshold -> aircraft into along-track and
/// cross-track components of the right spherical triangle whose hypotenuse
/// is that arc.
pub fn track_offsets(
    aircraft: GeoPoint,
    threshold: GeoPoint,
    centerline_heading: f64,
) -> TrackOffsets {
    let angular_distance = threshold.distance_to(&aircraft) / EARTH_RADIUS_NM;
    let bearing_to_aircraft = threshold.bearing_to(&aircraft).to_radians();
    let course = centerline_heading.to_radians();
    let relative = bearing_to_aircraft - course;

    let cross_track = clamp_unit(angular_distance.sin() * relative.sin()).asin();
    // Napier: tan(along) = tan(hypotenuse) * cos(relative)
    let along_track = (angular_distance.sin() * relative.cos()).atan2(angular_distance.cos());

    TrackOffsets {
        along_track_nm: along_track * EARTH_RADIUS_NM,
        cross_track_nm: cross_track * EARTH_RADIUS_NM,
    }
}

/// Point on the infinite extended centerline closest to the aircraft
pub fn perpendicular_intercept_point(
    aircraft: GeoPoint,
    threshold: GeoPoint,
    centerline_heading: f64,
) -> GeoPoint {
    let offsets = track_offsets(aircraft, threshold, centerline_heading);
    threshold.destination(centerline_heading, offsets.along_track_nm)
}

/// Lateral offset of the aircraft from the extended centerline, nautical miles
pub fn distance_to_localizer(
    aircraft: GeoPoint,
    threshold: GeoPoint,
    centerline_heading: f64,
) -> f64 {
    let intercept = perpendicular_intercept_point(aircraft, threshold, centerline_heading);
    aircraft.distance_to(&intercept)
}

/// Signed distance from the threshold to the aircraft's projection on the
/// centerline. Positive on the approach side, negative once past the threshold.
pub fn along_track_distance(
    aircraft: GeoPoint,
    threshold: GeoPoint,
    centerline_heading: f64,
) -> f64 {
    -track_offsets(aircraft, threshold, centerline_heading).along_track_nm
}

/// Angular localizer deviation in (-180, 180]: the bearing from the threshold
/// to the aircraft compared with the approach course. Positive when the
/// aircraft is left of the centerline as seen by a pilot on approach.
///
/// This is an angular approximation; lateral classification uses
/// [`distance_to_localizer`] instead.
pub fn cross_track_error_degrees(
    aircraft: GeoPoint,
    threshold: GeoPoint,
    centerline_heading: f64,
) -> f64 {
    let bearing_from_threshold = threshold.bearing_to(&aircraft);
    signed_heading_delta(bearing_from_threshold - reciprocal_heading(centerline_heading))
}

/// Point `distance_ft` from the threshold along `runway_true_heading`
pub fn touchdown_aim_point(
    threshold: GeoPoint,
    runway_true_heading: f64,
    distance_ft: f64,
) -> GeoPoint {
    threshold.destination(runway_true_heading, distance_ft / FEET_PER_NM)
}

fn is_on_track(offset_nm: f64) -> bool {
    offset_nm * FEET_PER_NM < ON_TRACK_TOLERANCE_FT
}

/// Magnetic heading that closes directly on the aircraft's perpendicular
/// intercept point. Returns the magnetic centerline course once on track.
pub fn intercept_heading(
    aircraft: GeoPoint,
    threshold: GeoPoint,
    centerline_heading: f64,
    variation: f64,
) -> f64 {
    let intercept = perpendicular_intercept_point(aircraft, threshold, centerline_heading);
    if is_on_track(aircraft.distance_to(&intercept)) {
        return normalize_heading(centerline_heading - variation);
    }
    normalize_heading(aircraft.bearing_to(&intercept) - variation)
}

/// Magnetic heading that joins the centerline at roughly `target_angle_deg`.
///
/// The aim point sits `offset / tan(angle)` beyond the perpendicular intercept
/// point in the landing direction.
pub fn angled_intercept_heading(
    aircraft: GeoPoint,
    threshold: GeoPoint,
    centerline_heading: f64,
    target_angle_deg: f64,
    variation: f64,
) -> f64 {
    let intercept = perpendicular_intercept_point(aircraft, threshold, centerline_heading);
    let offset_nm = aircraft.distance_to(&intercept);
    if is_on_track(offset_nm) {
        return normalize_heading(centerline_heading - variation);
    }

    let angle = target_angle_deg.clamp(1.0, 90.0).to_radians();
    let lead_nm = offset_nm / angle.tan();
    let aim = intercept.destination(centerline_heading, lead_nm);

    normalize_heading(aircraft.bearing_to(&aim) - variation)
}

/// Direct / medium / shallow intercept options, magnetic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterceptHeadings {
    pub direct: f64,
    pub medium: f64,
    pub shallow: f64,
}

pub fn three_intercept_headings(
    aircraft: GeoPoint,
    threshold: GeoPoint,
    centerline_heading: f64,
    variation: f64,
) -> InterceptHeadings {
    let at = |angle| {
        angled_intercept_heading(aircraft, threshold, centerline_heading, angle, variation)
    };
    InterceptHeadings {
        direct: at(DIRECT_INTERCEPT_ANGLE_DEG),
        medium: at(MEDIUM_INTERCEPT_ANGLE_DEG),
        shallow: at(SHALLOW_INTERCEPT_ANGLE_DEG),
    }
}

/// True when the aircraft is on the approach side of the threshold, i.e. the
/// bearing from the threshold to the aircraft points more than 90 degrees away
/// from the landing direction. Always false within 0.1 NM of the threshold.
pub fn is_approaching_from_behind(
    aircraft: GeoPoint,
    threshold: GeoPoint,
    centerline_heading: f64,
) -> bool {
    if threshold.distance_to(&aircraft) < MIN_SIDE_DETERMINATION_NM {
        return false;
    }
    let bearing_from_threshold = threshold.bearing_to(&aircraft);
    signed_heading_delta(bearing_from_threshold - centerline_heading).abs() > 90.0
}

pub fn is_on_localizer(cross_track_error_degrees: f64) -> bool {
    cross_track_error_degrees.abs() <= LOCALIZER_HALF_WIDTH_DEG
}

/// Magnetic heading for flying outbound along the extended centerline
pub fn extension_heading(centerline_true_heading: f64, variation: f64) -> f64 {
    reciprocal_heading(centerline_true_heading - variation)
}
