//! Vertical guidance against a published glide path
//!
//! The expected altitude at a horizontal distance `h` (feet) from the glide
//! path origin is
//!
//! ```text
//! origin + h * tan(pitch) + h^2 / (2 * R)
//! ```
//!
//! The last term accounts for the Earth's surface dropping away below a
//! straight glide path. It is a few feet at 2 NM and roughly 200 ft at 15 NM,
//! so leaving it out biases the computed path low at intercept ranges.

use crate::geodesy::{self, EARTH_RADIUS_FEET, FEET_PER_NM, GeoPoint};
use crate::navdata::GlideslopeAntenna;

/// Height gained by the Earth's curvature over `horizontal_ft`
pub fn curvature_correction_ft(horizontal_ft: f64) -> f64 {
    horizontal_ft * horizontal_ft / (2.0 * EARTH_RADIUS_FEET)
}

/// Expected glide path altitude (feet MSL) at `horizontal_ft` from the origin
pub fn expected_glidepath_altitude(origin_ft: f64, horizontal_ft: f64, pitch_deg: f64) -> f64 {
    origin_ft
        + horizontal_ft * pitch_deg.to_radians().tan()
        + curvature_correction_ft(horizontal_ft)
}

/// Signed vertical deviation in feet, positive above the glide path.
///
/// When both the antenna and the aircraft position are known the path is
/// anchored at the antenna and the horizontal distance is measured from it.
/// Otherwise the path starts at the threshold elevation and
/// `distance_from_threshold_nm` is used directly.
pub fn glideslope_deviation(
    aircraft_altitude_msl: f64,
    distance_from_threshold_nm: f64,
    pitch_deg: f64,
    threshold_elevation_msl: f64,
    antenna: Option<&GlideslopeAntenna>,
    aircraft: Option<GeoPoint>,
) -> f64 {
    let expected = match (antenna, aircraft) {
        (Some(antenna), Some(aircraft)) => {
            let horizontal_nm = geodesy::distance(
                antenna.latitude,
                antenna.longitude,
                aircraft.latitude,
                aircraft.longitude,
            );
            expected_glidepath_altitude(antenna.altitude_ft, horizontal_nm * FEET_PER_NM, pitch_deg)
        }
        _ => expected_glidepath_altitude(
            threshold_elevation_msl,
            distance_from_threshold_nm.max(0.0) * FEET_PER_NM,
            pitch_deg,
        ),
    };

    aircraft_altitude_msl - expected
}

pub fn is_within_ils_range(distance_nm: f64, localizer_range_nm: f64) -> bool {
    distance_nm <= localizer_range_nm
}

pub fn is_within_glideslope_range(distance_nm: f64, glideslope_range_nm: f64) -> bool {
    distance_nm <= glideslope_range_nm
}
