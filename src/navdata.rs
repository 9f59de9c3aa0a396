//! Reference records supplied by the telemetry and navdata collaborators.
//!
//! Everything here is plain data. The geometry lives in [`crate::geodesy`]
//! and the guidance logic in [`crate::approach`].

use serde::{Deserialize, Serialize};

use crate::geodesy;

/// A single telemetry sample. Supplied fresh for every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftPosition {
    pub latitude: f64,
    pub longitude: f64,
    /// Altitude above mean sea level, feet
    pub altitude_ft: f64,
    /// Magnetic heading, degrees 0-360
    pub heading_mag: f64,
}

impl AircraftPosition {
    pub fn new(latitude: f64, longitude: f64, altitude_ft: f64, heading_mag: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude_ft,
            heading_mag: geodesy::normalize_heading(heading_mag),
        }
    }
}

/// Position of the glideslope transmitter antenna
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlideslopeAntenna {
    pub latitude: f64,
    pub longitude: f64,
    /// Antenna altitude above mean sea level, feet
    pub altitude_ft: f64,
}

/// A landing runway end, immutable for the duration of an approach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Runway {
    /// Runway designator (e.g., "16L")
    pub ident: String,

    pub threshold_latitude: f64,
    pub threshold_longitude: f64,
    pub opposite_latitude: f64,
    pub opposite_longitude: f64,

    /// Published magnetic heading of the runway
    pub magnetic_heading: f64,
    /// True course of the localizer / extended centerline
    pub localizer_true_heading: f64,

    #[serde(default = "default_glideslope_pitch")]
    pub glideslope_pitch_deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glideslope_antenna: Option<GlideslopeAntenna>,
    /// Threshold elevation (feet MSL). Falls back to the airport elevation when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_elevation_ft: Option<f64>,

    #[serde(default = "default_localizer_range")]
    pub localizer_range_nm: f64,
    #[serde(default = "default_glideslope_range")]
    pub glideslope_range_nm: f64,
}

pub const DEFAULT_GLIDESLOPE_PITCH_DEG: f64 = 3.0;
pub const DEFAULT_LOCALIZER_RANGE_NM: f64 = 18.0;
pub const DEFAULT_GLIDESLOPE_RANGE_NM: f64 = 10.0;

fn default_glideslope_pitch() -> f64 {
    DEFAULT_GLIDESLOPE_PITCH_DEG
}

fn default_localizer_range() -> f64 {
    DEFAULT_LOCALIZER_RANGE_NM
}

fn default_glideslope_range() -> f64 {
    DEFAULT_GLIDESLOPE_RANGE_NM
}

impl Runway {
    /// Build a runway from its two ends, deriving the true course from the
    /// threshold -> opposite end bearing and the magnetic heading from `variation`
    /// (east-positive).
    pub fn from_endpoints(
        ident: impl Into<String>,
        threshold: (f64, f64),
        opposite: (f64, f64),
        variation: f64,
    ) -> Self {
        let true_heading = geodesy::bearing(threshold.0, threshold.1, opposite.0, opposite.1);
        Self {
            ident: ident.into(),
            threshold_latitude: threshold.0,
            threshold_longitude: threshold.1,
            opposite_latitude: opposite.0,
            opposite_longitude: opposite.1,
            magnetic_heading: geodesy::normalize_heading(true_heading - variation),
            localizer_true_heading: true_heading,
            glideslope_pitch_deg: DEFAULT_GLIDESLOPE_PITCH_DEG,
            glideslope_antenna: None,
            threshold_elevation_ft: None,
            localizer_range_nm: DEFAULT_LOCALIZER_RANGE_NM,
            glideslope_range_nm: DEFAULT_GLIDESLOPE_RANGE_NM,
        }
    }

    pub fn with_glideslope_antenna(mut self, antenna: GlideslopeAntenna) -> Self {
        self.glideslope_antenna = Some(antenna);
        self
    }

    pub fn with_threshold_elevation(mut self, elevation_ft: f64) -> Self {
        self.threshold_elevation_ft = Some(elevation_ft);
        self
    }

    pub fn threshold(&self) -> (f64, f64) {
        (self.threshold_latitude, self.threshold_longitude)
    }

    /// Length of the runway between the two ends, nautical miles
    pub fn length_nm(&self) -> f64 {
        geodesy::distance(
            self.threshold_latitude,
            self.threshold_longitude,
            self.opposite_latitude,
            self.opposite_longitude,
        )
    }

    /// Elevation used as the glidepath origin in threshold mode
    pub fn glidepath_origin_ft(&self, airport: &Airport) -> f64 {
        self.threshold_elevation_ft.unwrap_or(airport.elevation_ft)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub ident: String,
    /// Field elevation, feet MSL
    pub elevation_ft: f64,
}

/// A point the pilot marked for later distance/bearing queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedWaypoint {
    pub ident: String,
    /// Free-form tag naming where the point came from (e.g., "airports", "fixes")
    #[serde(default)]
    pub section: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl TrackedWaypoint {
    pub fn new(
        ident: impl Into<String>,
        section: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            ident: ident.into(),
            section: section.into(),
            latitude,
            longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_endpoints_derives_headings() {
        // North-south runway: opposite end due north of the threshold
        let runway = Runway::from_endpoints("36", (47.0, -122.0), (47.03, -122.0), 15.0);
        assert!(
            runway.localizer_true_heading < 0.5 || runway.localizer_true_heading > 359.5,
            "Expected true heading near 360, got {}",
            runway.localizer_true_heading
        );
        assert!(
            (runway.magnetic_heading - 345.0).abs() < 0.5,
            "Expected magnetic heading near 345, got {}",
            runway.magnetic_heading
        );
        assert!((runway.length_nm() - 1.8).abs() < 0.05);
    }

    #[test]
    fn test_glidepath_origin_falls_back_to_airport() {
        let airport = Airport {
            ident: "KTST".to_string(),
            elevation_ft: 430.0,
        };
        let runway = Runway::from_endpoints("36", (47.0, -122.0), (47.03, -122.0), 0.0);
        assert_eq!(runway.glidepath_origin_ft(&airport), 430.0);

        let runway = runway.with_threshold_elevation(412.0);
        assert_eq!(runway.glidepath_origin_ft(&airport), 412.0);
    }

    #[test]
    fn test_runway_serde_defaults() {
        let toml_str = r#"
            ident = "16L"
            threshold_latitude = 47.4638
            threshold_longitude = -122.3079
            opposite_latitude = 47.4312
            opposite_longitude = -122.3079
            magnetic_heading = 164.0
            localizer_true_heading = 180.0
        "#;
        let runway: Runway = toml::from_str(toml_str).unwrap();
        assert_eq!(runway.glideslope_pitch_deg, 3.0);
        assert_eq!(runway.localizer_range_nm, 18.0);
        assert_eq!(runway.glideslope_range_nm, 10.0);
        assert!(runway.glideslope_antenna.is_none());
    }

    #[test]
    fn test_aircraft_heading_normalized() {
        let position = AircraftPosition::new(47.0, -122.0, 3000.0, -10.0);
        assert!((position.heading_mag - 350.0).abs() < 1e-9);
    }
}
