//! Offline inputs for the command-line front end: a scenario file naming the
//! runway, airport and (optionally) an aircraft sample, and telemetry logs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::magnetic::MagneticService;
use crate::navdata::{AircraftPosition, Airport, Runway, TrackedWaypoint};
use crate::waypoints::WaypointTracker;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaypointEntry {
    pub slot: usize,
    #[serde(flatten)]
    pub waypoint: TrackedWaypoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Magnetic variation (east-positive). Computed from the magnetic model when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft: Option<AircraftPosition>,
    pub runway: Runway,
    pub airport: Airport,
    #[serde(default)]
    pub waypoints: Vec<WaypointEntry>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse {:?}", path))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn aircraft(&self) -> Result<AircraftPosition> {
        self.aircraft.context("Scenario has no [aircraft] section")
    }

    /// The scenario's variation, or the magnetic model's value at the threshold
    pub fn resolve_variation(&self, magnetic: &MagneticService) -> Result<f64> {
        if let Some(variation) = self.variation {
            return Ok(variation);
        }

        let elevation = self.runway.glidepath_origin_ft(&self.airport);
        let variation = magnetic.variation(
            self.runway.threshold_latitude,
            self.runway.threshold_longitude,
            elevation,
            None,
        )?;
        info!(
            "No variation in scenario, using {:.1}° from the magnetic model at {} runway {}",
            variation, self.airport.ident, self.runway.ident
        );
        Ok(variation)
    }

    /// A tracker loaded with the scenario's waypoints
    pub fn waypoint_tracker(&self) -> Result<WaypointTracker> {
        let mut tracker = WaypointTracker::new();
        for entry in &self.waypoints {
            tracker
                .track(entry.slot, entry.waypoint.clone())
                .with_context(|| format!("Invalid waypoint {:?}", entry.waypoint.ident))?;
        }
        Ok(tracker)
    }
}

/// One row of a telemetry log
#[derive(Debug, Clone, Deserialize)]
struct TelemetryRow {
    latitude: f64,
    longitude: f64,
    altitude_ft: f64,
    heading_mag: f64,
}

/// Read a telemetry CSV with a `latitude,longitude,altitude_ft,heading_mag` header.
/// Returns an error on the first malformed row.
pub fn read_telemetry_csv<P: AsRef<Path>>(path: P) -> Result<Vec<AircraftPosition>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_ref())
        .with_context(|| format!("Opening {:?}", path.as_ref()))?;

    let mut samples = Vec::new();
    for (index, row) in reader.deserialize::<TelemetryRow>().enumerate() {
        // Header is line 1
        let row = row.with_context(|| format!("Parsing telemetry line {}", index + 2))?;
        samples.push(AircraftPosition::new(
            row.latitude,
            row.longitude,
            row.altitude_ft,
            row.heading_mag,
        ));
    }

    info!(
        "Read {} telemetry samples from {:?}",
        samples.len(),
        path.as_ref()
    );
    Ok(samples)
}
