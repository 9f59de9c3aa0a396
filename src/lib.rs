//! glidepath - visual approach guidance from aircraft telemetry
//!
//! The library turns an aircraft position sample plus runway and airport
//! reference data into a structured [`approach::VisualApproachGuidance`]
//! record and an announcement line. Everything in [`geodesy`], [`glideslope`]
//! and [`approach`] is pure and synchronous; the caller owns the polling loop
//! and should re-evaluate at the recommended update interval.

pub mod approach;
pub mod config;
pub mod geodesy;
pub mod glideslope;
pub mod log_format;
pub mod logging;
pub mod magnetic;
pub mod navdata;
pub mod scenario;
pub mod waypoints;

pub use approach::{GuidanceEvaluator, VisualApproachGuidance, format_announcement};
pub use config::GuidanceConfig;
pub use navdata::{AircraftPosition, Airport, GlideslopeAntenna, Runway, TrackedWaypoint};
pub use waypoints::{WaypointError, WaypointTracker};
