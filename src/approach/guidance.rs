use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::hysteresis::PhaseSmoother;
use super::phase::{ApproachPhase, PhaseInputs, classify_phase};
use crate::config::{GuidanceConfig, PhaseBands, StopLimits};
use crate::geodesy::{self, GeoPoint};
use crate::glideslope;
use crate::navdata::{AircraftPosition, Airport, Runway};

/// Where the extended centerline is relative to the aircraft's track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateralState {
    Aligned,
    /// Centerline is to the left; correct left
    Left,
    /// Centerline is to the right; correct right
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalState {
    OnSlope,
    /// Above the glide path
    Up,
    /// Below the glide path
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnDirection::Left => "left",
            TurnDirection::Right => "right",
        }
    }
}

impl std::fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One evaluation of the approach. Built fresh for every sample and always
/// fully populated, including when guidance has ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualApproachGuidance {
    pub phase: ApproachPhase,
    pub lateral_state: LateralState,
    pub vertical_state: VerticalState,
    /// Perpendicular distance from the extended centerline
    pub lateral_offset_nm: f64,
    /// Positive above the glide path
    pub vertical_deviation_ft: f64,
    pub distance_to_threshold_nm: f64,
    pub height_agl_ft: f64,
    #[serde(rename = "continue")]
    pub should_continue: bool,
    /// Empty while guidance continues
    pub stop_reason: String,
    pub update_interval_ms: u64,
    pub is_aligned: bool,
    /// Aircraft heading minus runway heading, in (-180, 180]
    pub heading_difference_deg: f64,
    /// Magnetic heading to fly toward the intercept aim point
    pub intercept_heading_deg: f64,
    pub distance_to_intercept_nm: f64,
    pub turn_direction: TurnDirection,
    pub is_behind_runway: bool,
}

/// Lateral state from the perpendicular offset and the bearing to the threshold.
///
/// A positive bearing delta means the aircraft must turn right to regain the
/// centerline.
pub fn lateral_state(
    lateral_offset_nm: f64,
    bearing_to_threshold: f64,
    centerline_heading: f64,
    aligned_offset_nm: f64,
) -> LateralState {
    if lateral_offset_nm <= aligned_offset_nm {
        return LateralState::Aligned;
    }
    if geodesy::signed_heading_delta(bearing_to_threshold - centerline_heading) > 0.0 {
        LateralState::Right
    } else {
        LateralState::Left
    }
}

pub fn vertical_state(deviation_ft: f64, on_slope_tolerance_ft: f64) -> VerticalState {
    if deviation_ft.abs() <= on_slope_tolerance_ft {
        VerticalState::OnSlope
    } else if deviation_ft > 0.0 {
        VerticalState::Up
    } else {
        VerticalState::Down
    }
}

/// Reason to end guidance, if any. Checked in order, first match wins.
pub fn stop_reason(
    height_agl_ft: f64,
    distance_to_threshold_nm: f64,
    lateral_offset_nm: f64,
    is_behind_runway: bool,
    limits: &StopLimits,
) -> Option<&'static str> {
    if height_agl_ft < limits.landed_agl_ft {
        Some("landing or landed")
    } else if distance_to_threshold_nm > limits.max_distance_nm {
        Some("too far from runway")
    } else if distance_to_threshold_nm < limits.past_threshold_nm && !is_behind_runway {
        Some("past runway threshold")
    } else if lateral_offset_nm > limits.max_lateral_offset_nm {
        Some("too far off centerline")
    } else {
        None
    }
}

/// How long the caller should wait before the next evaluation
pub fn update_interval_ms(phase: ApproachPhase, height_agl_ft: f64, bands: &PhaseBands) -> u64 {
    match phase {
        ApproachPhase::ShortFinal => 1000,
        ApproachPhase::FinalApproach if height_agl_ft <= bands.fast_update_agl_ft => 1000,
        ApproachPhase::FinalApproach => 2000,
        ApproachPhase::InterceptTurn => 2000,
        ApproachPhase::InitialApproach => 3000,
    }
}

pub fn turn_direction(current_heading: f64, target_heading: f64) -> TurnDirection {
    if geodesy::signed_heading_delta(target_heading - current_heading) < 0.0 {
        TurnDirection::Left
    } else {
        TurnDirection::Right
    }
}

/// Steering toward a point on the extended centerline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectToGuidance {
    pub target: GeoPoint,
    /// Magnetic heading to the target
    pub heading_deg: f64,
    pub distance_nm: f64,
    pub turn: TurnDirection,
}

/// Steering toward the point `leg_nm` behind the threshold on the centerline
pub fn direct_to_guidance(
    aircraft: &AircraftPosition,
    runway: &Runway,
    variation: f64,
    leg_nm: f64,
) -> DirectToGuidance {
    let position = GeoPoint::new(aircraft.latitude, aircraft.longitude);
    let threshold = runway_threshold(runway);
    let target = threshold.destination(
        geodesy::reciprocal_heading(runway.localizer_true_heading),
        leg_nm,
    );

    let heading_deg = geodesy::normalize_heading(position.bearing_to(&target) - variation);
    DirectToGuidance {
        target,
        heading_deg,
        distance_nm: position.distance_to(&target),
        turn: turn_direction(aircraft.heading_mag, heading_deg),
    }
}

fn runway_threshold(runway: &Runway) -> GeoPoint {
    GeoPoint::new(runway.threshold_latitude, runway.threshold_longitude)
}

/// Phase-independent geometry of one sample
#[derive(Clone, Copy)]
struct Measurement {
    position: GeoPoint,
    threshold: GeoPoint,
    distance_to_threshold_nm: f64,
    lateral_offset_nm: f64,
    is_behind_runway: bool,
    height_agl_ft: f64,
    vertical_deviation_ft: f64,
    heading_difference_deg: f64,
    is_aligned: bool,
}

impl Measurement {
    fn phase_inputs(&self) -> PhaseInputs {
        PhaseInputs {
            distance_to_threshold_nm: self.distance_to_threshold_nm,
            lateral_offset_nm: self.lateral_offset_nm,
            height_agl_ft: self.height_agl_ft,
            is_aligned: self.is_aligned,
            is_behind_runway: self.is_behind_runway,
        }
    }
}

/// Turns telemetry samples into [`VisualApproachGuidance`] records
#[derive(Debug, Clone, Default)]
pub struct GuidanceEvaluator {
    config: GuidanceConfig,
}

impl GuidanceEvaluator {
    pub fn new(config: GuidanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GuidanceConfig {
        &self.config
    }

    /// Evaluate one sample. `variation` is east-positive.
    pub fn evaluate(
        &self,
        aircraft: &AircraftPosition,
        runway: &Runway,
        airport: &Airport,
        variation: f64,
    ) -> VisualApproachGuidance {
        let measurement = self.measure(aircraft, runway, airport);
        let phase = classify_phase(&measurement.phase_inputs(), &self.config.phase);
        self.build(&measurement, phase, aircraft, runway, variation)
    }

    /// Evaluate one sample of a polled sequence, reporting the phase the
    /// smoother settles on. Every phase-dependent field (intercept heading,
    /// intercept distance, turn, update interval) follows the reported phase.
    pub fn evaluate_smoothed(
        &self,
        smoother: &mut PhaseSmoother,
        aircraft: &AircraftPosition,
        runway: &Runway,
        airport: &Airport,
        variation: f64,
    ) -> VisualApproachGuidance {
        let measurement = self.measure(aircraft, runway, airport);
        let raw = classify_phase(&measurement.phase_inputs(), &self.config.phase);
        let phase = smoother.update(raw);
        if phase != raw {
            debug!(
                "Runway {}: reporting {} while {} is unconfirmed",
                runway.ident,
                phase,
                raw
            );
        }
        self.build(&measurement, phase, aircraft, runway, variation)
    }

    fn measure(
        &self,
        aircraft: &AircraftPosition,
        runway: &Runway,
        airport: &Airport,
    ) -> Measurement {
        let position = GeoPoint::new(aircraft.latitude, aircraft.longitude);
        let threshold = runway_threshold(runway);
        let course = runway.localizer_true_heading;

        let distance_to_threshold_nm = position.distance_to(&threshold);

        let vertical_deviation_ft = glideslope::glideslope_deviation(
            aircraft.altitude_ft,
            distance_to_threshold_nm,
            runway.glideslope_pitch_deg,
            runway.glidepath_origin_ft(airport),
            runway.glideslope_antenna.as_ref(),
            Some(position),
        );

        let heading_difference_deg =
            geodesy::signed_heading_delta(aircraft.heading_mag - runway.magnetic_heading);

        Measurement {
            position,
            threshold,
            distance_to_threshold_nm,
            lateral_offset_nm: geodesy::distance_to_localizer(position, threshold, course),
            is_behind_runway: geodesy::is_approaching_from_behind(position, threshold, course),
            height_agl_ft: aircraft.altitude_ft - airport.elevation_ft,
            vertical_deviation_ft,
            heading_difference_deg,
            is_aligned: heading_difference_deg.abs() <= self.config.alignment_tolerance_deg,
        }
    }

    fn build(
        &self,
        measurement: &Measurement,
        phase: ApproachPhase,
        aircraft: &AircraftPosition,
        runway: &Runway,
        variation: f64,
    ) -> VisualApproachGuidance {
        let Measurement {
            position,
            threshold,
            distance_to_threshold_nm,
            lateral_offset_nm,
            is_behind_runway,
            height_agl_ft,
            vertical_deviation_ft,
            heading_difference_deg,
            is_aligned,
        } = *measurement;
        let course = runway.localizer_true_heading;

        let lateral = lateral_state(
            lateral_offset_nm,
            position.bearing_to(&threshold),
            course,
            self.config.aligned_offset_nm,
        );
        let vertical = vertical_state(vertical_deviation_ft, self.config.on_slope_tolerance_ft);

        let stop = stop_reason(
            height_agl_ft,
            distance_to_threshold_nm,
            lateral_offset_nm,
            is_behind_runway,
            &self.config.stop,
        );

        let (intercept_heading_deg, distance_to_intercept_nm, turn) = if phase.is_early() {
            let direct =
                direct_to_guidance(aircraft, runway, variation, self.config.direct_to_leg_nm);
            (direct.heading_deg, direct.distance_nm, direct.turn)
        } else {
            let heading = geodesy::angled_intercept_heading(
                position,
                threshold,
                course,
                self.config.final_intercept_angle_deg,
                variation,
            );
            (
                heading,
                lateral_offset_nm,
                turn_direction(aircraft.heading_mag, heading),
            )
        };

        counter!("approach.guidance.evaluations_total", "phase" => phase.as_str()).increment(1);
        if let Some(reason) = stop {
            counter!("approach.guidance.stops_total").increment(1);
            debug!("Guidance for runway {} ended: {}", runway.ident, reason);
        }

        debug!(
            "Runway {} {}: {:.2} NM out, {:.2} NM lateral, {:.0} ft vertical, {:.0} ft AGL",
            runway.ident,
            phase,
            distance_to_threshold_nm,
            lateral_offset_nm,
            vertical_deviation_ft,
            height_agl_ft
        );

        VisualApproachGuidance {
            phase,
            lateral_state: lateral,
            vertical_state: vertical,
            lateral_offset_nm,
            vertical_deviation_ft,
            distance_to_threshold_nm,
            height_agl_ft,
            should_continue: stop.is_none(),
            stop_reason: stop.unwrap_or_default().to_string(),
            update_interval_ms: update_interval_ms(phase, height_agl_ft, &self.config.phase),
            is_aligned,
            heading_difference_deg,
            intercept_heading_deg,
            distance_to_intercept_nm,
            turn_direction: turn,
            is_behind_runway,
        }
    }
}
