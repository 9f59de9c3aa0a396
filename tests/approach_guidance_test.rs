use glidepath::approach::guidance::direct_to_guidance;
use glidepath::approach::{
    ApproachPhase, GuidanceEvaluator, LateralState, PhaseSmoother, TurnDirection, VerticalState,
    VisualApproachGuidance, format_announcement,
};
use glidepath::config::GuidanceConfig;
use glidepath::geodesy::{FEET_PER_NM, GeoPoint};
use glidepath::glideslope::expected_glidepath_altitude;
use glidepath::navdata::{AircraftPosition, Airport, GlideslopeAntenna, Runway};

const VARIATION: f64 = 15.0;
const FIELD_ELEVATION: f64 = 400.0;

/// Runway 09 with its threshold at 47N 122W, landing due east (075 magnetic)
fn runway() -> Runway {
    Runway {
        ident: "09".to_string(),
        threshold_latitude: 47.0,
        threshold_longitude: -122.0,
        opposite_latitude: 47.0,
        opposite_longitude: -121.96,
        magnetic_heading: 75.0,
        localizer_true_heading: 90.0,
        glideslope_pitch_deg: 3.0,
        glideslope_antenna: None,
        threshold_elevation_ft: None,
        localizer_range_nm: 18.0,
        glideslope_range_nm: 10.0,
    }
}

fn airport() -> Airport {
    Airport {
        ident: "KTST".to_string(),
        elevation_ft: FIELD_ELEVATION,
    }
}

fn threshold() -> GeoPoint {
    GeoPoint::new(47.0, -122.0)
}

/// Point `out_nm` west of the threshold on the approach side, then `north_nm` north
fn approach_point(out_nm: f64, north_nm: f64) -> GeoPoint {
    let on_centerline = threshold().destination(270.0, out_nm);
    if north_nm == 0.0 {
        on_centerline
    } else {
        on_centerline.destination(0.0, north_nm)
    }
}

/// Altitude on the 3 degree glide path at `distance_nm` from the threshold
fn on_slope_altitude(distance_nm: f64) -> f64 {
    expected_glidepath_altitude(FIELD_ELEVATION, distance_nm * FEET_PER_NM, 3.0)
}

fn aircraft_at(point: GeoPoint, altitude_ft: f64, heading_mag: f64) -> AircraftPosition {
    AircraftPosition::new(point.latitude, point.longitude, altitude_ft, heading_mag)
}

fn evaluate(point: GeoPoint, altitude_ft: f64, heading_mag: f64) -> VisualApproachGuidance {
    let aircraft = aircraft_at(point, altitude_ft, heading_mag);
    GuidanceEvaluator::new(GuidanceConfig::default()).evaluate(
        &aircraft,
        &runway(),
        &airport(),
        VARIATION,
    )
}

#[test]
fn test_initial_approach_steers_to_twelve_mile_point() {
    let guidance = evaluate(approach_point(15.0, 0.0), 5000.0, 180.0);

    assert_eq!(guidance.phase, ApproachPhase::InitialApproach);
    assert!(guidance.should_continue);
    assert!(guidance.is_behind_runway);
    assert!(!guidance.is_aligned);
    assert_eq!(guidance.update_interval_ms, 3000);
    assert!(
        (guidance.distance_to_intercept_nm - 3.0).abs() < 0.05,
        "distance to the 12 NM point was {}",
        guidance.distance_to_intercept_nm
    );
    assert!(
        (guidance.intercept_heading_deg - 75.0).abs() < 1.0,
        "intercept heading was {}",
        guidance.intercept_heading_deg
    );
    assert_eq!(guidance.turn_direction, TurnDirection::Left);

    let text = format_announcement(&guidance);
    assert!(
        text.starts_with("Turn left heading 075, 3.0 miles to intercept, 15.0 miles from runway"),
        "{}",
        text
    );
}

#[test]
fn test_intercept_turn_north_of_centerline() {
    let guidance = evaluate(approach_point(5.0, 1.0), on_slope_altitude(5.1), 180.0);

    assert_eq!(guidance.phase, ApproachPhase::InterceptTurn);
    assert!(guidance.should_continue);
    assert_eq!(guidance.update_interval_ms, 2000);
    assert!(
        (guidance.lateral_offset_nm - 1.0).abs() < 0.02,
        "lateral offset was {}",
        guidance.lateral_offset_nm
    );
    // North of an eastbound centerline the correction is to the right
    assert_eq!(guidance.lateral_state, LateralState::Right);
    // The 12 NM point is behind and to the right of a southbound aircraft
    assert_eq!(guidance.turn_direction, TurnDirection::Right);
}

#[test]
fn test_aligned_final_on_slope() {
    let guidance = evaluate(approach_point(5.0, 0.0), on_slope_altitude(5.0), 75.0);

    assert_eq!(guidance.phase, ApproachPhase::FinalApproach);
    assert_eq!(guidance.lateral_state, LateralState::Aligned);
    assert_eq!(guidance.vertical_state, VerticalState::OnSlope);
    assert!(guidance.is_aligned);
    assert!(guidance.vertical_deviation_ft.abs() < 1.0);
    assert!(guidance.lateral_offset_nm < 0.01);
    assert!(guidance.height_agl_ft > 1000.0);
    assert_eq!(guidance.update_interval_ms, 2000);
    assert_eq!(
        format_announcement(&guidance),
        "5.0 miles, Aligned, on slope"
    );
}

#[test]
fn test_final_high_and_low() {
    let high = evaluate(
        approach_point(5.0, 0.0),
        on_slope_altitude(5.0) + 200.0,
        75.0,
    );
    assert_eq!(high.vertical_state, VerticalState::Up);
    assert_eq!(
        format_announcement(&high),
        "5.0 miles, aligned, 200 feet high"
    );

    let low = evaluate(
        approach_point(5.0, 0.0),
        on_slope_altitude(5.0) - 200.0,
        75.0,
    );
    assert_eq!(low.vertical_state, VerticalState::Down);
    assert_eq!(
        format_announcement(&low),
        "5.0 miles, aligned, 200 feet low"
    );
}

#[test]
fn test_glideslope_antenna_anchors_the_path() {
    let antenna_point = threshold().destination(90.0, 1000.0 / FEET_PER_NM);
    let antenna = GlideslopeAntenna {
        latitude: antenna_point.latitude,
        longitude: antenna_point.longitude,
        altitude_ft: FIELD_ELEVATION + 10.0,
    };
    let with_antenna = runway().with_glideslope_antenna(antenna);

    let position = approach_point(5.0, 0.0);
    let from_antenna_ft = position.distance_to(&antenna_point) * FEET_PER_NM;
    let altitude = expected_glidepath_altitude(antenna.altitude_ft, from_antenna_ft, 3.0);
    let aircraft = aircraft_at(position, altitude, 75.0);
    let evaluator = GuidanceEvaluator::default();

    let anchored = evaluator.evaluate(&aircraft, &with_antenna, &airport(), VARIATION);
    assert_eq!(anchored.vertical_state, VerticalState::OnSlope);
    assert!(
        anchored.vertical_deviation_ft.abs() < 1.0,
        "antenna-mode deviation was {}",
        anchored.vertical_deviation_ft
    );

    // 10 ft of antenna height plus 1000 ft of extra path: about 64 ft high from the threshold
    let from_threshold = evaluator.evaluate(&aircraft, &runway(), &airport(), VARIATION);
    assert_eq!(from_threshold.vertical_state, VerticalState::Up);
    assert!(
        (from_threshold.vertical_deviation_ft - 63.9).abs() < 1.0,
        "threshold-mode deviation was {}",
        from_threshold.vertical_deviation_ft
    );
}

#[test]
fn test_short_final() {
    let guidance = evaluate(approach_point(0.5, 0.0), FIELD_ELEVATION + 150.0, 76.0);

    assert_eq!(guidance.phase, ApproachPhase::ShortFinal);
    assert!(guidance.should_continue);
    assert_eq!(guidance.update_interval_ms, 1000);
    assert!(format_announcement(&guidance).starts_with("Short final, 0.5 miles"));
}

#[test]
fn test_landed_stops_before_anything_else() {
    let guidance = evaluate(approach_point(0.5, 0.0), FIELD_ELEVATION + 30.0, 75.0);
    assert!(!guidance.should_continue);
    assert_eq!(guidance.stop_reason, "landing or landed");
    assert_eq!(
        format_announcement(&guidance),
        "Guidance ended: landing or landed"
    );

    // Low and far away still reports landing first
    let far = evaluate(approach_point(60.0, 0.0), FIELD_ELEVATION + 20.0, 75.0);
    assert_eq!(far.stop_reason, "landing or landed");
}

#[test]
fn test_too_far_from_runway() {
    let guidance = evaluate(approach_point(60.0, 0.0), 10000.0, 75.0);
    assert!(!guidance.should_continue);
    assert_eq!(guidance.stop_reason, "too far from runway");
    // The record is still complete
    assert_eq!(guidance.phase, ApproachPhase::InitialApproach);
    assert!(guidance.distance_to_threshold_nm > 59.0);
}

#[test]
fn test_past_threshold() {
    let past = threshold().destination(90.0, 0.2);
    let guidance = evaluate(past, FIELD_ELEVATION + 200.0, 75.0);

    assert!(!guidance.is_behind_runway);
    assert_eq!(guidance.phase, ApproachPhase::FinalApproach);
    assert!(!guidance.should_continue);
    assert_eq!(guidance.stop_reason, "past runway threshold");
}

#[test]
fn test_too_far_off_centerline() {
    let guidance = evaluate(approach_point(20.0, 9.0), 6000.0, 75.0);
    assert!(guidance.lateral_offset_nm > 8.0);
    assert!(guidance.distance_to_threshold_nm < 50.0);
    assert!(!guidance.should_continue);
    assert_eq!(guidance.stop_reason, "too far off centerline");
}

#[test]
fn test_aligned_band_edge() {
    let inside = evaluate(approach_point(5.0, 0.14), on_slope_altitude(5.0), 75.0);
    assert_eq!(inside.lateral_state, LateralState::Aligned);

    let outside = evaluate(approach_point(5.0, 0.16), on_slope_altitude(5.0), 75.0);
    assert_eq!(outside.lateral_state, LateralState::Right);

    let south = evaluate(approach_point(5.0, -0.5), on_slope_altitude(5.0), 75.0);
    assert_eq!(south.lateral_state, LateralState::Left);
}

#[test]
fn test_json_uses_continue_key() {
    let guidance = evaluate(approach_point(5.0, 0.0), on_slope_altitude(5.0), 75.0);
    let value = serde_json::to_value(&guidance).unwrap();
    assert_eq!(value["continue"], serde_json::Value::Bool(true));
    assert_eq!(value["phase"], "final_approach");
    assert!(value.get("should_continue").is_none());
}

#[test]
fn test_smoothed_record_follows_the_reported_phase() {
    let evaluator = GuidanceEvaluator::default();
    let mut smoother = PhaseSmoother::new(2);
    let runway = runway();
    let airport = airport();

    let intercept = aircraft_at(approach_point(5.0, 1.0), on_slope_altitude(5.1), 180.0);
    let aligned_once = aircraft_at(approach_point(4.9, 1.0), on_slope_altitude(5.0), 75.0);

    let first =
        evaluator.evaluate_smoothed(&mut smoother, &intercept, &runway, &airport, VARIATION);
    assert_eq!(first.phase, ApproachPhase::InterceptTurn);

    let raw = evaluator.evaluate(&aligned_once, &runway, &airport, VARIATION);
    assert_eq!(raw.phase, ApproachPhase::FinalApproach);

    let held =
        evaluator.evaluate_smoothed(&mut smoother, &aligned_once, &runway, &airport, VARIATION);
    assert_eq!(held.phase, ApproachPhase::InterceptTurn);
    assert_eq!(held.update_interval_ms, 2000);

    // Intercept fields are the direct-to steering of the held phase
    let direct = direct_to_guidance(&aligned_once, &runway, VARIATION, 12.0);
    assert!(
        (held.distance_to_intercept_nm - direct.distance_nm).abs() < 1e-9,
        "held distance {} vs direct-to {}",
        held.distance_to_intercept_nm,
        direct.distance_nm
    );
    assert!((held.intercept_heading_deg - direct.heading_deg).abs() < 1e-9);
    assert_eq!(held.turn_direction, direct.turn);
    assert!(held.distance_to_intercept_nm > 6.0);
    let expected_prefix = format!("{:.1} miles, turn", held.distance_to_threshold_nm);
    assert!(format_announcement(&held).starts_with(&expected_prefix));

    let confirmed =
        evaluator.evaluate_smoothed(&mut smoother, &aligned_once, &runway, &airport, VARIATION);
    assert_eq!(confirmed.phase, ApproachPhase::FinalApproach);
    assert_eq!(confirmed, raw);
}
