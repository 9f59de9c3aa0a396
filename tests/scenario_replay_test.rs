use std::io::Write;

use glidepath::approach::{ApproachPhase, GuidanceEvaluator, PhaseSmoother};
use glidepath::config::GuidanceConfig;
use glidepath::geodesy::{FEET_PER_NM, GeoPoint};
use glidepath::glideslope::expected_glidepath_altitude;
use glidepath::magnetic::MagneticService;
use glidepath::scenario::{Scenario, read_telemetry_csv};

const SCENARIO: &str = r#"
variation = 15.0

[aircraft]
latitude = 47.0
longitude = -122.2
altitude_ft = 3000.0
heading_mag = 75.0

[runway]
ident = "09"
threshold_latitude = 47.0
threshold_longitude = -122.0
opposite_latitude = 47.0
opposite_longitude = -121.96
magnetic_heading = 75.0
localizer_true_heading = 90.0

[airport]
ident = "KTST"
elevation_ft = 400.0

[[waypoints]]
slot = 1
ident = "KTST"
section = "airports"
latitude = 47.0
longitude = -122.0

[[waypoints]]
slot = 4
ident = "NORTH"
latitude = 47.5
longitude = -122.2
"#;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Straight-in descent on the centerline and glide path, ending on the runway
fn straight_in_telemetry() -> String {
    let threshold = GeoPoint::new(47.0, -122.0);
    let mut csv = String::from("latitude,longitude,altitude_ft,heading_mag\n");
    for tenth in (2..=80).rev().step_by(6) {
        let distance = tenth as f64 / 10.0;
        let point = threshold.destination(270.0, distance);
        let altitude = expected_glidepath_altitude(400.0, distance * FEET_PER_NM, 3.0);
        csv.push_str(&format!(
            "{:.6},{:.6},{:.1},75\n",
            point.latitude, point.longitude, altitude
        ));
    }
    csv.push_str("47.0,-121.995,410,75\n");
    csv
}

#[test]
fn test_scenario_file_round_trip() {
    let file = write_temp(SCENARIO);
    let scenario = Scenario::load(file.path()).unwrap();

    let aircraft = scenario.aircraft().unwrap();
    assert_eq!(aircraft.altitude_ft, 3000.0);
    assert_eq!(scenario.runway.glideslope_pitch_deg, 3.0);
    assert_eq!(
        scenario.runway.glidepath_origin_ft(&scenario.airport),
        400.0
    );

    let variation = scenario.resolve_variation(&MagneticService::new()).unwrap();
    assert_eq!(variation, 15.0);

    let evaluator = GuidanceEvaluator::default();
    let guidance = evaluator.evaluate(&aircraft, &scenario.runway, &scenario.airport, variation);
    assert!(guidance.should_continue);
    assert!(guidance.is_aligned);
}

#[test]
fn test_scenario_waypoints() {
    let scenario = Scenario::parse(SCENARIO).unwrap();
    let aircraft = scenario.aircraft().unwrap();
    let tracker = scenario.waypoint_tracker().unwrap();

    let field = tracker
        .query(1, aircraft.latitude, aircraft.longitude, 15.0)
        .unwrap()
        .unwrap();
    // Due east, 075 magnetic
    assert!(field.starts_with("KTST: "), "{}", field);
    assert!(field.ends_with("bearing 075"), "{}", field);

    let north = tracker.fix(4, aircraft.latitude, aircraft.longitude, 15.0).unwrap().unwrap();
    assert!(
        (north.distance_nm - 30.0).abs() < 0.1,
        "distance was {}",
        north.distance_nm
    );
    assert!(
        (north.bearing_mag - 345.0).abs() < 0.5,
        "bearing was {}",
        north.bearing_mag
    );

    assert_eq!(
        tracker.query(2, aircraft.latitude, aircraft.longitude, 15.0).unwrap(),
        None
    );
    assert!(tracker.query(6, aircraft.latitude, aircraft.longitude, 15.0).is_err());
}

#[test]
fn test_straight_in_replay_ends_on_landing() {
    let scenario = Scenario::parse(SCENARIO).unwrap();
    let telemetry = write_temp(&straight_in_telemetry());
    let samples = read_telemetry_csv(telemetry.path()).unwrap();
    assert_eq!(samples.len(), 15);

    let evaluator = GuidanceEvaluator::new(GuidanceConfig::default());
    let mut smoother = PhaseSmoother::default();
    let mut phases = Vec::new();
    let mut final_reason = None;

    for sample in &samples {
        let guidance = evaluator.evaluate_smoothed(
            &mut smoother,
            sample,
            &scenario.runway,
            &scenario.airport,
            15.0,
        );
        phases.push(guidance.phase);
        if !guidance.should_continue {
            final_reason = Some(guidance.stop_reason.clone());
            break;
        }
        assert!(guidance.is_aligned);
    }

    assert_eq!(phases.first(), Some(&ApproachPhase::FinalApproach));
    assert!(phases.contains(&ApproachPhase::ShortFinal));
    assert_eq!(final_reason.as_deref(), Some("landing or landed"));
}
