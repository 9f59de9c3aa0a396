use anyhow::Result;
use std::path::Path;

use glidepath::geodesy::{self, GeoPoint};
use glidepath::glideslope;
use glidepath::magnetic::MagneticService;
use glidepath::scenario::Scenario;

pub fn handle_intercepts(scenario_path: &Path) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;
    let aircraft = scenario.aircraft()?;
    let variation = scenario.resolve_variation(&MagneticService::new())?;

    let runway = &scenario.runway;
    let position = GeoPoint::new(aircraft.latitude, aircraft.longitude);
    let threshold = GeoPoint::new(runway.threshold_latitude, runway.threshold_longitude);
    let course = runway.localizer_true_heading;

    let options = geodesy::three_intercept_headings(position, threshold, course, variation);
    let direct = geodesy::intercept_heading(position, threshold, course, variation);
    let offset = geodesy::distance_to_localizer(position, threshold, course);
    let along = geodesy::along_track_distance(position, threshold, course);
    let error_deg = geodesy::cross_track_error_degrees(position, threshold, course);
    let distance = position.distance_to(&threshold);

    println!("Runway {} at {}", runway.ident, scenario.airport.ident);
    println!("  Distance to threshold: {:.2} NM", distance);
    println!("  Along track:           {:.2} NM", along);
    println!("  Off centerline:        {:.2} NM", offset);
    println!(
        "  Localizer deviation:   {:+.1}° ({})",
        error_deg,
        if geodesy::is_on_localizer(error_deg) { "on course" } else { "off course" }
    );
    println!(
        "  Approach side:         {}",
        if geodesy::is_approaching_from_behind(position, threshold, course) { "yes" } else { "no" }
    );
    println!(
        "  Within ILS range:      {} (glideslope: {})",
        glideslope::is_within_ils_range(distance, runway.localizer_range_nm),
        glideslope::is_within_glideslope_range(distance, runway.glideslope_range_nm)
    );
    println!("  Perpendicular:         {:05.1}°", direct);
    println!("  Direct (60°):          {:05.1}°", options.direct);
    println!("  Medium (45°):          {:05.1}°", options.medium);
    println!("  Shallow (30°):         {:05.1}°", options.shallow);
    println!(
        "  Extension outbound:    {:05.1}°",
        geodesy::extension_heading(course, variation)
    );

    Ok(())
}
