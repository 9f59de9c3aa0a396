use anyhow::Result;
use std::path::Path;

use glidepath::magnetic::MagneticService;
use glidepath::scenario::Scenario;
use glidepath::waypoints::SLOT_COUNT;

pub fn handle_waypoints(scenario_path: &Path) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;
    let aircraft = scenario.aircraft()?;
    let variation = scenario.resolve_variation(&MagneticService::new())?;
    let tracker = scenario.waypoint_tracker()?;

    for slot in 1..=SLOT_COUNT {
        match tracker.query(slot, aircraft.latitude, aircraft.longitude, variation)? {
            Some(text) => println!("Slot {}: {}", slot, text),
            None => println!("Slot {}: empty", slot),
        }
    }

    Ok(())
}
