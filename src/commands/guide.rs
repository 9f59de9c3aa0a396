use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use glidepath::approach::{GuidanceEvaluator, format_announcement};
use glidepath::config::GuidanceConfig;
use glidepath::magnetic::MagneticService;
use glidepath::scenario::Scenario;

pub fn handle_guide(config: &GuidanceConfig, scenario_path: &Path, json: bool) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;
    let aircraft = scenario.aircraft()?;
    let variation = scenario.resolve_variation(&MagneticService::new())?;

    let evaluator = GuidanceEvaluator::new(config.clone());
    let guidance = evaluator.evaluate(&aircraft, &scenario.runway, &scenario.airport, variation);

    info!(
        "Evaluated {} runway {} in phase {}",
        scenario.airport.ident, scenario.runway.ident, guidance.phase
    );

    if json {
        let output =
            serde_json::to_string_pretty(&guidance).context("Failed to serialize guidance")?;
        println!("{}", output);
    } else {
        println!("{}", format_announcement(&guidance));
    }

    Ok(())
}
