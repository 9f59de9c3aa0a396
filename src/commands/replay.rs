use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use glidepath::approach::{GuidanceEvaluator, PhaseSmoother, format_announcement};
use glidepath::config::GuidanceConfig;
use glidepath::magnetic::MagneticService;
use glidepath::scenario::{Scenario, read_telemetry_csv};

pub struct ReplayOptions {
    pub realtime: bool,
    pub smoothing: bool,
    pub json: bool,
}

/// Evaluate every telemetry sample in order, stopping when guidance ends.
/// Announcements are printed only when their text changes.
pub async fn handle_replay(
    config: &GuidanceConfig,
    scenario_path: &Path,
    telemetry_path: &Path,
    options: ReplayOptions,
) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;
    let variation = scenario.resolve_variation(&MagneticService::new())?;
    let samples = read_telemetry_csv(telemetry_path)?;

    let evaluator = GuidanceEvaluator::new(config.clone());
    let mut smoother = options
        .smoothing
        .then(|| PhaseSmoother::new(config.smoothing.required_confirmations));
    let mut last_announcement: Option<String> = None;

    for (index, sample) in samples.iter().enumerate() {
        let guidance = match smoother.as_mut() {
            Some(smoother) => evaluator.evaluate_smoothed(
                smoother,
                sample,
                &scenario.runway,
                &scenario.airport,
                variation,
            ),
            None => evaluator.evaluate(sample, &scenario.runway, &scenario.airport, variation),
        };

        if options.json {
            let line = serde_json::to_string(&guidance).context("Failed to serialize guidance")?;
            println!("{}", line);
        } else {
            let text = format_announcement(&guidance);
            if last_announcement.as_deref() != Some(text.as_str()) {
                println!("[{:>4}] {}", index + 1, text);
                last_announcement = Some(text);
            }
        }

        if !guidance.should_continue {
            info!(
                "Guidance ended at sample {} of {}: {}",
                index + 1,
                samples.len(),
                guidance.stop_reason
            );
            break;
        }

        if options.realtime {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(guidance.update_interval_ms)) => {}
                _ = tokio::signal::ctrl_c() => {
                    warn!("Replay interrupted at sample {}", index + 1);
                    break;
                }
            }
        }
    }

    Ok(())
}
