use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Tunable thresholds for the guidance evaluator.
///
/// Every field has a default, so a config file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Lateral offset at or below which the aircraft counts as on the centerline
    pub aligned_offset_nm: f64,
    /// Vertical deviation at or below which the aircraft counts as on slope
    pub on_slope_tolerance_ft: f64,
    /// Heading difference from the runway at or below which the aircraft is aligned
    pub alignment_tolerance_deg: f64,
    /// Distance behind the threshold of the direct-to point used in early phases
    pub direct_to_leg_nm: f64,
    /// Intercept angle suggested once on final
    pub final_intercept_angle_deg: f64,
    pub phase: PhaseBands,
    pub stop: StopLimits,
    pub smoothing: SmoothingConfig,
}

/// Distance and height bands used by the phase classifier and update cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseBands {
    /// Short final starts inside this distance...
    pub short_final_distance_nm: f64,
    /// ...and below this height
    pub short_final_agl_ft: f64,
    /// Inner edge of the intercept-turn band
    pub intercept_min_distance_nm: f64,
    /// Outer edge of the final approach / intercept area
    pub final_area_distance_nm: f64,
    /// Final approach updates every second at or below this height
    pub fast_update_agl_ft: f64,
}

/// Conditions that end guidance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopLimits {
    pub landed_agl_ft: f64,
    pub max_distance_nm: f64,
    pub past_threshold_nm: f64,
    pub max_lateral_offset_nm: f64,
}

/// Phase hysteresis applied by callers that poll repeatedly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub enabled: bool,
    pub required_confirmations: u32,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            aligned_offset_nm: 0.15,
            on_slope_tolerance_ft: 50.0,
            alignment_tolerance_deg: 3.0,
            direct_to_leg_nm: 12.0,
            final_intercept_angle_deg: 30.0,
            phase: PhaseBands::default(),
            stop: StopLimits::default(),
            smoothing: SmoothingConfig::default(),
        }
    }
}

impl Default for PhaseBands {
    fn default() -> Self {
        Self {
            short_final_distance_nm: 1.0,
            short_final_agl_ft: 500.0,
            intercept_min_distance_nm: 3.0,
            final_area_distance_nm: 10.0,
            fast_update_agl_ft: 1000.0,
        }
    }
}

impl Default for StopLimits {
    fn default() -> Self {
        Self {
            landed_agl_ft: 50.0,
            max_distance_nm: 50.0,
            past_threshold_nm: 0.3,
            max_lateral_offset_nm: 8.0,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            required_confirmations: 2,
        }
    }
}

impl GuidanceConfig {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: GuidanceConfig =
            toml::from_str(&contents).with_context(|| format!("Failed to parse {:?}", path))?;
        debug!("Loaded guidance config from {:?}", path);
        Ok(config)
    }

    /// Save config to a TOML file (atomic: write to .tmp then rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        let tmp_path = path.with_extension("toml.tmp");
        std::fs::write(&tmp_path, &contents)
            .with_context(|| format!("Failed to write {:?}", tmp_path))?;
        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to rename {:?} to {:?}", tmp_path, path))?;
        Ok(())
    }

    /// Load from an explicit path, or from [`config_path`] when it exists,
    /// or fall back to the built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let path = config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            info!("No config file at {:?}, using default thresholds", path);
            Ok(Self::default())
        }
    }
}

/// Resolve the config file path.
///
/// Priority:
/// 1. `GLIDEPATH_CONFIG` env var
/// 2. `./glidepath.toml`
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("GLIDEPATH_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("./glidepath.toml")
}
