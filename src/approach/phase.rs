use serde::{Deserialize, Serialize};

use crate::config::PhaseBands;

/// Stage of a visual approach, derived from the current sample only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApproachPhase {
    /// Far out; fly toward a point on the extended centerline
    InitialApproach,
    /// Inside 10 NM but not yet lined up
    InterceptTurn,
    /// Lined up, or past the threshold with only basic guidance left
    FinalApproach,
    /// Inside 1 NM and below 500 ft AGL
    ShortFinal,
}

impl ApproachPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApproachPhase::InitialApproach => "initial_approach",
            ApproachPhase::InterceptTurn => "intercept_turn",
            ApproachPhase::FinalApproach => "final_approach",
            ApproachPhase::ShortFinal => "short_final",
        }
    }

    /// Early phases steer toward the centerline rather than along it
    pub fn is_early(&self) -> bool {
        matches!(
            self,
            ApproachPhase::InitialApproach | ApproachPhase::InterceptTurn
        )
    }
}

impl std::fmt::Display for ApproachPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApproachPhase::InitialApproach => write!(f, "initial approach"),
            ApproachPhase::InterceptTurn => write!(f, "intercept turn"),
            ApproachPhase::FinalApproach => write!(f, "final approach"),
            ApproachPhase::ShortFinal => write!(f, "short final"),
        }
    }
}

/// Inputs to [`classify_phase`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseInputs {
    pub distance_to_threshold_nm: f64,
    pub lateral_offset_nm: f64,
    pub height_agl_ft: f64,
    /// Heading within the alignment tolerance of the runway heading
    pub is_aligned: bool,
    /// Aircraft is on the approach side of the threshold
    pub is_behind_runway: bool,
}

/// Classify the approach phase. Rules are checked in order, first match wins.
///
/// Nothing is remembered between calls; see
/// [`PhaseSmoother`](super::hysteresis::PhaseSmoother) for flicker suppression.
pub fn classify_phase(inputs: &PhaseInputs, bands: &PhaseBands) -> ApproachPhase {
    let distance = inputs.distance_to_threshold_nm;
    let intercept_band = bands.intercept_min_distance_nm..bands.final_area_distance_nm;

    if !inputs.is_behind_runway {
        return ApproachPhase::FinalApproach;
    }
    if distance < bands.short_final_distance_nm && inputs.height_agl_ft < bands.short_final_agl_ft {
        return ApproachPhase::ShortFinal;
    }
    if inputs.is_aligned && distance < bands.final_area_distance_nm {
        return ApproachPhase::FinalApproach;
    }
    if intercept_band.contains(&distance) && !inputs.is_aligned {
        return ApproachPhase::InterceptTurn;
    }
    if distance >= bands.final_area_distance_nm {
        return ApproachPhase::InitialApproach;
    }
    ApproachPhase::FinalApproach
}
