//! Spoken-style rendering of guidance records.
//!
//! Output is deterministic for a given record so that announcement layers can
//! suppress repeats by comparing strings.

use super::guidance::{LateralState, VerticalState, VisualApproachGuidance};
use super::phase::ApproachPhase;

fn miles(distance_nm: f64) -> String {
    format!("{:.1} miles", distance_nm.max(0.0))
}

/// Three-digit magnetic heading, 360 rather than 000
fn heading(degrees: f64) -> String {
    let rounded = (degrees.round() as i64).rem_euclid(360);
    let rounded = if rounded == 0 { 360 } else { rounded };
    format!("{:03}", rounded)
}

fn vertical_text(guidance: &VisualApproachGuidance) -> String {
    let feet = guidance.vertical_deviation_ft.abs().round();
    match guidance.vertical_state {
        VerticalState::OnSlope => "on slope".to_string(),
        VerticalState::Up => format!("{:.0} feet high", feet),
        VerticalState::Down => format!("{:.0} feet low", feet),
    }
}

fn lateral_text(guidance: &VisualApproachGuidance) -> String {
    match guidance.lateral_state {
        LateralState::Aligned => "aligned".to_string(),
        LateralState::Left => format!("correct left {:.1} miles", guidance.lateral_offset_nm),
        LateralState::Right => format!("correct right {:.1} miles", guidance.lateral_offset_nm),
    }
}

fn correction_text(guidance: &VisualApproachGuidance) -> String {
    if guidance.lateral_state == LateralState::Aligned
        && guidance.vertical_state == VerticalState::OnSlope
    {
        "Aligned, on slope".to_string()
    } else {
        format!("{}, {}", lateral_text(guidance), vertical_text(guidance))
    }
}

/// Render a guidance record as a single announcement line
pub fn format_announcement(guidance: &VisualApproachGuidance) -> String {
    if !guidance.should_continue {
        return format!("Guidance ended: {}", guidance.stop_reason);
    }

    match guidance.phase {
        ApproachPhase::InitialApproach => format!(
            "Turn {} heading {}, {} to intercept, {} from runway, {}",
            guidance.turn_direction,
            heading(guidance.intercept_heading_deg),
            miles(guidance.distance_to_intercept_nm),
            miles(guidance.distance_to_threshold_nm),
            vertical_text(guidance)
        ),
        ApproachPhase::InterceptTurn => format!(
            "{}, turn {} heading {}, {}",
            miles(guidance.distance_to_threshold_nm),
            guidance.turn_direction,
            heading(guidance.intercept_heading_deg),
            vertical_text(guidance)
        ),
        ApproachPhase::FinalApproach => format!(
            "{}, {}",
            miles(guidance.distance_to_threshold_nm),
            correction_text(guidance)
        ),
        ApproachPhase::ShortFinal => format!(
            "Short final, {}, {}",
            miles(guidance.distance_to_threshold_nm),
            correction_text(guidance)
        ),
    }
}
