//! Visual approach guidance: phase classification, guidance evaluation and
//! announcement text.

pub mod announce;
pub mod guidance;
pub mod hysteresis;
pub mod phase;

pub use announce::format_announcement;
pub use guidance::{
    DirectToGuidance, GuidanceEvaluator, LateralState, TurnDirection, VerticalState,
    VisualApproachGuidance,
};
pub use hysteresis::PhaseSmoother;
pub use phase::{ApproachPhase, PhaseInputs, classify_phase};
