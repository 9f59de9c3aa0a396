use tracing::trace;

use super::phase::ApproachPhase;

/// Suppresses phase flicker near classification boundaries.
///
/// A phase change is reported only after the new phase has been classified on
/// `required_confirmations` consecutive samples. Short final is reported
/// immediately. The underlying classifier is never affected; pass the smoother
/// to [`GuidanceEvaluator::evaluate_smoothed`](super::GuidanceEvaluator::evaluate_smoothed)
/// so the rest of the record is built for the reported phase.
#[derive(Debug, Clone)]
pub struct PhaseSmoother {
    required_confirmations: u32,
    reported: Option<ApproachPhase>,
    candidate: Option<(ApproachPhase, u32)>,
}

impl PhaseSmoother {
    pub fn new(required_confirmations: u32) -> Self {
        Self {
            required_confirmations: required_confirmations.max(1),
            reported: None,
            candidate: None,
        }
    }

    pub fn reported(&self) -> Option<ApproachPhase> {
        self.reported
    }

    pub fn reset(&mut self) {
        self.reported = None;
        self.candidate = None;
    }

    /// Feed the raw classification of the latest sample and get the phase to report
    pub fn update(&mut self, raw: ApproachPhase) -> ApproachPhase {
        let Some(reported) = self.reported else {
            self.reported = Some(raw);
            return raw;
        };

        if raw == reported {
            self.candidate = None;
            return reported;
        }

        if raw == ApproachPhase::ShortFinal {
            self.reported = Some(raw);
            self.candidate = None;
            return raw;
        }

        let count = match self.candidate {
            Some((phase, count)) if phase == raw => count + 1,
            _ => 1,
        };

        if count >= self.required_confirmations {
            trace!("Phase change confirmed: {} -> {}", reported, raw);
            self.reported = Some(raw);
            self.candidate = None;
            raw
        } else {
            trace!(
                "Holding {} while {} is unconfirmed ({}/{})",
                reported,
                raw,
                count,
                self.required_confirmations
            );
            self.candidate = Some((raw, count));
            reported
        }
    }
}

impl Default for PhaseSmoother {
    fn default() -> Self {
        Self::new(2)
    }
}
