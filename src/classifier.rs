use chrono::{DateTime, Duration, Utc};

use crate::observation::Observation;
use crate::state::StateLabel;

/// Tracks how long the subject has been motionless while present and
/// phone-free. Cleared whenever presence is lost, a phone appears, or motion
/// resumes outside the Drowsy state.
#[derive(Debug, Default)]
pub struct StillnessTracker {
    still_since: Option<DateTime<Utc>>,
}

impl StillnessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn still_since(&self) -> Option<DateTime<Utc>> {
        self.still_since
    }

    fn mark(&mut self, now: DateTime<Utc>) {
        if self.still_since.is_none() {
            self.still_since = Some(now);
        }
    }

    fn clear(&mut self) {
        self.still_since = None;
    }
}

/// Maps one observation to a proposed state.
///
/// Pure apart from the stillness timer; the Debouncer decides whether a
/// proposal becomes authoritative. Priority order: absence beats phone beats
/// stillness.
pub struct Classifier {
    drowsy_after: Duration,
}

impl Classifier {
    pub fn new(drowsy_after: Duration) -> Self {
        Self { drowsy_after }
    }

    /// Returns the proposed state for this frame. Branches that made no
    /// proposal in earlier revisions re-propose `current`, which the
    /// Debouncer treats as a candidate-clearing refresh.
    pub fn classify(
        &self,
        obs: &Observation,
        stillness: &mut StillnessTracker,
        current: StateLabel,
    ) -> StateLabel {
        if !obs.person_present {
            stillness.clear();
            return StateLabel::TidakAdaAktivitas;
        }

        if obs.phone_present {
            stillness.clear();
            return StateLabel::Terdistraksi;
        }

        if !obs.motion_detected {
            match stillness.still_since() {
                None => {
                    stillness.mark(obs.timestamp);
                    current
                }
                Some(since) if obs.timestamp - since >= self.drowsy_after => {
                    StateLabel::Mengantuk
                }
                Some(_) => current,
            }
        } else if current == StateLabel::Mengantuk {
            // Motion alone does not clear Drowsy; only Absent or Distracted
            // overrides it. Known quirk, kept on purpose.
            current
        } else {
            stillness.clear();
            StateLabel::Fokus
        }
    }
}
