use chrono::{DateTime, Duration, Utc};

use crate::state::StateLabel;

/// Debounces per-frame state proposals into a stable confirmed state.
///
/// A proposal must persist unchanged for at least `stable_after` before it
/// replaces the confirmed state; single-frame detector flicker never gets
/// through. Switching proposals mid-dwell restarts the clock.
#[derive(Debug)]
pub struct Stabilizer {
    current: StateLabel,
    candidate: Option<StateLabel>,
    candidate_since: DateTime<Utc>,
    stable_after: Duration,
}

impl Stabilizer {
    pub fn new(stable_after: Duration, start: DateTime<Utc>) -> Self {
        Self {
            current: StateLabel::Fokus,
            candidate: None,
            candidate_since: start,
            stable_after,
        }
    }

    /// The last confirmed state.
    pub fn current(&self) -> StateLabel {
        self.current
    }

    /// Feeds one proposal. Returns `Some(state)` exactly when the proposal
    /// is confirmed, i.e. it has been pending for at least `stable_after`.
    pub fn observe(&mut self, proposal: StateLabel, now: DateTime<Utc>) -> Option<StateLabel> {
        if proposal == self.current {
            // Reaffirmation: drop whatever candidate was pending.
            self.candidate = None;
            self.candidate_since = now;
            return None;
        }

        if self.candidate != Some(proposal) {
            self.candidate = Some(proposal);
            self.candidate_since = now;
            return None;
        }

        if now - self.candidate_since >= self.stable_after {
            self.current = proposal;
            return Some(proposal);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn stabilizer() -> Stabilizer {
        Stabilizer::new(Duration::seconds(2), at(0))
    }

    #[test]
    fn starts_in_focus() {
        assert_eq!(stabilizer().current(), StateLabel::Fokus);
    }

    #[test]
    fn confirms_only_after_dwell_time() {
        let mut s = stabilizer();
        assert_eq!(s.observe(StateLabel::Terdistraksi, at(0)), None);
        assert_eq!(s.observe(StateLabel::Terdistraksi, at(1)), None);
        assert_eq!(s.current(), StateLabel::Fokus);
        assert_eq!(
            s.observe(StateLabel::Terdistraksi, at(2)),
            Some(StateLabel::Terdistraksi)
        );
        assert_eq!(s.current(), StateLabel::Terdistraksi);
    }

    #[test]
    fn switching_candidates_restarts_the_clock() {
        let mut s = stabilizer();
        assert_eq!(s.observe(StateLabel::Terdistraksi, at(0)), None);
        assert_eq!(s.observe(StateLabel::Mengantuk, at(1)), None);
        // Two seconds since the first proposal, but only one since the swap.
        assert_eq!(s.observe(StateLabel::Mengantuk, at(2)), None);
        assert_eq!(
            s.observe(StateLabel::Mengantuk, at(3)),
            Some(StateLabel::Mengantuk)
        );
    }

    #[test]
    fn brief_flicker_never_confirms() {
        let mut s = stabilizer();
        // A A B A A A: B lasts under the dwell time and must not win.
        for secs in 0..2 {
            assert_eq!(s.observe(StateLabel::Fokus, at(secs)), None);
        }
        assert_eq!(s.observe(StateLabel::TidakAdaAktivitas, at(2)), None);
        for secs in 3..6 {
            assert_eq!(s.observe(StateLabel::Fokus, at(secs)), None);
        }
        assert_eq!(s.current(), StateLabel::Fokus);
    }

    #[test]
    fn reaffirmation_clears_pending_candidate() {
        let mut s = stabilizer();
        s.observe(StateLabel::Mengantuk, at(0));
        s.observe(StateLabel::Fokus, at(1));
        // The earlier candidate run must not be resumed.
        assert_eq!(s.observe(StateLabel::Mengantuk, at(2)), None);
        assert_eq!(s.observe(StateLabel::Mengantuk, at(3)), None);
        assert_eq!(
            s.observe(StateLabel::Mengantuk, at(4)),
            Some(StateLabel::Mengantuk)
        );
    }

    #[test]
    fn confirmation_fires_once_per_transition() {
        let mut s = stabilizer();
        s.observe(StateLabel::Terdistraksi, at(0));
        s.observe(StateLabel::Terdistraksi, at(1));
        assert!(s.observe(StateLabel::Terdistraksi, at(2)).is_some());
        // Further matching frames are reaffirmations, not re-confirmations.
        assert_eq!(s.observe(StateLabel::Terdistraksi, at(3)), None);
        assert_eq!(s.observe(StateLabel::Terdistraksi, at(4)), None);
    }
}
