use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PomodoroMode {
    Focus,
    Break,
}

impl PomodoroMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PomodoroMode::Focus => "Fokus",
            PomodoroMode::Break => "Istirahat",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSnapshot {
    pub mode: PomodoroMode,
    pub remaining_secs: i64,
}

impl PomodoroSnapshot {
    /// `MM:SS` countdown string for display.
    pub fn format_remaining(&self) -> String {
        let mins = self.remaining_secs / 60;
        let secs = self.remaining_secs % 60;
        format!("{:02}:{:02}", mins, secs)
    }
}

/// Alternating Focus/Break countdown, driven purely by wall-clock time.
///
/// Runs independently of the detection state: a drowsy or absent student
/// does not pause the cycle.
#[derive(Debug)]
pub struct PomodoroTimer {
    mode: PomodoroMode,
    phase_start: DateTime<Utc>,
    focus_duration: Duration,
    break_duration: Duration,
}

impl PomodoroTimer {
    pub fn new(focus_duration: Duration, break_duration: Duration, start: DateTime<Utc>) -> Self {
        Self {
            mode: PomodoroMode::Focus,
            phase_start: start,
            focus_duration,
            break_duration,
        }
    }

    pub fn mode(&self) -> PomodoroMode {
        self.mode
    }

    fn duration_of(&self, mode: PomodoroMode) -> Duration {
        match mode {
            PomodoroMode::Focus => self.focus_duration,
            PomodoroMode::Break => self.break_duration,
        }
    }

    /// Advances the timer to `now`. When the current phase has run out the
    /// mode toggles, the phase clock restarts at `now`, and the snapshot
    /// reports the new phase's full duration.
    pub fn tick(&mut self, now: DateTime<Utc>) -> PomodoroSnapshot {
        let elapsed = now - self.phase_start;
        let remaining = self.duration_of(self.mode) - elapsed;

        if remaining <= Duration::zero() {
            self.mode = match self.mode {
                PomodoroMode::Focus => PomodoroMode::Break,
                PomodoroMode::Break => PomodoroMode::Focus,
            };
            self.phase_start = now;
            return PomodoroSnapshot {
                mode: self.mode,
                remaining_secs: self.duration_of(self.mode).num_seconds(),
            };
        }

        PomodoroSnapshot {
            mode: self.mode,
            remaining_secs: remaining.num_seconds(),
        }
    }
}
