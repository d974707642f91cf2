use std::fmt;

use serde::{Deserialize, Serialize};

/// Classified activity state of the monitored student.
///
/// The variants serialize to the exact strings the activity log uses, so the
/// offline analyzer and any log consumer see the same labels the monitor
/// writes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StateLabel {
    /// Present, no phone, moving: actively working.
    Fokus,
    /// Present but motionless past the drowsy threshold.
    Mengantuk,
    /// Phone visible in frame.
    Terdistraksi,
    /// No person detected.
    TidakAdaAktivitas,
}

impl StateLabel {
    /// All labels in log-column order.
    pub const ALL: [StateLabel; 4] = [
        StateLabel::Fokus,
        StateLabel::Mengantuk,
        StateLabel::Terdistraksi,
        StateLabel::TidakAdaAktivitas,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StateLabel::Fokus => "Fokus",
            StateLabel::Mengantuk => "Mengantuk",
            StateLabel::Terdistraksi => "Terdistraksi",
            StateLabel::TidakAdaAktivitas => "Tidak Ada Aktivitas",
        }
    }

    pub fn from_str(value: &str) -> Option<StateLabel> {
        match value {
            "Fokus" => Some(StateLabel::Fokus),
            "Mengantuk" => Some(StateLabel::Mengantuk),
            "Terdistraksi" => Some(StateLabel::Terdistraksi),
            "Tidak Ada Aktivitas" => Some(StateLabel::TidakAdaAktivitas),
            _ => None,
        }
    }
}

impl fmt::Display for StateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
