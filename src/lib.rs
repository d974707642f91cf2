pub mod activity_log;
pub mod analysis;
pub mod classifier;
pub mod config;
pub mod monitor;
pub mod observation;
pub mod pomodoro;
pub mod stabilizer;
pub mod state;

pub use activity_log::ActivityLog;
pub use classifier::{Classifier, StillnessTracker};
pub use config::MonitorConfig;
pub use monitor::{MonitorController, MonitorSummary};
pub use observation::{JsonlSource, Observation, ObservationSource};
pub use pomodoro::{PomodoroMode, PomodoroSnapshot, PomodoroTimer};
pub use stabilizer::Stabilizer;
pub use state::StateLabel;
