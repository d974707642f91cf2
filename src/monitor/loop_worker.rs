use anyhow::Result;
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::activity_log::ActivityLog;
use crate::classifier::{Classifier, StillnessTracker};
use crate::config::MonitorConfig;
use crate::observation::ObservationSource;
use crate::pomodoro::PomodoroTimer;
use crate::stabilizer::Stabilizer;
use crate::state::StateLabel;

const HEARTBEAT_EVERY_FRAMES: u64 = 30;

#[derive(Debug, Clone, Copy)]
pub struct MonitorSummary {
    pub frames: u64,
    pub transitions: u64,
    pub final_state: StateLabel,
}

/// Sequential per-frame loop: observe, classify, stabilize, log confirmed
/// transitions, tick the pomodoro. All core state lives on this one thread;
/// the cancellation token is checked once per iteration and the loop ends on
/// its own when the source runs dry.
pub fn monitor_loop<S: ObservationSource>(
    mut source: S,
    config: &MonitorConfig,
    log: &mut ActivityLog,
    cancel_token: &CancellationToken,
) -> Result<MonitorSummary> {
    let classifier = Classifier::new(config.drowsy_after());
    let mut stillness = StillnessTracker::new();
    // Both clocks anchor on the first frame so replayed streams behave the
    // same as live ones.
    let mut stabilizer: Option<Stabilizer> = None;
    let mut pomodoro: Option<PomodoroTimer> = None;

    let mut frames: u64 = 0;
    let mut transitions: u64 = 0;

    while !cancel_token.is_cancelled() {
        let Some(obs) = source.next_observation()? else {
            info!("observation source exhausted");
            break;
        };
        let now = obs.timestamp;

        let stabilizer = stabilizer
            .get_or_insert_with(|| Stabilizer::new(config.stable_time(), now));
        let pomodoro = pomodoro.get_or_insert_with(|| {
            PomodoroTimer::new(config.focus_duration(), config.break_duration(), now)
        });

        let proposal = classifier.classify(&obs, &mut stillness, stabilizer.current());
        if let Some(confirmed) = stabilizer.observe(proposal, now) {
            if confirmed == StateLabel::Mengantuk {
                warn!("drowsiness detected");
            }
            if log.record(confirmed, now)? {
                transitions += 1;
            }
        }

        let snapshot = pomodoro.tick(now);
        frames += 1;
        if frames % HEARTBEAT_EVERY_FRAMES == 0 {
            info!(
                "status={} pomodoro={} remaining={} motion={}",
                stabilizer.current(),
                snapshot.mode.as_str(),
                snapshot.format_remaining(),
                obs.motion_detected,
            );
        }
    }

    let final_state = stabilizer
        .map(|s| s.current())
        .unwrap_or(StateLabel::Fokus);
    Ok(MonitorSummary {
        frames,
        transitions,
        final_state,
    })
}
