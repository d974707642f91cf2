use anyhow::{Context, Result};
use log::info;
use tokio_util::sync::CancellationToken;

use crate::activity_log::ActivityLog;
use crate::config::MonitorConfig;
use crate::observation::ObservationSource;

use super::loop_worker::{monitor_loop, MonitorSummary};

/// Owns the monitoring run: spawns the blocking frame loop on its own task
/// and exposes cooperative shutdown through a cancellation token.
pub struct MonitorController {
    cancel_token: CancellationToken,
}

impl MonitorController {
    pub fn new() -> Self {
        Self {
            cancel_token: CancellationToken::new(),
        }
    }

    /// Token handle for wiring external shutdown signals (ctrl-c).
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn request_stop(&self) {
        self.cancel_token.cancel();
    }

    /// Runs the frame loop to completion: source exhaustion, source failure,
    /// or cancellation, whichever comes first.
    pub async fn run<S>(&self, source: S, config: MonitorConfig) -> Result<MonitorSummary>
    where
        S: ObservationSource + Send + 'static,
    {
        info!("monitoring started, logging to {}", config.log_file.display());
        let token = self.cancel_token.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let mut log = ActivityLog::new(&config.log_file);
            monitor_loop(source, &config, &mut log, &token)
        });

        handle
            .await
            .context("monitor loop task failed to join")?
    }
}

impl Default for MonitorController {
    fn default() -> Self {
        Self::new()
    }
}
