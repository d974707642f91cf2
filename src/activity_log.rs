use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use log::info;

use crate::state::StateLabel;

pub const LOG_HEADER: &str = "timestamp,status";

// Matches the historical log format: local time with microseconds.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Append-only, deduplicated transition log.
///
/// A row is written only when the confirmed state differs from the last
/// logged one, so the file records state changes rather than a full time
/// series. Each append opens, writes, and closes the file handle; no lock is
/// held between frames.
pub struct ActivityLog {
    path: PathBuf,
    last_logged: Option<StateLabel>,
}

impl ActivityLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_logged: None,
        }
    }

    pub fn last_logged(&self) -> Option<StateLabel> {
        self.last_logged
    }

    /// Appends `(timestamp, state)` if the state changed since the last
    /// write. Returns whether a row was written. Creates the file with its
    /// header first when absent.
    pub fn record(&mut self, state: StateLabel, timestamp: DateTime<Utc>) -> Result<bool> {
        if self.last_logged == Some(state) {
            return Ok(false);
        }

        let needs_header = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open activity log {}", self.path.display()))?;

        if needs_header {
            writeln!(file, "{}", LOG_HEADER)
                .with_context(|| format!("failed to write log header {}", self.path.display()))?;
        }

        let local = timestamp.with_timezone(&Local);
        writeln!(file, "{},{}", local.format(TIMESTAMP_FORMAT), state)
            .with_context(|| format!("failed to append to activity log {}", self.path.display()))?;
        file.flush()
            .with_context(|| format!("failed to flush activity log {}", self.path.display()))?;

        info!("state transition logged: {}", state);
        self.last_logged = Some(state);
        Ok(true)
    }
}
