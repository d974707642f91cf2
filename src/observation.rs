use std::io::BufRead;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One per-frame observation as seen by the core.
///
/// Detection and frame differencing happen outside this process; by the time
/// a frame reaches the core it has been reduced to three booleans and a
/// timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub person_present: bool,
    pub phone_present: bool,
    pub motion_detected: bool,
}

/// Blocking per-frame observation feed.
///
/// `Ok(None)` means the source is exhausted and the monitoring loop should
/// end. An `Err` is a source failure and also terminates the loop.
pub trait ObservationSource {
    fn next_observation(&mut self) -> Result<Option<Observation>>;
}

/// Wire format for one frame: a single JSON object per line.
///
/// `motion_score` is the raw frame-difference sum from the external motion
/// detector. It is absent on the first frame (nothing to diff against).
#[derive(Debug, Deserialize)]
struct FrameSignals {
    #[serde(default)]
    person: bool,
    #[serde(default)]
    phone: bool,
    #[serde(default)]
    motion_score: Option<u64>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

/// Reads JSON-lines frame signals from any `BufRead`, typically stdin fed by
/// the detector process.
pub struct JsonlSource<R: BufRead> {
    reader: R,
    motion_threshold: u64,
    line_no: u64,
}

impl<R: BufRead> JsonlSource<R> {
    pub fn new(reader: R, motion_threshold: u64) -> Self {
        Self {
            reader,
            motion_threshold,
            line_no: 0,
        }
    }
}

impl<R: BufRead> ObservationSource for JsonlSource<R> {
    fn next_observation(&mut self) -> Result<Option<Observation>> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .context("failed to read observation stream")?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }

            let signals: FrameSignals = serde_json::from_str(line.trim())
                .with_context(|| format!("malformed observation on line {}", self.line_no))?;

            // No score means no prior frame to diff against; fail open to
            // motion rather than ramping the stillness timer.
            let motion_detected = signals
                .motion_score
                .map(|score| score > self.motion_threshold)
                .unwrap_or(true);

            return Ok(Some(Observation {
                timestamp: signals.timestamp.unwrap_or_else(Utc::now),
                person_present: signals.person,
                phone_present: signals.phone,
                motion_detected,
            }));
        }
    }
}
