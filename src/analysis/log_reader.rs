use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::info;

use crate::state::StateLabel;

/// One parsed activity-log row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime,
    pub state: StateLabel,
}

// The monitor's own format first, then the `T`-separated variant for logs
// produced by other tooling.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Reads and parses the activity log. A missing file is fatal for the
/// analysis run; malformed rows are filtered, not errors.
pub fn read_log(path: &Path) -> Result<Vec<LogEntry>> {
    let contents = fs::read_to_string(path).with_context(|| {
        format!(
            "activity log {} not found; run the monitor first to collect data",
            path.display()
        )
    })?;

    let entries = parse_log(&contents);
    info!("loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Parses log contents, dropping stray header rows, unparseable timestamps,
/// and unknown status strings.
pub fn parse_log(contents: &str) -> Vec<LogEntry> {
    contents.lines().filter_map(parse_row).collect()
}

fn parse_row(line: &str) -> Option<LogEntry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (raw_timestamp, raw_status) = line.split_once(',')?;
    if raw_timestamp == "timestamp" {
        // Repeated header, typically from concatenated logs.
        return None;
    }

    let timestamp = parse_timestamp(raw_timestamp.trim())?;
    let state = StateLabel::from_str(raw_status.trim())?;
    Some(LogEntry { timestamp, state })
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Forward-fill reconstruction: the state in effect at `instant` is the most
/// recent entry at or before it, or none before the first transition.
pub fn state_at(entries: &[LogEntry], instant: NaiveDateTime) -> Option<StateLabel> {
    entries
        .iter()
        .filter(|entry| entry.timestamp <= instant)
        .max_by_key(|entry| entry.timestamp)
        .map(|entry| entry.state)
}
