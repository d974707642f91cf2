use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;

/// Tuning constants for the monitor. All values are configuration, not
/// runtime flags; an optional `settings.json` next to the binary overrides
/// the defaults field by field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Seconds a proposed state must persist before it becomes authoritative.
    pub stable_time_secs: u64,
    /// Seconds of stillness before Drowsy is proposed.
    pub drowsy_after_secs: u64,
    /// Raw frame-difference sum above which a frame counts as motion.
    pub motion_threshold: u64,
    pub focus_duration_secs: u64,
    pub break_duration_secs: u64,
    pub log_file: PathBuf,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            stable_time_secs: 2,
            drowsy_after_secs: 6,
            motion_threshold: 20_000,
            focus_duration_secs: 25 * 60,
            break_duration_secs: 5 * 60,
            log_file: PathBuf::from("activity_log.csv"),
        }
    }
}

impl MonitorConfig {
    /// Loads settings from `path` when present, falling back to defaults on
    /// a missing or unreadable file.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(err) => {
                    warn!(
                        "ignoring invalid settings file {}: {err}",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(err) => {
                warn!("failed to read settings file {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn stable_time(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.stable_time_secs as i64)
    }

    pub fn drowsy_after(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.drowsy_after_secs as i64)
    }

    pub fn focus_duration(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.focus_duration_secs as i64)
    }

    pub fn break_duration(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.break_duration_secs as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let config = MonitorConfig::default();
        assert_eq!(config.stable_time_secs, 2);
        assert_eq!(config.drowsy_after_secs, 6);
        assert_eq!(config.motion_threshold, 20_000);
        assert_eq!(config.focus_duration_secs, 1500);
        assert_eq!(config.break_duration_secs, 300);
        assert_eq!(config.log_file, PathBuf::from("activity_log.csv"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = MonitorConfig::load_or_default(&dir.path().join("settings.json"));
        assert_eq!(config.stable_time_secs, 2);
    }

    #[test]
    fn partial_settings_override_only_named_fields() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"stable_time_secs": 5, "log_file": "custom.csv"}"#).unwrap();

        let config = MonitorConfig::load_or_default(&path);
        assert_eq!(config.stable_time_secs, 5);
        assert_eq!(config.log_file, PathBuf::from("custom.csv"));
        assert_eq!(config.drowsy_after_secs, 6);
    }

    #[test]
    fn invalid_json_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        fs::write(&path, "{broken").unwrap();

        let config = MonitorConfig::load_or_default(&path);
        assert_eq!(config.motion_threshold, 20_000);
    }
}
