use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Weekday};

use crate::state::StateLabel;

use super::log_reader::LogEntry;
use super::tables::ActivityTables;

const TOP_HOURS: usize = 3;
const MAX_AVOID_HOURS: usize = 3;

/// Derived statistics and recommendations for one analysis run.
#[derive(Debug)]
pub struct AnalysisReport {
    pub total_events: usize,
    pub period: Option<(NaiveDateTime, NaiveDateTime)>,
    /// (label, event count, percentage of all events), in label order.
    pub status_totals: Vec<(StateLabel, u64, f64)>,
    pub peak_focus: Option<(u32, u64)>,
    pub peak_drowsy: Option<(u32, u64)>,
    /// (hour, count in that hour, total distraction events).
    pub peak_distracted: Option<(u32, u64, u64)>,
    pub best_weekday: Option<(Weekday, u64)>,
    pub worst_weekday: Option<(Weekday, u64)>,
    pub top_focus_hours: Vec<(u32, u64)>,
    pub avoid_hours: Vec<u32>,
}

impl AnalysisReport {
    pub fn build(entries: &[LogEntry], tables: &ActivityTables) -> Self {
        let period = match (
            entries.iter().map(|e| e.timestamp).min(),
            entries.iter().map(|e| e.timestamp).max(),
        ) {
            (Some(first), Some(last)) => Some((first, last)),
            _ => None,
        };

        let status_totals = StateLabel::ALL
            .iter()
            .map(|label| {
                let total = tables.status_total(*label);
                let percentage = if entries.is_empty() {
                    0.0
                } else {
                    total as f64 / entries.len() as f64 * 100.0
                };
                (*label, total, percentage)
            })
            .collect();

        let peak_distracted = tables.peak_hour(StateLabel::Terdistraksi).map(
            |(hour, count)| (hour, count, tables.status_total(StateLabel::Terdistraksi)),
        );
        let extremes = tables.focus_weekday_extremes();

        Self {
            total_events: entries.len(),
            period,
            status_totals,
            peak_focus: tables.peak_hour(StateLabel::Fokus),
            peak_drowsy: tables.peak_hour(StateLabel::Mengantuk),
            peak_distracted,
            best_weekday: extremes.map(|(day, count, _, _)| (day, count)),
            worst_weekday: extremes.map(|(_, _, day, count)| (day, count)),
            top_focus_hours: tables.top_hours(StateLabel::Fokus, TOP_HOURS),
            avoid_hours: tables.avoid_hours(MAX_AVOID_HOURS),
        }
    }

    /// Renders the report text the analyzer both prints and saves.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(70);

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "FOKUSWATCH - ANALYSIS REPORT");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out);
        let _ = writeln!(out, "Total data points: {}", self.total_events);
        if let Some((first, last)) = self.period {
            let _ = writeln!(out, "Period: {first} - {last}");
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Activity summary:");
        for (label, total, percentage) in &self.status_totals {
            let _ = writeln!(out, "  {label}: {total} events ({percentage:.1}%)");
        }

        if let Some((hour, count)) = self.peak_focus {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Most productive hour: {} ({count} focus events)",
                hour_window(hour)
            );
            let _ = writeln!(out, "  Schedule demanding work in this window.");
        }

        if let Some((hour, count)) = self.peak_drowsy {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Drowsiness-prone hour: {} ({count} events)",
                hour_window(hour)
            );
            let _ = writeln!(out, "  Avoid heavy study sessions in this window.");
        }

        if let Some((hour, count, total)) = self.peak_distracted {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Distraction peak: {} ({count} events, {total} total)",
                hour_window(hour)
            );
            let _ = writeln!(
                out,
                "  Silence the phone or keep it out of reach while studying."
            );
        }

        if let (Some((best, best_count)), Some((worst, worst_count))) =
            (self.best_weekday, self.worst_weekday)
        {
            let _ = writeln!(out);
            let _ = writeln!(out, "Weekly pattern:");
            let _ = writeln!(
                out,
                "  Most productive day: {} ({best_count} focus events)",
                weekday_name(best)
            );
            let _ = writeln!(
                out,
                "  Least productive day: {} ({worst_count} focus events)",
                weekday_name(worst)
            );
        }

        if !self.top_focus_hours.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Top study hours:");
            for (rank, (hour, count)) in self.top_focus_hours.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {}. {} ({count} focus events)",
                    rank + 1,
                    hour_window(*hour)
                );
            }
        }

        if !self.avoid_hours.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Hours to avoid:");
            for hour in &self.avoid_hours {
                let _ = writeln!(out, "  - {}", hour_window(*hour));
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{rule}");
        out
    }

    /// Writes the rendered report to `dir/analysis_<timestamp>.txt` and
    /// returns the path.
    pub fn write_to_dir(&self, dir: &Path, stamped_at: NaiveDateTime) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create report directory {}", dir.display()))?;

        let file_name = format!("analysis_{}.txt", stamped_at.format("%Y%m%d_%H%M%S"));
        let path = dir.join(file_name);
        fs::write(&path, self.render())
            .with_context(|| format!("failed to write report {}", path.display()))?;
        Ok(path)
    }
}

fn hour_window(hour: u32) -> String {
    format!("{hour:02}:00-{:02}:00", (hour + 1) % 24)
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::log_reader::parse_log;

    fn report(log: &str) -> AnalysisReport {
        let entries = parse_log(log);
        let tables = ActivityTables::from_entries(&entries);
        AnalysisReport::build(&entries, &tables)
    }

    #[test]
    fn totals_and_percentages_cover_all_events() {
        let r = report(
            "2025-03-03 09:00:00,Fokus\n\
             2025-03-03 10:00:00,Terdistraksi\n\
             2025-03-03 11:00:00,Fokus\n\
             2025-03-03 12:00:00,Mengantuk\n",
        );
        assert_eq!(r.total_events, 4);
        let focus = r
            .status_totals
            .iter()
            .find(|(label, _, _)| *label == StateLabel::Fokus)
            .unwrap();
        assert_eq!(focus.1, 2);
        assert!((focus.2 - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_log_renders_without_recommendations() {
        let r = report("");
        assert_eq!(r.total_events, 0);
        assert!(r.peak_focus.is_none());
        assert!(r.best_weekday.is_none());
        let text = r.render();
        assert!(text.contains("Total data points: 0"));
        assert!(!text.contains("Most productive hour"));
        assert!(!text.contains("Hours to avoid"));
    }

    #[test]
    fn render_includes_peaks_and_avoid_hours() {
        let r = report(
            "2025-03-03 09:00:00,Fokus\n\
             2025-03-03 09:30:00,Fokus\n\
             2025-03-03 13:00:00,Mengantuk\n\
             2025-03-03 13:30:00,Mengantuk\n\
             2025-03-03 14:00:00,Mengantuk\n\
             2025-03-03 20:00:00,Terdistraksi\n",
        );
        let text = r.render();
        assert!(text.contains("Most productive hour: 09:00-10:00 (2 focus events)"));
        assert!(text.contains("Drowsiness-prone hour: 13:00-14:00 (2 events)"));
        assert!(text.contains("Distraction peak: 20:00-21:00 (1 events, 1 total)"));
        assert!(text.contains("Hours to avoid:"));
        assert!(text.contains("  - 13:00-14:00"));
    }

    #[test]
    fn hour_window_wraps_midnight() {
        assert_eq!(hour_window(23), "23:00-00:00");
    }

    #[test]
    fn writes_timestamped_report_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let r = report("2025-03-03 09:00:00,Fokus\n");
        let stamped = NaiveDateTime::parse_from_str("2025-03-04 08:30:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();

        let path = r.write_to_dir(dir.path(), stamped).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "analysis_20250304_083000.txt"
        );
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("FOKUSWATCH - ANALYSIS REPORT"));
    }
}
