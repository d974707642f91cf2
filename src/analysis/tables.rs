use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Timelike, Weekday};

use crate::state::StateLabel;

use super::log_reader::LogEntry;

/// Transition-event counts per status for one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts([u64; StateLabel::ALL.len()]);

impl StatusCounts {
    fn add(&mut self, state: StateLabel) {
        self.0[index_of(state)] += 1;
    }

    pub fn get(&self, state: StateLabel) -> u64 {
        self.0[index_of(state)]
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }
}

fn index_of(state: StateLabel) -> usize {
    match state {
        StateLabel::Fokus => 0,
        StateLabel::Mengantuk => 1,
        StateLabel::Terdistraksi => 2,
        StateLabel::TidakAdaAktivitas => 3,
    }
}

/// Bucketed transition-event counts. Buckets only exist for hours, dates,
/// and weekdays that actually occur in the log; statistics downstream are
/// computed over present buckets, not a padded axis.
#[derive(Debug, Default)]
pub struct ActivityTables {
    pub hourly: BTreeMap<u32, StatusCounts>,
    pub daily: BTreeMap<NaiveDate, StatusCounts>,
    weekly: BTreeMap<u32, StatusCounts>,
}

impl ActivityTables {
    pub fn from_entries(entries: &[LogEntry]) -> Self {
        let mut tables = Self::default();
        for entry in entries {
            tables
                .hourly
                .entry(entry.timestamp.hour())
                .or_default()
                .add(entry.state);
            tables
                .daily
                .entry(entry.timestamp.date())
                .or_default()
                .add(entry.state);
            tables
                .weekly
                .entry(entry.timestamp.weekday().num_days_from_monday())
                .or_default()
                .add(entry.state);
        }
        tables
    }

    /// Weekday rows in Monday-first order.
    pub fn weekly(&self) -> impl Iterator<Item = (Weekday, &StatusCounts)> + '_ {
        const WEEKDAYS: [Weekday; 7] = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        self.weekly
            .iter()
            .map(|(offset, counts)| (WEEKDAYS[*offset as usize], counts))
    }

    /// Total events of one status across the whole log.
    pub fn status_total(&self, state: StateLabel) -> u64 {
        self.hourly.values().map(|counts| counts.get(state)).sum()
    }

    /// Hour with the most events of `state`; ties resolve to the earliest
    /// hour. None when the status never occurs.
    pub fn peak_hour(&self, state: StateLabel) -> Option<(u32, u64)> {
        if self.status_total(state) == 0 {
            return None;
        }
        let mut best: Option<(u32, u64)> = None;
        for (hour, counts) in &self.hourly {
            let count = counts.get(state);
            if best.map(|(_, c)| count > c).unwrap_or(true) {
                best = Some((*hour, count));
            }
        }
        best
    }

    /// Up to `limit` hours ranked by `state` event count, highest first;
    /// equal counts keep ascending hour order.
    pub fn top_hours(&self, state: StateLabel, limit: usize) -> Vec<(u32, u64)> {
        if self.status_total(state) == 0 {
            return Vec::new();
        }
        let mut rows: Vec<(u32, u64)> = self
            .hourly
            .iter()
            .map(|(hour, counts)| (*hour, counts.get(state)))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        rows.truncate(limit);
        rows
    }

    /// Hours whose Drowsy or Distracted count strictly exceeds that
    /// status's mean across present hours. Sorted ascending, capped at
    /// `limit`.
    pub fn avoid_hours(&self, limit: usize) -> Vec<u32> {
        let mut hours: Vec<u32> = Vec::new();
        for state in [StateLabel::Mengantuk, StateLabel::Terdistraksi] {
            if self.status_total(state) == 0 {
                continue;
            }
            let mean = self.status_total(state) as f64 / self.hourly.len() as f64;
            for (hour, counts) in &self.hourly {
                if counts.get(state) as f64 > mean {
                    hours.push(*hour);
                }
            }
        }
        hours.sort_unstable();
        hours.dedup();
        hours.truncate(limit);
        hours
    }

    /// Best and worst weekday by Focus event count, Monday-first
    /// tie-breaking. None when the log holds no Focus events.
    pub fn focus_weekday_extremes(&self) -> Option<(Weekday, u64, Weekday, u64)> {
        if self.status_total(StateLabel::Fokus) == 0 {
            return None;
        }
        let mut best: Option<(Weekday, u64)> = None;
        let mut worst: Option<(Weekday, u64)> = None;
        for (weekday, counts) in self.weekly() {
            let count = counts.get(StateLabel::Fokus);
            if best.map(|(_, c)| count > c).unwrap_or(true) {
                best = Some((weekday, count));
            }
            if worst.map(|(_, c)| count < c).unwrap_or(true) {
                worst = Some((weekday, count));
            }
        }
        let (best_day, best_count) = best?;
        let (worst_day, worst_count) = worst?;
        Some((best_day, best_count, worst_day, worst_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::log_reader::parse_log;

    fn tables(log: &str) -> ActivityTables {
        ActivityTables::from_entries(&parse_log(log))
    }

    #[test]
    fn counts_transition_events_per_hour() {
        let t = tables(
            "2025-03-03 09:05:00,Fokus\n\
             2025-03-03 09:40:00,Terdistraksi\n\
             2025-03-03 10:05:00,Fokus\n",
        );
        assert_eq!(t.hourly.len(), 2);
        assert_eq!(t.hourly[&9].get(StateLabel::Fokus), 1);
        assert_eq!(t.hourly[&9].get(StateLabel::Terdistraksi), 1);
        assert_eq!(t.hourly[&9].total(), 2);
        assert_eq!(t.hourly[&10].get(StateLabel::Fokus), 1);
    }

    #[test]
    fn weekly_rows_are_monday_first() {
        // 2025-03-02 is a Sunday, 2025-03-03 a Monday, 2025-03-05 a Wednesday.
        let t = tables(
            "2025-03-02 09:00:00,Fokus\n\
             2025-03-05 09:00:00,Fokus\n\
             2025-03-03 09:00:00,Fokus\n",
        );
        let days: Vec<Weekday> = t.weekly().map(|(day, _)| day).collect();
        assert_eq!(days, [Weekday::Mon, Weekday::Wed, Weekday::Sun]);
    }

    #[test]
    fn peak_hour_prefers_earliest_on_ties() {
        let t = tables(
            "2025-03-03 14:00:00,Fokus\n\
             2025-03-03 09:00:00,Fokus\n",
        );
        assert_eq!(t.peak_hour(StateLabel::Fokus), Some((9, 1)));
        assert_eq!(t.peak_hour(StateLabel::Mengantuk), None);
    }

    #[test]
    fn top_hours_rank_by_count_then_hour() {
        let t = tables(
            "2025-03-03 09:00:00,Fokus\n\
             2025-03-03 09:30:00,Fokus\n\
             2025-03-03 11:00:00,Fokus\n\
             2025-03-03 13:00:00,Fokus\n\
             2025-03-03 13:30:00,Fokus\n\
             2025-03-03 15:00:00,Fokus\n",
        );
        assert_eq!(
            t.top_hours(StateLabel::Fokus, 3),
            vec![(9, 2), (13, 2), (11, 1)]
        );
    }

    #[test]
    fn avoid_hours_require_exceeding_the_mean() {
        // Drowsy counts: hour 13 -> 3, hours 9 and 10 -> 1 each. Mean over
        // present hours is 5/3, so only hour 13 qualifies.
        let t = tables(
            "2025-03-03 09:00:00,Mengantuk\n\
             2025-03-03 10:00:00,Mengantuk\n\
             2025-03-03 13:00:00,Mengantuk\n\
             2025-03-03 13:20:00,Mengantuk\n\
             2025-03-03 13:40:00,Mengantuk\n",
        );
        assert_eq!(t.avoid_hours(3), vec![13]);
    }

    #[test]
    fn avoid_hours_union_both_statuses() {
        let t = tables(
            "2025-03-03 09:00:00,Mengantuk\n\
             2025-03-03 13:00:00,Mengantuk\n\
             2025-03-03 13:30:00,Mengantuk\n\
             2025-03-03 20:00:00,Terdistraksi\n\
             2025-03-03 20:30:00,Terdistraksi\n\
             2025-03-03 21:00:00,Terdistraksi\n",
        );
        // Mengantuk mean 3/4 -> hours 9(1) and 13(2) exceed; Terdistraksi
        // mean 3/4 -> hours 20(2) and 21(1) exceed. Cap keeps the first
        // three ascending.
        assert_eq!(t.avoid_hours(3), vec![9, 13, 20]);
    }

    #[test]
    fn evenly_spread_status_yields_no_avoid_hours() {
        let t = tables(
            "2025-03-03 09:00:00,Mengantuk\n\
             2025-03-03 13:00:00,Mengantuk\n",
        );
        assert!(t.avoid_hours(3).is_empty());
    }

    #[test]
    fn focus_weekday_extremes_monday_first_ties() {
        // Monday and Wednesday both have one Focus event; Sunday has two.
        let t = tables(
            "2025-03-03 09:00:00,Fokus\n\
             2025-03-05 09:00:00,Fokus\n\
             2025-03-02 09:00:00,Fokus\n\
             2025-03-02 10:00:00,Fokus\n",
        );
        let (best, best_count, worst, worst_count) = t.focus_weekday_extremes().unwrap();
        assert_eq!((best, best_count), (Weekday::Sun, 2));
        assert_eq!((worst, worst_count), (Weekday::Mon, 1));
    }

    #[test]
    fn no_focus_events_means_no_weekday_extremes() {
        let t = tables("2025-03-03 09:00:00,Mengantuk\n");
        assert!(t.focus_weekday_extremes().is_none());
    }
}
