//! Daily activity streaks
//!
//! A streak counts consecutive calendar days with at least one confirmed
//! recovery. Days are stored as `YYYY-MM-DD` strings.

use chrono::{Local, NaiveDate};
use serde::Serialize;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Streak data stored alongside a wallet's stats
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StreakInfo {
    pub current: u32,
    pub best: u32,
    pub last_activity_day: Option<String>,
}

impl StreakInfo {
    fn last_date(&self) -> Option<NaiveDate> {
        self.last_activity_day
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, DAY_FORMAT).ok())
    }

    /// Active if the last activity was `today` or the day before.
    /// A last day after `today` is not active.
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        match self.last_date() {
            Some(last) => (0..=1).contains(&(today - last).num_days()),
            None => false,
        }
    }

    /// Streak after recording activity on `today`.
    ///
    /// Activity dated before the last recorded day leaves the streak as is.
    pub fn record_activity(&self, today: NaiveDate) -> StreakInfo {
        let current = match self.last_date() {
            Some(last) if last > today => return self.clone(),
            Some(last) if last == today => self.current.max(1),
            Some(last) if (today - last).num_days() == 1 => self.current + 1,
            _ => 1,
        };

        StreakInfo {
            current,
            best: current.max(self.best),
            last_activity_day: Some(day_string(today)),
        }
    }

    /// Streak as displayed on `today`: zero once a day has been missed
    pub fn current_on(&self, today: NaiveDate) -> u32 {
        if self.is_active_on(today) {
            self.current
        } else {
            0
        }
    }
}

pub fn day_string(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Today's local date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DAY_FORMAT).unwrap()
    }

    #[test]
    fn test_first_activity_starts_streak() {
        let s = StreakInfo::default().record_activity(day("2026-03-01"));
        assert_eq!(s.current, 1);
        assert_eq!(s.best, 1);
        assert_eq!(s.last_activity_day.as_deref(), Some("2026-03-01"));
    }

    #[test]
    fn test_consecutive_days_extend() {
        let s = StreakInfo::default()
            .record_activity(day("2026-02-27"))
            .record_activity(day("2026-02-28"))
            .record_activity(day("2026-03-01"));
        assert_eq!(s.current, 3);
        assert_eq!(s.best, 3);
    }

    #[test]
    fn test_same_day_counts_once() {
        let s = StreakInfo::default()
            .record_activity(day("2026-03-01"))
            .record_activity(day("2026-03-01"));
        assert_eq!(s.current, 1);
    }

    #[test]
    fn test_gap_resets_but_keeps_best() {
        let s = StreakInfo::default()
            .record_activity(day("2026-03-01"))
            .record_activity(day("2026-03-02"))
            .record_activity(day("2026-03-05"));
        assert_eq!(s.current, 1);
        assert_eq!(s.best, 2);
    }

    #[test]
    fn test_backdated_activity_keeps_streak() {
        let s = StreakInfo::default()
            .record_activity(day("2026-03-01"))
            .record_activity(day("2026-03-02"))
            .record_activity(day("2026-03-03"));
        let late = s.record_activity(day("2026-02-20"));
        assert_eq!(late, s);
        assert_eq!(late.last_activity_day.as_deref(), Some("2026-03-03"));

        // The next real day still extends the run
        assert_eq!(late.record_activity(day("2026-03-04")).current, 4);
    }

    #[test]
    fn test_last_day_after_today_is_not_active() {
        let s = StreakInfo::default().record_activity(day("2026-03-05"));
        assert!(!s.is_active_on(day("2026-03-01")));
        assert_eq!(s.current_on(day("2026-03-01")), 0);
        assert!(s.is_active_on(day("2026-03-05")));
    }

    #[test]
    fn test_display_drops_stale_streak() {
        let s = StreakInfo::default().record_activity(day("2026-03-01"));
        assert_eq!(s.current_on(day("2026-03-02")), 1);
        assert_eq!(s.current_on(day("2026-03-03")), 0);
    }
}
