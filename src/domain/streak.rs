//! Journaling streaks and monthly consistency

use crate::domain::entry::JournalEntry;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Denominator used for the monthly consistency percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyBasis {
    /// Days of the month elapsed so far, including today
    #[default]
    Elapsed,
    /// Every day of the month
    Month,
}

impl FromStr for ConsistencyBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "elapsed" => Ok(ConsistencyBasis::Elapsed),
            "month" => Ok(ConsistencyBasis::Month),
            _ => Err(format!(
                "Invalid consistency basis: '{}'. Valid values: elapsed, month",
                s
            )),
        }
    }
}

impl std::fmt::Display for ConsistencyBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsistencyBasis::Elapsed => f.write_str("elapsed"),
            ConsistencyBasis::Month => f.write_str("month"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakSummary {
    /// Consecutive days ending today, or yesterday when today has no entry yet
    pub current: u32,
    pub journaled_today: bool,
    /// Percentage of the current month with an entry, 0 to 100
    pub consistency: u8,
    /// Longest run of consecutive days anywhere in the history
    pub longest: u32,
    /// Distinct days with at least one entry
    pub active_days: usize,
}

/// Computes streak figures relative to a fixed `today`
#[derive(Debug, Clone, Copy)]
pub struct StreakCalculator {
    today: NaiveDate,
    basis: ConsistencyBasis,
}

impl StreakCalculator {
    pub fn new(today: NaiveDate) -> Self {
        StreakCalculator {
            today,
            basis: ConsistencyBasis::default(),
        }
    }

    pub fn with_basis(mut self, basis: ConsistencyBasis) -> Self {
        self.basis = basis;
        self
    }

    /// Summarize entries. Entries with invalid dates or dated after today are ignored.
    pub fn summarize(&self, entries: &[JournalEntry]) -> StreakSummary {
        self.summarize_days(entries.iter().filter_map(JournalEntry::day))
    }

    pub fn summarize_days<I>(&self, days: I) -> StreakSummary
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let days: BTreeSet<NaiveDate> = days.into_iter().filter(|d| *d <= self.today).collect();

        StreakSummary {
            current: self.current_streak(&days),
            journaled_today: days.contains(&self.today),
            consistency: self.consistency(&days),
            longest: longest_run(&days),
            active_days: days.len(),
        }
    }

    fn current_streak(&self, days: &BTreeSet<NaiveDate>) -> u32 {
        let yesterday = self.today - Duration::days(1);
        let mut cursor = match days.iter().next_back() {
            Some(latest) if *latest == self.today => self.today,
            _ if days.contains(&yesterday) => yesterday,
            _ => return 0,
        };

        let mut streak = 0;
        while days.contains(&cursor) {
            streak += 1;
            cursor -= Duration::days(1);
        }
        streak
    }

    fn consistency(&self, days: &BTreeSet<NaiveDate>) -> u8 {
        let Some(month_start) = self.today.with_day(1) else {
            return 0;
        };
        let in_month = days.range(month_start..=self.today).count();

        let denominator = match self.basis {
            ConsistencyBasis::Elapsed => self.today.day(),
            ConsistencyBasis::Month => days_in_month(self.today),
        };
        if denominator == 0 {
            return 0;
        }

        let pct = (in_month as f64 / denominator as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }
}

fn longest_run(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        run = match previous {
            Some(p) if *day - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(*day);
    }
    longest
}

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (next, NaiveDate::from_ymd_opt(year, month, 1)) {
        (Some(n), Some(first)) => (n - first).num_days() as u32,
        _ => 30,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn entry_at(raw: &str) -> JournalEntry {
        JournalEntry::compose(
            raw.to_string(),
            String::new(),
            "entry".to_string(),
            DateTime::parse_from_rfc3339(raw).unwrap(),
        )
    }

    #[test]
    fn test_empty_history() {
        let summary = StreakCalculator::new(d(2025, 1, 17)).summarize(&[]);
        assert_eq!(summary.current, 0);
        assert_eq!(summary.consistency, 0);
        assert!(!summary.journaled_today);
        assert_eq!(summary.longest, 0);
    }

    #[test]
    fn test_single_entry_today() {
        let entries = vec![entry_at("2025-01-17T09:00:00+00:00")];
        let summary = StreakCalculator::new(d(2025, 1, 17)).summarize(&entries);
        assert_eq!(summary.current, 1);
        assert!(summary.journaled_today);
    }

    #[test]
    fn test_duplicates_on_same_day_count_once() {
        let entries = vec![
            entry_at("2025-01-17T09:00:00+00:00"),
            entry_at("2025-01-17T21:00:00+00:00"),
            entry_at("2025-01-16T21:00:00+00:00"),
        ];
        let summary = StreakCalculator::new(d(2025, 1, 17)).summarize(&entries);
        assert_eq!(summary.current, 2);
        assert_eq!(summary.active_days, 2);
    }

    #[test]
    fn test_streak_from_yesterday_when_today_missing() {
        let days = vec![d(2025, 1, 16), d(2025, 1, 15), d(2025, 1, 14)];
        let summary = StreakCalculator::new(d(2025, 1, 17)).summarize_days(days);
        assert_eq!(summary.current, 3);
        assert!(!summary.journaled_today);
    }

    #[test]
    fn test_gap_breaks_streak() {
        let days = vec![d(2025, 1, 17), d(2025, 1, 16), d(2025, 1, 14), d(2025, 1, 13)];
        let summary = StreakCalculator::new(d(2025, 1, 17)).summarize_days(days);
        assert_eq!(summary.current, 2);
        assert_eq!(summary.longest, 2);
    }

    #[test]
    fn test_stale_history_has_no_current_streak() {
        let days = vec![d(2025, 1, 10), d(2025, 1, 9), d(2025, 1, 8), d(2025, 1, 7)];
        let summary = StreakCalculator::new(d(2025, 1, 17)).summarize_days(days);
        assert_eq!(summary.current, 0);
        assert_eq!(summary.longest, 4);
    }

    #[test]
    fn test_future_days_ignored() {
        let days = vec![d(2025, 1, 20), d(2025, 1, 16)];
        let summary = StreakCalculator::new(d(2025, 1, 17)).summarize_days(days);
        assert_eq!(summary.current, 1);
        assert_eq!(summary.active_days, 1);
    }

    #[test]
    fn test_streak_crosses_month_boundary() {
        let days = vec![d(2025, 2, 1), d(2025, 1, 31), d(2025, 1, 30)];
        let summary = StreakCalculator::new(d(2025, 2, 1)).summarize_days(days);
        assert_eq!(summary.current, 3);
        assert_eq!(summary.consistency, 100);
    }

    #[test]
    fn test_invalid_dates_excluded() {
        let mut broken = entry_at("2025-01-17T09:00:00+00:00");
        broken.created_at = crate::domain::entry::EntryTimestamp::Invalid("??".to_string());
        let summary = StreakCalculator::new(d(2025, 1, 17)).summarize(&[broken]);
        assert_eq!(summary.current, 0);
        assert_eq!(summary.active_days, 0);
    }

    #[test]
    fn test_consistency_elapsed_basis() {
        // 5 of the first 10 days of April
        let days = (1..=10).step_by(2).map(|day| d(2025, 4, day));
        let summary = StreakCalculator::new(d(2025, 4, 10)).summarize_days(days);
        assert_eq!(summary.consistency, 50);
    }

    #[test]
    fn test_consistency_month_basis() {
        let days = (1..=10).step_by(2).map(|day| d(2025, 4, day));
        let summary = StreakCalculator::new(d(2025, 4, 10))
            .with_basis(ConsistencyBasis::Month)
            .summarize_days(days);
        // 5 / 30
        assert_eq!(summary.consistency, 17);
    }

    #[test]
    fn test_consistency_ignores_other_months() {
        let days = vec![d(2025, 3, 31), d(2025, 3, 30), d(2025, 4, 1)];
        let summary = StreakCalculator::new(d(2025, 4, 2)).summarize_days(days);
        assert_eq!(summary.consistency, 50);
    }

    #[test]
    fn test_consistency_in_range_for_full_month() {
        let days = (1..=31).map(|day| d(2025, 1, day));
        let summary = StreakCalculator::new(d(2025, 1, 31)).summarize_days(days);
        assert_eq!(summary.consistency, 100);
        assert_eq!(summary.current, 31);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(d(2024, 2, 10)), 29);
        assert_eq!(days_in_month(d(2025, 2, 10)), 28);
        assert_eq!(days_in_month(d(2025, 12, 31)), 31);
        assert_eq!(days_in_month(d(2025, 4, 1)), 30);
    }

    #[test]
    fn test_parse_basis() {
        assert_eq!("MONTH".parse::<ConsistencyBasis>().unwrap(), ConsistencyBasis::Month);
        assert!("weekly".parse::<ConsistencyBasis>().is_err());
    }
}
