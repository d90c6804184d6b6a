//! Streak and calendar use cases

use crate::domain::streak::days_in_month;
use crate::domain::{StreakCalculator, StreakSummary};
use crate::error::{LightsError, Result};
use crate::infrastructure::{FileSystemRepository, JournalRepository};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// Which days of one month have entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCalendar {
    pub first_day: NaiveDate,
    pub days_in_month: u32,
    pub marked: BTreeSet<u32>,
    /// Day of month to highlight, when `today` falls in this month
    pub today: Option<u32>,
}

/// Parse `YYYY-MM` into the first day of that month
pub fn parse_month(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d").map_err(|_| {
        LightsError::InvalidInput(format!("Invalid month: '{}'. Expected YYYY-MM", input))
    })
}

pub struct ProgressService {
    repository: FileSystemRepository,
}

impl ProgressService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ProgressService { repository }
    }

    pub fn streak(&self, today: NaiveDate) -> Result<StreakSummary> {
        let config = self.repository.load_config()?;
        let entries: Vec<_> = self
            .repository
            .list_entries()?
            .into_iter()
            .map(|stored| stored.entry)
            .collect();

        Ok(StreakCalculator::new(today)
            .with_basis(config.consistency)
            .summarize(&entries))
    }

    /// Calendar for the month containing `month` (any day in it)
    pub fn calendar(&self, month: NaiveDate, today: NaiveDate) -> Result<MonthCalendar> {
        let first_day = month.with_day(1).unwrap_or(month);
        let marked = self
            .repository
            .list_entries()?
            .iter()
            .filter_map(|stored| stored.entry.day())
            .filter(|day| day.year() == first_day.year() && day.month() == first_day.month())
            .map(|day| day.day())
            .collect();

        let today = (today.year() == first_day.year() && today.month() == first_day.month())
            .then(|| today.day());

        Ok(MonthCalendar {
            first_day,
            days_in_month: days_in_month(first_day),
            marked,
            today,
        })
    }
}
