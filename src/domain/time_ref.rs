//! Day references used by `--date`, `--from` and `--to`

use crate::error::{LightsError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// A day expressed relative to a base date, or as a fixed date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeReference {
    /// Signed offset in days from the base date (today = 0, yesterday = -1)
    Offset(i64),
    /// Most recent occurrence of a weekday, today included
    Weekday(Weekday),
    /// Occurrence strictly before the base date
    LastWeekday(Weekday),
    /// Occurrence strictly after the base date
    NextWeekday(Weekday),
    SpecificDate(NaiveDate),
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

impl TimeReference {
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();
        let invalid = || LightsError::InvalidTimeReference(input.to_string());

        match normalized.as_str() {
            "today" | "now" => return Ok(TimeReference::Offset(0)),
            "yesterday" => return Ok(TimeReference::Offset(-1)),
            "tomorrow" => return Ok(TimeReference::Offset(1)),
            _ => {}
        }

        if let Some(day) = parse_weekday(&normalized) {
            return Ok(TimeReference::Weekday(day));
        }
        if let Some(rest) = normalized.strip_prefix("last ") {
            return parse_weekday(rest.trim())
                .map(TimeReference::LastWeekday)
                .ok_or_else(invalid);
        }
        if let Some(rest) = normalized.strip_prefix("next ") {
            return parse_weekday(rest.trim())
                .map(TimeReference::NextWeekday)
                .ok_or_else(invalid);
        }
        if let Some(count) = normalized
            .strip_suffix(" days ago")
            .or_else(|| normalized.strip_suffix(" day ago"))
        {
            return count
                .trim()
                .parse::<u32>()
                .map(|n| TimeReference::Offset(-(n as i64)))
                .map_err(|_| invalid());
        }

        NaiveDate::parse_from_str(&normalized, "%d-%m-%Y")
            .or_else(|_| NaiveDate::parse_from_str(&normalized, "%Y-%m-%d"))
            .map(TimeReference::SpecificDate)
            .map_err(|_| invalid())
    }

    pub fn resolve(&self, base: NaiveDate) -> NaiveDate {
        let base_idx = base.weekday().num_days_from_monday() as i64;
        let distance_back = |target: Weekday| (base_idx - target.num_days_from_monday() as i64).rem_euclid(7);

        match self {
            TimeReference::Offset(days) => base + Duration::days(*days),
            TimeReference::Weekday(target) => base - Duration::days(distance_back(*target)),
            TimeReference::LastWeekday(target) => {
                let back = match distance_back(*target) {
                    0 => 7,
                    n => n,
                };
                base - Duration::days(back)
            }
            TimeReference::NextWeekday(target) => {
                let forward = match (7 - distance_back(*target)) % 7 {
                    0 => 7,
                    n => n,
                };
                base + Duration::days(forward)
            }
            TimeReference::SpecificDate(date) => *date,
        }
    }
}

/// Parse and resolve in one step
pub fn resolve_day(input: &str, base: NaiveDate) -> Result<NaiveDate> {
    TimeReference::parse(input).map(|r| r.resolve(base))
}
