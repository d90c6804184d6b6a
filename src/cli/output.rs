//! Output formatting utilities

use crate::application::MonthCalendar;
use crate::domain::recommend::Recommendation;
use crate::domain::{ChakraProfile, EmotionPoint, StreakSummary};
use crate::infrastructure::StoredEntry;
use chrono::Datelike;

const PREVIEW_CHARS: usize = 60;

/// Format a list of entries for display
pub fn format_entry_list(entries: &[StoredEntry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for stored in entries {
        let entry = &stored.entry;
        let date = match entry.day() {
            Some(day) => day.format("%d-%m-%Y").to_string(),
            None => "??-??-????".to_string(),
        };
        output.push_str(&format!(
            "{}  {:+.2}  {}  {}\n",
            date,
            entry.sentiment_score,
            entry.id,
            entry.preview(PREVIEW_CHARS)
        ));
    }
    output
}

/// Format a single entry with its derived metadata
pub fn format_entry(stored: &StoredEntry) -> String {
    let entry = &stored.entry;
    let mut output = format!("{}\n", entry.id);
    output.push_str(&format!("Date:      {}\n", entry.created_at));
    output.push_str(&format!("Sentiment: {:+.2}\n", entry.sentiment_score));
    if !entry.emotion_tags.is_empty() {
        output.push_str(&format!("Emotions:  {}\n", entry.emotion_tags.join(", ")));
    }
    if !entry.chakra_tags.is_empty() {
        output.push_str(&format!("Chakras:   {}\n", entry.chakra_tags.join(", ")));
    }
    output.push('\n');
    output.push_str(entry.content.trim_end());
    output.push('\n');
    output
}

pub fn format_streak(summary: &StreakSummary) -> String {
    let mut output = format!("Current streak: {} day(s)", summary.current);
    if summary.current > 0 && !summary.journaled_today {
        output.push_str(" (write today to keep it going)");
    }
    output.push('\n');
    output.push_str(&format!("Longest streak: {} day(s)\n", summary.longest));
    output.push_str(&format!("Consistency this month: {}%\n", summary.consistency));
    output
}

/// Monday-first month grid; `*` marks journaled days, brackets mark today
pub fn format_calendar(calendar: &MonthCalendar) -> String {
    let mut output = format!("{}\n", calendar.first_day.format("%B %Y"));
    output.push_str(" Mo   Tu   We   Th   Fr   Sa   Su\n");

    let lead = calendar.first_day.weekday().num_days_from_monday() as usize;
    let mut cells: Vec<String> = vec!["     ".to_string(); lead];
    for day in 1..=calendar.days_in_month {
        let mark = if calendar.marked.contains(&day) { '*' } else { ' ' };
        let cell = if calendar.today == Some(day) {
            format!("[{:>2}]{}", day, mark)
        } else {
            format!(" {:>2}{} ", day, mark)
        };
        cells.push(cell);
    }

    for week in cells.chunks(7) {
        output.push_str(week.join("").trim_end());
        output.push('\n');
    }
    output.push_str(&format!(
        "{} of {} days journaled\n",
        calendar.marked.len(),
        calendar.days_in_month
    ));
    output
}

/// Chakra table with status and guidance
pub fn format_profile(profile: &ChakraProfile) -> String {
    if profile.is_unset() {
        return "No assessment yet. Run `lights assess --quiz` or `lights assess root=4 heart=7 ...`"
            .to_string();
    }

    let mut output = String::new();
    for reading in profile.readings() {
        let name = reading.chakra.map(|c| c.info().name).unwrap_or("?");
        output.push_str(&format!(
            "{:<12} {:>2}/10  {:<11}  {}\n",
            name, reading.value, reading.status, reading.guidance
        ));
    }
    if let Some(at) = profile.assessed_at {
        output.push_str(&format!("\nAssessed {}\n", at.format("%Y-%m-%d")));
    }
    output
}

/// One line per period with the non-zero emotion averages
pub fn format_trends(points: &[EmotionPoint]) -> String {
    if points.is_empty() {
        return "No emotions logged yet".to_string();
    }

    let mut output = String::new();
    for point in points {
        let scores: Vec<String> = point
            .scores
            .iter()
            .filter(|(_, v)| **v > 0.0)
            .map(|(k, v)| format!("{} {:.1}", k, v))
            .collect();
        output.push_str(&format!(
            "{:<10}  {}  ({} reading(s))\n",
            point.period,
            scores.join(", "),
            point.readings
        ));
    }
    output
}

pub fn format_recommendations(recommendations: &[Recommendation]) -> String {
    if recommendations.is_empty() {
        return "Nothing to suggest today. Keep doing what you are doing.".to_string();
    }

    recommendations
        .iter()
        .map(|r| format!("- {}\n", r.message()))
        .collect()
}
