//! Markdown progress report

use crate::domain::{aggregate, EmotionReading, Period, StreakCalculator};
use crate::error::Result;
use crate::infrastructure::repository::write_atomic;
use crate::infrastructure::{FileSystemRepository, JournalRepository};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::Path;

const RECENT_WEEKS: usize = 4;
const TOP_TAGS: usize = 5;

pub struct ReportService {
    repository: FileSystemRepository,
}

impl ReportService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ReportService { repository }
    }

    /// Render the report as of `today`
    pub fn build(&self, today: NaiveDate) -> Result<String> {
        let config = self.repository.load_config()?;
        let entries: Vec<_> = self
            .repository
            .list_entries()?
            .into_iter()
            .map(|stored| stored.entry)
            .collect();
        let profile = self.repository.load_profile()?;
        let samples = self.repository.load_emotions()?;

        let summary = StreakCalculator::new(today)
            .with_basis(config.consistency)
            .summarize(&entries);

        let mut out = String::new();
        out.push_str("# Scattered Lights progress report\n");
        out.push('\n');
        out.push_str(&format!("{} · {}\n", config.name, today.format("%B %d, %Y")));
        out.push('\n');

        out.push_str("## Journaling\n");
        out.push('\n');
        out.push_str(&format!("- Entries: {}\n", entries.len()));
        out.push_str(&format!("- Current streak: {} day(s)\n", summary.current));
        out.push_str(&format!("- Longest streak: {} day(s)\n", summary.longest));
        out.push_str(&format!(
            "- Consistency this month: {}% ({})\n",
            summary.consistency, config.consistency
        ));
        if !entries.is_empty() {
            let avg = entries.iter().map(|e| e.sentiment_score).sum::<f64>() / entries.len() as f64;
            out.push_str(&format!("- Average sentiment: {:+.2}\n", avg));
        }
        out.push('\n');

        out.push_str("## Chakra balance\n");
        out.push('\n');
        if profile.is_unset() {
            out.push_str("No assessment yet. Run `lights assess --quiz` to take one.\n");
        } else {
            out.push_str("| Chakra | Value | Status |\n");
            out.push_str("|---|---|---|\n");
            for reading in profile.readings() {
                let name = reading.chakra.map(|c| c.info().name).unwrap_or("?");
                out.push_str(&format!("| {} | {}/10 | {} |\n", name, reading.value, reading.status));
            }
        }
        out.push('\n');

        out.push_str("## Emotions by week\n");
        out.push('\n');
        let readings: Vec<EmotionReading> = samples.iter().map(EmotionReading::from).collect();
        let points = aggregate(&readings, Period::Week);
        if points.is_empty() {
            out.push_str("No emotions logged yet.\n");
        } else {
            let recent = &points[points.len().saturating_sub(RECENT_WEEKS)..];
            for point in recent {
                let scores: Vec<String> = point
                    .scores
                    .iter()
                    .filter(|(_, v)| **v > 0.0)
                    .map(|(k, v)| format!("{} {:.1}", k, v))
                    .collect();
                out.push_str(&format!("- {}: {}\n", point.period, scores.join(", ")));
            }
        }
        out.push('\n');

        out.push_str("## Top tags\n");
        out.push('\n');
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for entry in &entries {
            for tag in entry.tags() {
                *counts.entry(tag).or_default() += 1;
            }
        }
        if counts.is_empty() {
            out.push_str("No tags used yet.\n");
        } else {
            let mut ranked: Vec<_> = counts.into_iter().collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (tag, count) in ranked.into_iter().take(TOP_TAGS) {
                out.push_str(&format!("- #{} ({})\n", tag, count));
            }
        }

        Ok(out)
    }

    /// Write the report to `path` as given; the CLI resolves relative paths against the working directory
    pub fn write(&self, today: NaiveDate, path: &Path) -> Result<()> {
        let report = self.build(today)?;
        write_atomic(path, &report)?;
        log::info!("Report written to {}", path.display());
        Ok(())
    }
}
