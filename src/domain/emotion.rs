//! Emotion samples and period aggregation

use crate::domain::chakra::deserialize_clamped;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Emotions recognized as journal tags, in display order
pub const KNOWN_EMOTIONS: [&str; 8] = [
    "joy",
    "calm",
    "gratitude",
    "love",
    "sadness",
    "anxiety",
    "anger",
    "fear",
];

/// Emotions that weigh on wellbeing when they run high
pub const HEAVY_EMOTIONS: [&str; 4] = ["sadness", "anxiety", "anger", "fear"];

pub fn is_known_emotion(label: &str) -> bool {
    KNOWN_EMOTIONS.contains(&label)
}

/// One logged feeling. Appended, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionSample {
    pub emotion: String,
    #[serde(deserialize_with = "deserialize_clamped")]
    pub intensity: u8,
    pub created_at: DateTime<FixedOffset>,
}

impl EmotionSample {
    /// Normalizes the label to lowercase and clamps intensity into [1, 10]
    pub fn new(emotion: &str, intensity: i64, created_at: DateTime<FixedOffset>) -> Self {
        EmotionSample {
            emotion: emotion.trim().to_lowercase(),
            intensity: intensity.clamp(1, 10) as u8,
            created_at,
        }
    }
}

/// Input to aggregation: several emotion scores recorded at one moment
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionReading {
    pub emotions: BTreeMap<String, f64>,
    pub created_at: DateTime<FixedOffset>,
}

impl From<&EmotionSample> for EmotionReading {
    fn from(sample: &EmotionSample) -> Self {
        EmotionReading {
            emotions: BTreeMap::from([(sample.emotion.clone(), sample.intensity as f64)]),
            created_at: sample.created_at,
        }
    }
}

/// Bucket granularity for trends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    Day,
    #[default]
    Week,
    Month,
}

impl Period {
    /// Sortable label for the bucket containing `date`
    pub fn key(&self, date: NaiveDate) -> String {
        match self {
            Period::Day => date.format("%Y-%m-%d").to_string(),
            Period::Week => {
                let week = date.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            Period::Month => date.format("%Y-%m").to_string(),
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Ok(Period::Day),
            "week" | "weekly" => Ok(Period::Week),
            "month" | "monthly" => Ok(Period::Month),
            _ => Err(format!(
                "Invalid period: '{}'. Valid periods: day, week, month",
                s
            )),
        }
    }
}

/// Averaged emotion scores for one period
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionPoint {
    pub period: String,
    pub scores: BTreeMap<String, f64>,
    pub readings: usize,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Group readings by period and average each emotion.
///
/// An emotion is averaged over the readings in the period that carry it; emotions seen
/// elsewhere but absent from a period are reported as 0. Output is ordered by period.
pub fn aggregate(readings: &[EmotionReading], period: Period) -> Vec<EmotionPoint> {
    let labels: BTreeSet<&str> = readings
        .iter()
        .flat_map(|r| r.emotions.keys().map(String::as_str))
        .collect();

    // period -> label -> (sum, count), plus reading count per period
    let mut buckets: BTreeMap<String, (BTreeMap<&str, (f64, u32)>, usize)> = BTreeMap::new();
    for reading in readings {
        let key = period.key(reading.created_at.date_naive());
        let (sums, count) = buckets.entry(key).or_default();
        *count += 1;
        for (label, score) in &reading.emotions {
            let slot = sums.entry(label.as_str()).or_insert((0.0, 0));
            slot.0 += score;
            slot.1 += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(period, (sums, count))| {
            let scores = labels
                .iter()
                .map(|label| {
                    let avg = match sums.get(label) {
                        Some((sum, n)) if *n > 0 => round2(sum / *n as f64),
                        _ => 0.0,
                    };
                    (label.to_string(), avg)
                })
                .collect();
            EmotionPoint {
                period,
                scores,
                readings: count,
            }
        })
        .collect()
}

/// Mean intensity of the given labels across samples on or after `since`
pub fn mean_intensity(samples: &[EmotionSample], labels: &[&str], since: NaiveDate) -> Option<f64> {
    let values: Vec<f64> = samples
        .iter()
        .filter(|s| s.created_at.date_naive() >= since)
        .filter(|s| labels.contains(&s.emotion.as_str()))
        .map(|s| s.intensity as f64)
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
