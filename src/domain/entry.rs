//! Journal entries and their on-disk document format

use crate::domain::chakra::Chakra;
use crate::domain::emotion::is_known_emotion;
use crate::domain::sentiment;
use chrono::{DateTime, FixedOffset, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

const FRONT_MATTER_FENCE: &str = "+++";

/// Shown wherever an entry's timestamp could not be parsed
pub const INVALID_DATE: &str = "Invalid date";

fn tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"#([a-zA-Z0-9_-]+)").unwrap())
}

/// Extract hashtags from text, lowercased, deduplicated and sorted
pub fn extract_tags(text: &str) -> Vec<String> {
    let tags: BTreeSet<String> = tag_regex()
        .captures_iter(text)
        .map(|cap| cap[1].to_lowercase())
        .collect();
    tags.into_iter().collect()
}

/// Creation time of an entry, preserving values that failed to parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryTimestamp {
    Valid(DateTime<FixedOffset>),
    Invalid(String),
}

impl EntryTimestamp {
    pub fn parse(raw: &str) -> Self {
        DateTime::parse_from_rfc3339(raw.trim())
            .map(EntryTimestamp::Valid)
            .unwrap_or_else(|_| EntryTimestamp::Invalid(raw.to_string()))
    }

    /// Calendar day in the offset the entry was written in
    pub fn day(&self) -> Option<NaiveDate> {
        match self {
            EntryTimestamp::Valid(dt) => Some(dt.date_naive()),
            EntryTimestamp::Invalid(_) => None,
        }
    }

    fn raw(&self) -> String {
        match self {
            EntryTimestamp::Valid(dt) => dt.to_rfc3339(),
            EntryTimestamp::Invalid(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for EntryTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryTimestamp::Valid(dt) => write!(f, "{}", dt.format("%d-%m-%Y %H:%M")),
            EntryTimestamp::Invalid(_) => f.write_str(INVALID_DATE),
        }
    }
}

/// A single journal entry. Immutable once written.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: EntryTimestamp,
    pub sentiment_score: f64,
    pub emotion_tags: Vec<String>,
    pub chakra_tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct FrontMatter {
    id: String,
    #[serde(default)]
    user_id: String,
    created_at: String,
    #[serde(default)]
    sentiment_score: Option<f64>,
    #[serde(default)]
    emotion_tags: Option<Vec<String>>,
    #[serde(default)]
    chakra_tags: Option<Vec<String>>,
}

impl JournalEntry {
    /// Build a new entry from its body, deriving tags and sentiment from the text
    pub fn compose(
        id: String,
        user_id: String,
        content: String,
        created_at: DateTime<FixedOffset>,
    ) -> Self {
        let mut entry = JournalEntry {
            id,
            user_id,
            content,
            created_at: EntryTimestamp::Valid(created_at),
            sentiment_score: 0.0,
            emotion_tags: Vec::new(),
            chakra_tags: Vec::new(),
        };
        entry.derive_annotations();
        entry
    }

    fn derive_annotations(&mut self) {
        let tags = extract_tags(&self.content);
        self.emotion_tags = tags
            .iter()
            .filter(|t| is_known_emotion(t))
            .cloned()
            .collect();
        let chakras: BTreeSet<Chakra> = tags.iter().filter_map(|t| Chakra::parse(t)).collect();
        self.chakra_tags = chakras.iter().map(|c| c.key().to_string()).collect();
        self.sentiment_score = sentiment::score(&self.content);
    }

    /// All hashtags in the body
    pub fn tags(&self) -> Vec<String> {
        extract_tags(&self.content)
    }

    pub fn day(&self) -> Option<NaiveDate> {
        self.created_at.day()
    }

    /// First non-empty, non-heading line of the body, shortened for listings
    pub fn preview(&self, max_chars: usize) -> String {
        let line = self
            .content
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty() && !l.starts_with('#'))
            .or_else(|| self.content.lines().map(str::trim).find(|l| !l.is_empty()))
            .unwrap_or("");

        if line.chars().count() > max_chars {
            let cut: String = line.chars().take(max_chars.saturating_sub(3)).collect();
            format!("{}...", cut.trim_end())
        } else {
            line.to_string()
        }
    }

    /// Render as a markdown document with TOML front matter
    pub fn to_document(&self) -> Result<String, toml::ser::Error> {
        let front = FrontMatter {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            created_at: self.created_at.raw(),
            sentiment_score: Some(self.sentiment_score),
            emotion_tags: Some(self.emotion_tags.clone()),
            chakra_tags: Some(self.chakra_tags.clone()),
        };
        let header = toml::to_string(&front)?;

        Ok(format!(
            "{fence}\n{header}{fence}\n\n{body}\n",
            fence = FRONT_MATTER_FENCE,
            header = header,
            body = self.content.trim_end()
        ))
    }

    /// Parse a stored document.
    ///
    /// Files without front matter are still accepted: the id comes from the file stem
    /// and the date from a leading `YYYY-MM-DD` in it. Annotations missing from the
    /// front matter are recomputed from the body.
    /// Files without front matter carry no owner; the repository assigns the journal owner.
    pub fn from_document(stem: &str, document: &str) -> JournalEntry {
        if let Some((front, body)) = split_front_matter(document) {
            match toml::from_str::<FrontMatter>(front) {
                Ok(fm) => {
                    let mut entry = JournalEntry {
                        id: fm.id,
                        user_id: fm.user_id,
                        content: body.trim().to_string(),
                        created_at: EntryTimestamp::parse(&fm.created_at),
                        sentiment_score: 0.0,
                        emotion_tags: Vec::new(),
                        chakra_tags: Vec::new(),
                    };
                    entry.derive_annotations();
                    if let Some(score) = fm.sentiment_score {
                        entry.sentiment_score = score;
                    }
                    if let Some(tags) = fm.emotion_tags {
                        entry.emotion_tags = tags;
                    }
                    if let Some(tags) = fm.chakra_tags {
                        entry.chakra_tags = tags;
                    }
                    return entry;
                }
                Err(e) => {
                    log::debug!("Front matter of '{}' is not valid TOML: {}", stem, e);
                }
            }
        }

        let created_at = stem
            .get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| EntryTimestamp::Valid(dt.and_utc().fixed_offset()))
            .unwrap_or_else(|| EntryTimestamp::Invalid(stem.to_string()));

        let mut entry = JournalEntry {
            id: stem.to_string(),
            user_id: String::new(),
            content: document.trim().to_string(),
            created_at,
            sentiment_score: 0.0,
            emotion_tags: Vec::new(),
            chakra_tags: Vec::new(),
        };
        entry.derive_annotations();
        entry
    }
}

fn split_front_matter(document: &str) -> Option<(&str, &str)> {
    let rest = document.strip_prefix(FRONT_MATTER_FENCE)?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_FENCE {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((front, body));
        }
        offset += line.len();
    }
    None
}
