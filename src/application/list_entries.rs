//! List entries use case

use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, StoredEntry};
use chrono::NaiveDate;

#[derive(Debug, Default, Clone)]
pub struct ListFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
    /// Only entries carrying this hashtag (case-insensitive, leading `#` optional)
    pub tag: Option<String>,
}

/// List entries newest first. Date bounds drop entries with invalid dates.
pub fn list_entries(repository: &FileSystemRepository, filter: &ListFilter) -> Result<Vec<StoredEntry>> {
    let mut entries = repository.list_entries()?;

    if filter.from.is_some() || filter.to.is_some() {
        entries.retain(|stored| match stored.entry.day() {
            Some(day) => filter.from.is_none_or(|f| day >= f) && filter.to.is_none_or(|t| day <= t),
            None => false,
        });
    }

    if let Some(tag) = &filter.tag {
        let wanted = tag.trim_start_matches('#').to_lowercase();
        entries.retain(|stored| stored.entry.tags().contains(&wanted));
    }

    if let Some(n) = filter.limit {
        entries.truncate(n);
    }

    Ok(entries)
}
