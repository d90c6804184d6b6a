//! Write entry use case

use crate::domain::prompts::{focus_chakra, prompt_for};
use crate::domain::template::strip_guidance;
use crate::domain::{load_template, Chakra, JournalEntry};
use crate::error::{LightsError, Result};
use crate::infrastructure::{
    EditorSession, FileSystemRepository, JournalRepository, StoredEntry,
};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

const DRAFT_FILE: &str = ".lights/draft.md";

/// What to write and when
#[derive(Debug, Default)]
pub struct WriteRequest {
    /// Entry body; `None` opens the editor on a prompt template
    pub text: Option<String>,
    /// Day to file the entry under; defaults to today
    pub date: Option<NaiveDate>,
    /// Prompt focus for the editor template
    pub chakra: Option<Chakra>,
}

/// Service for creating journal entries
pub struct WriteEntryService {
    repository: FileSystemRepository,
    editor: Option<String>,
}

impl WriteEntryService {
    pub fn new(repository: FileSystemRepository) -> Self {
        WriteEntryService {
            repository,
            editor: None,
        }
    }

    /// Use this editor command instead of the environment/config one
    pub fn with_editor(mut self, editor: &str) -> Self {
        self.editor = Some(editor.to_string());
        self
    }

    /// Create an entry. `now` supplies the time of day and UTC offset.
    pub fn execute(&self, request: WriteRequest, now: DateTime<FixedOffset>) -> Result<StoredEntry> {
        let config = self.repository.load_config()?;
        let created_at = stamp_for(request.date, now);

        let content = match request.text {
            Some(text) => text,
            None => {
                let editor = self.editor.clone().unwrap_or_else(|| config.get_editor());
                self.compose_in_editor(&editor, created_at.date_naive(), request.chakra)?
            }
        };

        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(LightsError::EmptyEntry);
        }

        let id = self.repository.allocate_entry_id(&created_at);
        let entry = JournalEntry::compose(id, config.name.clone(), content, created_at);
        let filename = self.repository.write_entry(&entry)?;

        Ok(StoredEntry { filename, entry })
    }

    fn compose_in_editor(
        &self,
        editor: &str,
        date: NaiveDate,
        chakra: Option<Chakra>,
    ) -> Result<String> {
        let chakra = match chakra {
            Some(c) => c,
            None => focus_chakra(date, &self.repository.load_profile()?),
        };
        let scaffold = load_template(self.repository.root())?.render(date, chakra, prompt_for(date, chakra));
        self.repository.write_text_atomic(DRAFT_FILE, &scaffold)?;

        let draft_path = self.repository.root().join(DRAFT_FILE);
        let edited = EditorSession::new(editor.to_string())
            .edit_and_wait(&draft_path)
            .and_then(|_| self.repository.read_text(DRAFT_FILE));
        self.repository.remove_file(DRAFT_FILE)?;
        let edited = edited?;

        let body = strip_guidance(&edited);
        if body.trim() == strip_guidance(&scaffold).trim() {
            log::debug!("Draft left unchanged, discarding");
            return Err(LightsError::EmptyEntry);
        }
        Ok(body)
    }
}

/// Timestamp for an entry filed under `date` (or today) at the current time of day
fn stamp_for(date: Option<NaiveDate>, now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let Some(date) = date else {
        return now;
    };
    now.offset()
        .from_local_datetime(&date.and_time(now.time()))
        .single()
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::Config;
    use tempfile::TempDir;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-01-17T14:32:10+02:00").unwrap()
    }

    fn setup() -> (TempDir, FileSystemRepository) {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        repo.save_config(&Config::new("sam")).unwrap();
        (temp, repo)
    }

    #[test]
    fn test_write_text_entry() {
        let (_temp, repo) = setup();
        let service = WriteEntryService::new(repo.clone());
        let stored = service
            .execute(
                WriteRequest {
                    text: Some("Grateful for the sun. #gratitude #heart".to_string()),
                    ..WriteRequest::default()
                },
                now(),
            )
            .unwrap();

        assert_eq!(stored.filename, "journal/2025-01-17-143210.md");
        assert_eq!(stored.entry.user_id, "sam");
        assert_eq!(stored.entry.emotion_tags, vec!["gratitude".to_string()]);
        assert_eq!(stored.entry.chakra_tags, vec!["heart".to_string()]);
        assert!(stored.entry.sentiment_score > 0.0);
        assert_eq!(repo.list_entries().unwrap().len(), 1);
    }

    #[test]
    fn test_backdated_entry_keeps_time_and_offset() {
        let (_temp, repo) = setup();
        let service = WriteEntryService::new(repo);
        let stored = service
            .execute(
                WriteRequest {
                    text: Some("catching up".to_string()),
                    date: NaiveDate::from_ymd_opt(2025, 1, 15),
                    ..WriteRequest::default()
                },
                now(),
            )
            .unwrap();

        assert_eq!(stored.entry.day(), NaiveDate::from_ymd_opt(2025, 1, 15));
        assert_eq!(stored.entry.id, "2025-01-15-143210");
    }

    #[test]
    fn test_blank_text_rejected() {
        let (_temp, repo) = setup();
        let service = WriteEntryService::new(repo.clone());
        let result = service.execute(
            WriteRequest {
                text: Some("   \n".to_string()),
                ..WriteRequest::default()
            },
            now(),
        );
        assert!(matches!(result, Err(LightsError::EmptyEntry)));
        assert!(repo.list_entries().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_untouched_editor_draft_is_discarded() {
        // `true` exits immediately without changing the draft
        let (temp, repo) = setup();
        let service = WriteEntryService::new(repo.clone()).with_editor("true");
        let result = service.execute(WriteRequest::default(), now());

        assert!(matches!(result, Err(LightsError::EmptyEntry)));
        assert!(!temp.path().join(DRAFT_FILE).exists());
        assert!(repo.list_entries().unwrap().is_empty());
    }

    #[test]
    fn test_stamp_for_today_is_now() {
        assert_eq!(stamp_for(None, now()), now());
    }
}
