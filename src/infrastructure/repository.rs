//! File system repository

use crate::domain::{ChakraProfile, EmotionSample, EntryTimestamp, JournalEntry};
use crate::error::{LightsError, Result};
use crate::infrastructure::config::{Config, LIGHTS_DIR};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory holding one markdown file per entry
pub const JOURNAL_DIR: &str = "journal";
const PROFILE_FILE: &str = "chakras.toml";
const EMOTIONS_FILE: &str = "emotions.toml";

/// An entry together with the file it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntry {
    pub filename: String,
    pub entry: JournalEntry,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct EmotionLog {
    #[serde(default, rename = "sample")]
    samples: Vec<EmotionSample>,
}

/// Abstract repository for journal operations
pub trait JournalRepository {
    fn root(&self) -> &Path;

    fn load_config(&self) -> Result<Config>;

    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .lights directory exists
    fn is_initialized(&self) -> bool;

    /// Create .lights and the journal directory
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of JournalRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Locate the journal: `LIGHTS_ROOT` first, then walk up from the current directory
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("LIGHTS_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_lights_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            }
            return Err(LightsError::Config(format!(
                "LIGHTS_ROOT is set to '{}' but no .lights directory found. \
                Run 'lights init' in that directory or unset LIGHTS_ROOT.",
                path.display()
            )));
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Walk up from `start` until a directory containing .lights is found
    pub fn discover_from(start: &Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| Self::has_lights_dir(dir))
            .map(|dir| FileSystemRepository::new(dir.to_path_buf()))
            .ok_or_else(|| LightsError::NotLightsDirectory(start.to_path_buf()))
    }

    fn has_lights_dir(path: &Path) -> bool {
        path.join(LIGHTS_DIR).is_dir()
    }

    fn lights_path(&self, file: &str) -> PathBuf {
        self.root.join(LIGHTS_DIR).join(file)
    }
}

impl JournalRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_lights_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let lights_dir = self.root.join(LIGHTS_DIR);

        if lights_dir.exists() {
            return Err(LightsError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&lights_dir)?;
        fs::create_dir_all(self.root.join(JOURNAL_DIR))?;
        Ok(())
    }
}

// Entry storage
impl FileSystemRepository {
    /// Pick an unused entry id for the given moment: `YYYY-MM-DD-HHMMSS`, suffixed on collision
    pub fn allocate_entry_id(&self, created_at: &DateTime<FixedOffset>) -> String {
        let base = created_at.format("%Y-%m-%d-%H%M%S").to_string();
        if !self.entry_path(&base).exists() {
            return base;
        }

        (2..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| !self.entry_path(candidate).exists())
            .unwrap_or(base)
    }

    fn entry_path(&self, id: &str) -> PathBuf {
        self.root.join(JOURNAL_DIR).join(format!("{}.md", id))
    }

    /// Persist a new entry. Entries are immutable, so an existing file is an error.
    pub fn write_entry(&self, entry: &JournalEntry) -> Result<String> {
        let path = self.entry_path(&entry.id);
        if path.exists() {
            return Err(LightsError::Config(format!(
                "Entry already exists: {}",
                path.display()
            )));
        }

        let document = entry.to_document()?;
        let filename = format!("{}/{}.md", JOURNAL_DIR, entry.id);
        self.write_text_atomic(&filename, &document)?;
        log::info!("Wrote entry {}", filename);
        Ok(filename)
    }

    /// Every markdown file under journal/, hidden directories skipped, newest first.
    /// Entries with invalid dates sort last.
    pub fn list_entries(&self) -> Result<Vec<StoredEntry>> {
        let journal_dir = self.root.join(JOURNAL_DIR);
        if !journal_dir.exists() {
            return Ok(Vec::new());
        }

        let walker = WalkDir::new(&journal_dir).into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || entry
                    .file_name()
                    .to_str()
                    .is_none_or(|name| !name.starts_with('.'))
        });

        let owner = self.load_config().map(|config| config.name).unwrap_or_default();
        let mut entries = Vec::new();
        for item in walker {
            let item = match item {
                Ok(item) => item,
                Err(e) => {
                    log::debug!("Skipping unreadable journal path: {}", e);
                    continue;
                }
            };
            let path = item.path();
            if !item.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(rel) = path.strip_prefix(&self.root) else {
                continue;
            };

            let document = match fs::read_to_string(path) {
                Ok(document) => document,
                Err(e) => {
                    log::debug!("Skipping unreadable entry '{}': {}", stem, e);
                    continue;
                }
            };
            let mut entry = JournalEntry::from_document(stem, &document);
            if entry.user_id.is_empty() {
                entry.user_id = owner.clone();
            }
            if entry.day().is_none() {
                log::debug!("Entry '{}' has an invalid date", stem);
            }
            entries.push(StoredEntry {
                filename: normalize_relative_path(rel),
                entry,
            });
        }

        entries.sort_by(|a, b| match (&a.entry.created_at, &b.entry.created_at) {
            (EntryTimestamp::Valid(x), EntryTimestamp::Valid(y)) => y.cmp(x),
            (EntryTimestamp::Valid(_), _) => std::cmp::Ordering::Less,
            (_, EntryTimestamp::Valid(_)) => std::cmp::Ordering::Greater,
            _ => a.filename.cmp(&b.filename),
        });

        Ok(entries)
    }

    pub fn find_entry(&self, id: &str) -> Result<StoredEntry> {
        self.list_entries()?
            .into_iter()
            .find(|stored| stored.entry.id == id)
            .ok_or_else(|| LightsError::EntryNotFound(id.to_string()))
    }
}

// Chakra profile and emotion log
impl FileSystemRepository {
    /// Stored profile, or the unset default when none has been saved
    pub fn load_profile(&self) -> Result<ChakraProfile> {
        let path = self.lights_path(PROFILE_FILE);
        if !path.exists() {
            return Ok(ChakraProfile::default());
        }
        let contents = fs::read_to_string(&path)?;
        let profile: ChakraProfile = toml::from_str(&contents)?;
        Ok(profile.normalized())
    }

    /// Overwrite the stored profile
    pub fn save_profile(&self, profile: &ChakraProfile) -> Result<()> {
        let contents = toml::to_string_pretty(profile)?;
        self.write_text_atomic(&format!("{}/{}", LIGHTS_DIR, PROFILE_FILE), &contents)?;
        log::info!("Saved chakra profile");
        Ok(())
    }

    pub fn load_emotions(&self) -> Result<Vec<EmotionSample>> {
        let path = self.lights_path(EMOTIONS_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)?;
        let emotion_log: EmotionLog = toml::from_str(&contents)?;
        Ok(emotion_log.samples)
    }

    /// Append samples to the emotion log
    pub fn append_emotions(&self, samples: &[EmotionSample]) -> Result<()> {
        let mut emotion_log = EmotionLog {
            samples: self.load_emotions()?,
        };
        emotion_log.samples.extend_from_slice(samples);

        let contents = toml::to_string_pretty(&emotion_log)?;
        self.write_text_atomic(&format!("{}/{}", LIGHTS_DIR, EMOTIONS_FILE), &contents)?;
        log::info!("Logged {} emotion sample(s)", samples.len());
        Ok(())
    }
}

// Plain files (drafts, reports)
impl FileSystemRepository {
    pub fn read_text(&self, filename: &str) -> Result<String> {
        let path = self.root.join(filename);
        if !path.exists() {
            return Ok(String::new());
        }
        fs::read_to_string(&path).map_err(LightsError::Io)
    }

    pub fn remove_file(&self, filename: &str) -> Result<()> {
        let path = self.root.join(filename);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Write via a temp file in the same directory, then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so the destination is removed first.
    pub fn write_text_atomic(&self, filename: &str, content: &str) -> Result<()> {
        write_atomic(&self.root.join(filename), content)
    }
}

/// Atomic write to an arbitrary path
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_name = format!(
        "{}.lights-tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("file"),
        std::process::id()
    );
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, content)?;

    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn normalize_relative_path(path: &Path) -> String {
    path.iter()
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Chakra;
    use tempfile::TempDir;

    fn at(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    fn initialized() -> (TempDir, FileSystemRepository) {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        repo.save_config(&Config::new("sam")).unwrap();
        (temp, repo)
    }

    fn new_entry(repo: &FileSystemRepository, raw: &str, body: &str) -> JournalEntry {
        let created = at(raw);
        JournalEntry::compose(
            repo.allocate_entry_id(&created),
            "sam".to_string(),
            body.to_string(),
            created,
        )
    }

    #[test]
    fn test_initialize_creates_dirs() {
        let (temp, repo) = initialized();
        assert!(repo.is_initialized());
        assert!(temp.path().join(".lights").is_dir());
        assert!(temp.path().join("journal").is_dir());
    }

    #[test]
    fn test_initialize_twice_fails() {
        let (_temp, repo) = initialized();
        assert!(repo.initialize().is_err());
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let (temp, _repo) = initialized();
        let subdir = temp.path().join("journal").join("deep");
        fs::create_dir_all(&subdir).unwrap();

        let found = FileSystemRepository::discover_from(&subdir).unwrap();
        assert_eq!(found.root, temp.path());
    }

    #[test]
    fn test_discover_fails_without_marker() {
        let temp = TempDir::new().unwrap();
        match FileSystemRepository::discover_from(temp.path()).unwrap_err() {
            LightsError::NotLightsDirectory(_) => {}
            other => panic!("Expected NotLightsDirectory, got {:?}", other),
        }
    }

    #[test]
    fn test_write_and_list_entries_newest_first() {
        let (_temp, repo) = initialized();
        let older = new_entry(&repo, "2025-01-16T08:00:00+00:00", "older");
        let newer = new_entry(&repo, "2025-01-17T08:00:00+00:00", "newer");
        repo.write_entry(&older).unwrap();
        let filename = repo.write_entry(&newer).unwrap();
        assert_eq!(filename, "journal/2025-01-17-080000.md");

        let listed = repo.list_entries().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].entry, newer);
        assert_eq!(listed[1].entry, older);
    }

    #[test]
    fn test_allocate_entry_id_avoids_collisions() {
        let (_temp, repo) = initialized();
        let first = new_entry(&repo, "2025-01-17T08:00:00+00:00", "one");
        repo.write_entry(&first).unwrap();
        let second = new_entry(&repo, "2025-01-17T08:00:00+00:00", "two");
        assert_eq!(second.id, "2025-01-17-080000-2");
        repo.write_entry(&second).unwrap();
        assert_eq!(repo.list_entries().unwrap().len(), 2);
    }

    #[test]
    fn test_write_entry_refuses_overwrite() {
        let (_temp, repo) = initialized();
        let entry = new_entry(&repo, "2025-01-17T08:00:00+00:00", "one");
        repo.write_entry(&entry).unwrap();
        assert!(repo.write_entry(&entry).is_err());
    }

    #[test]
    fn test_list_includes_plain_and_invalid_files() {
        let (temp, repo) = initialized();
        let dir = temp.path().join("journal");
        fs::write(dir.join("2025-01-10-imported.md"), "Imported #calm").unwrap();
        fs::write(dir.join("scratch.md"), "no date here").unwrap();
        fs::write(dir.join("readme.txt"), "ignored").unwrap();
        fs::create_dir_all(dir.join(".hidden")).unwrap();
        fs::write(dir.join(".hidden/2025-01-11-x.md"), "hidden").unwrap();

        let listed = repo.list_entries().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].entry.id, "2025-01-10-imported");
        assert_eq!(listed[1].entry.id, "scratch");
        assert_eq!(listed[1].entry.day(), None);
    }

    #[test]
    fn test_find_entry() {
        let (_temp, repo) = initialized();
        let entry = new_entry(&repo, "2025-01-17T08:00:00+00:00", "found me");
        repo.write_entry(&entry).unwrap();

        assert_eq!(repo.find_entry(&entry.id).unwrap().entry.content, "found me");
        assert!(matches!(
            repo.find_entry("nope"),
            Err(LightsError::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_profile_defaults_to_unset() {
        let (_temp, repo) = initialized();
        assert!(repo.load_profile().unwrap().is_unset());
    }

    #[test]
    fn test_profile_overwritten() {
        let (_temp, repo) = initialized();
        let mut profile = ChakraProfile::default();
        profile.set(Chakra::Heart, 8);
        repo.save_profile(&profile).unwrap();

        profile.set(Chakra::Heart, 3);
        repo.save_profile(&profile).unwrap();

        assert_eq!(repo.load_profile().unwrap().heart, 3);
    }

    #[test]
    fn test_profile_values_clamped_on_load() {
        let (temp, repo) = initialized();
        fs::write(
            temp.path().join(".lights/chakras.toml"),
            "root = 0\nsacral = -2\nsolar_plexus = 5\nheart = 12\nthroat = 300\nthird_eye = 5\ncrown = 5\n",
        )
        .unwrap();
        let profile = repo.load_profile().unwrap();
        assert_eq!(profile.root, 1);
        assert_eq!(profile.sacral, 1);
        assert_eq!(profile.heart, 10);
        assert_eq!(profile.throat, 10);
    }

    #[test]
    fn test_emotion_intensity_clamped_on_load() {
        let (temp, repo) = initialized();
        fs::write(
            temp.path().join(".lights/emotions.toml"),
            "[[sample]]\nemotion = \"joy\"\nintensity = 300\ncreated_at = \"2025-01-17T08:00:00+00:00\"\n\n\
            [[sample]]\nemotion = \"fear\"\nintensity = -4\ncreated_at = \"2025-01-17T09:00:00+00:00\"\n",
        )
        .unwrap();
        let samples = repo.load_emotions().unwrap();
        assert_eq!(samples[0].intensity, 10);
        assert_eq!(samples[1].intensity, 1);
    }

    #[test]
    fn test_list_skips_unreadable_entry() {
        let (temp, repo) = initialized();
        let entry = new_entry(&repo, "2025-01-17T08:00:00+00:00", "still here");
        repo.write_entry(&entry).unwrap();
        fs::write(temp.path().join("journal/2025-01-01-bad.md"), [0xff, 0xfe, 0x41]).unwrap();

        let listed = repo.list_entries().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].entry.content, "still here");
    }

    #[test]
    fn test_plain_files_belong_to_journal_owner() {
        let (temp, repo) = initialized();
        fs::write(temp.path().join("journal/2025-01-10-imported.md"), "Imported").unwrap();

        let listed = repo.list_entries().unwrap();
        assert_eq!(listed[0].entry.user_id, "sam");
    }

    #[test]
    fn test_emotions_append_only() {
        let (_temp, repo) = initialized();
        assert!(repo.load_emotions().unwrap().is_empty());

        let first = EmotionSample::new("joy", 7, at("2025-01-17T08:00:00+01:00"));
        let second = EmotionSample::new("calm", 5, at("2025-01-17T09:00:00+01:00"));
        repo.append_emotions(&[first.clone()]).unwrap();
        repo.append_emotions(&[second.clone()]).unwrap();

        assert_eq!(repo.load_emotions().unwrap(), vec![first, second]);
    }

    #[test]
    fn test_write_text_atomic_replaces() {
        let (_temp, repo) = initialized();
        repo.write_text_atomic("reports/r.md", "one").unwrap();
        repo.write_text_atomic("reports/r.md", "two").unwrap();
        assert_eq!(repo.read_text("reports/r.md").unwrap(), "two");
        repo.remove_file("reports/r.md").unwrap();
        assert_eq!(repo.read_text("reports/r.md").unwrap(), "");
    }
}
