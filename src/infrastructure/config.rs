//! Configuration management

use crate::domain::ConsistencyBasis;
use crate::error::{LightsError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const LIGHTS_DIR: &str = ".lights";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Journal owner; recorded as the user id of every entry
    pub name: String,
    pub editor: String,
    #[serde(default)]
    pub consistency: ConsistencyBasis,
    pub created: DateTime<Utc>,
}

impl Config {
    pub fn new(name: &str) -> Self {
        Config {
            name: name.to_string(),
            editor: Self::detect_default_editor(),
            consistency: ConsistencyBasis::default(),
            created: Utc::now(),
        }
    }

    /// Load config from .lights/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(LIGHTS_DIR).join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LightsError::NotLightsDirectory(path.to_path_buf())
            } else {
                LightsError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| LightsError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .lights/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let lights_dir = path.join(LIGHTS_DIR);
        if !lights_dir.exists() {
            fs::create_dir(&lights_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| LightsError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(lights_dir.join(CONFIG_FILE), contents)?;
        Ok(())
    }

    /// Editor command: `EDITOR`, then `VISUAL`, then the configured value
    pub fn get_editor(&self) -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| self.editor.clone())
    }

    fn detect_default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(windows) {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_config() {
        let config = Config::new("sam");
        assert_eq!(config.name, "sam");
        assert_eq!(config.consistency, ConsistencyBasis::Elapsed);
        assert!(!config.editor.is_empty());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::new("sam");
        config.consistency = ConsistencyBasis::Month;

        config.save_to_dir(temp.path()).unwrap();
        assert!(temp.path().join(".lights/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.name, "sam");
        assert_eq!(loaded.consistency, ConsistencyBasis::Month);
        assert_eq!(loaded.created, config.created);
    }

    #[test]
    fn test_consistency_defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(LIGHTS_DIR)).unwrap();
        fs::write(
            temp.path().join(".lights/config.toml"),
            "name = \"sam\"\neditor = \"vim\"\ncreated = \"2025-01-01T00:00:00Z\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.consistency, ConsistencyBasis::Elapsed);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        match Config::load_from_dir(temp.path()).unwrap_err() {
            LightsError::NotLightsDirectory(_) => {}
            other => panic!("Expected NotLightsDirectory, got {:?}", other),
        }
    }

    #[test]
    fn test_load_garbled_config() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(LIGHTS_DIR)).unwrap();
        fs::write(temp.path().join(".lights/config.toml"), "name = ").unwrap();
        assert!(matches!(
            Config::load_from_dir(temp.path()),
            Err(LightsError::Config(_))
        ));
    }
}
