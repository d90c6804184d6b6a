//! Config management use case

use crate::domain::ConsistencyBasis;
use crate::error::{LightsError, Result};
use crate::infrastructure::{Config, FileSystemRepository, JournalRepository};
use std::str::FromStr;

pub const VALID_KEYS: &str = "name, editor, consistency";

/// Service for managing journal configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "name" => Ok(config.name),
            "editor" => Ok(config.editor),
            "consistency" => Ok(config.consistency.to_string()),
            _ => Err(LightsError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, VALID_KEYS
            ))),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "name" => {
                if value.trim().is_empty() {
                    return Err(LightsError::Config("Name cannot be empty".to_string()));
                }
                config.name = value.trim().to_string();
            }
            "editor" => {
                config.editor = value.to_string();
            }
            "consistency" => {
                config.consistency = ConsistencyBasis::from_str(value).map_err(LightsError::Config)?;
            }
            "created" => {
                return Err(LightsError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(LightsError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, VALID_KEYS
                )));
            }
        }

        self.repository.save_config(&config)?;
        log::info!("Config '{}' updated", key);
        Ok(())
    }

    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
