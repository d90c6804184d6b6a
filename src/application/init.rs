//! Initialize journal use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, JournalRepository};
use std::fs;
use std::path::Path;

/// Create `.lights/`, the journal directory and a default config at `path`
pub fn init(path: &Path, name: &str) -> Result<Config> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;

    let config = Config::new(name);
    repo.save_config(&config)?;

    log::info!("Initialized journal at {}", path.display());
    Ok(config)
}

/// Owner name when none is given: the login user, or "me"
pub fn default_name() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .ok()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "me".to_string())
}
