//! Error types for scattered lights

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the lights application
#[derive(Debug, Error)]
pub enum LightsError {
    #[error("Not a lights journal: {0}")]
    NotLightsDirectory(PathBuf),

    #[error("Invalid time reference: {0}")]
    InvalidTimeReference(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Entry is empty, nothing was saved")]
    EmptyEntry,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl LightsError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            LightsError::NotLightsDirectory(_) => 2,
            LightsError::InvalidTimeReference(_) => 3,
            LightsError::EntryNotFound(_) => 4,
            LightsError::InvalidInput(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            LightsError::NotLightsDirectory(path) => {
                format!(
                    "Not a lights journal: {}\n\n\
                    Suggestions:\n\
                    • Run 'lights init' in this directory to start a journal\n\
                    • Navigate to an existing journal directory\n\
                    • Set LIGHTS_ROOT environment variable to your journal path",
                    path.display()
                )
            }
            LightsError::InvalidTimeReference(ref_str) => {
                format!(
                    "Invalid time reference: '{}'\n\n\
                    Valid time references:\n\
                    • today, yesterday, tomorrow\n\
                    • monday, ..., sunday, last friday, next monday\n\
                    • 3 days ago\n\
                    • Specific dates: DD-MM-YYYY or YYYY-MM-DD\n\n\
                    Examples:\n\
                    lights write --date yesterday \"...\"\n\
                    lights list --from 01-10-2025",
                    ref_str
                )
            }
            LightsError::EntryNotFound(id) => {
                format!(
                    "Entry not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'lights list' to see entry ids",
                    id
                )
            }
            LightsError::InvalidInput(msg) => {
                if msg.contains("chakra") {
                    format!(
                        "{}\n\n\
                        Valid chakras: root, sacral, solar-plexus, heart, throat, third-eye, crown\n\
                        Example: lights assess root=4 heart=8",
                        msg
                    )
                } else if msg.contains("emotion") {
                    format!(
                        "{}\n\n\
                        Expected LABEL=INTENSITY with intensity 1-10\n\
                        Example: lights feel joy=7 anxiety=3",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            LightsError::Editor(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that your editor is installed and in PATH\n\
                    • Set EDITOR environment variable (e.g., export EDITOR=nano)\n\
                    • Configure editor: lights config editor 'vim'\n\
                    • Pass the entry text directly: lights write \"today I...\"",
                    msg
                )
            }
            LightsError::Config(msg) => {
                if msg.contains("consistency") {
                    format!(
                        "{}\n\n\
                        Valid values: elapsed, month\n\
                        Example: lights config consistency month",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using LightsError
pub type Result<T> = std::result::Result<T, LightsError>;
