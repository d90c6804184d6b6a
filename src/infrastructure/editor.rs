//! External editor for composing entries

use crate::error::{LightsError, Result};
use std::path::Path;
use std::process::Command;

/// Runs the configured editor on a draft and blocks until it exits
pub struct EditorSession {
    command: String,
}

impl EditorSession {
    pub fn new(editor_command: String) -> Self {
        EditorSession {
            command: editor_command,
        }
    }

    /// Edit `file_path` and wait; a non-zero exit aborts the entry
    pub fn edit_and_wait(&self, file_path: &Path) -> Result<()> {
        let (program, mut args) = self.parse_command()?;
        args.push(file_path.to_string_lossy().to_string());

        log::debug!("Launching editor '{}' with {:?}", program, args);

        #[cfg(windows)]
        let status = Command::new("cmd")
            .arg("/C")
            .arg(&program)
            .args(&args)
            .status();

        #[cfg(not(windows))]
        let status = Command::new(&program).args(&args).status();

        let status = status.map_err(|e| {
            LightsError::Editor(format!("Failed to launch editor '{}': {}", program, e))
        })?;

        if !status.success() {
            return Err(LightsError::Editor(format!(
                "Editor '{}' exited with {}",
                program, status
            )));
        }
        Ok(())
    }

    fn parse_command(&self) -> Result<(String, Vec<String>)> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| LightsError::Editor("No editor configured".to_string()))?
            .to_string();
        let args = parts.map(str::to_string).collect();
        Ok((program, args))
    }
}
