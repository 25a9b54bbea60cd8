//! Interactive review of the composed release notes

use crate::error::{ReleaseError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use tracing::info;

/// Opens the release notes for manual edits and waits until they are done
pub trait NotesEditor {
    fn edit(&self, path: &Path) -> Result<()>;
}

/// Runs an external editor command with the notes path as last argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEditor {
    program: String,
    args: Vec<String>,
}

impl CommandEditor {
    /// Parse an editor command line such as `code --wait`
    ///
    /// The command is split on whitespace; quoting is not interpreted.
    pub fn parse(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| ReleaseError::config("editor command is empty"))?;

        Ok(CommandEditor {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Command line as it will be run for `path`
    pub fn command_line(&self, path: &Path) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line.push(' ');
        line.push_str(&path.display().to_string());
        line
    }
}

impl NotesEditor for CommandEditor {
    /// The editor inherits the terminal. Exit code 0 means the edit is
    /// accepted; any other outcome is an error.
    fn edit(&self, path: &Path) -> Result<()> {
        info!(command = %self.command_line(path), "launching editor");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|e| {
                ReleaseError::editor(format!("Failed to launch '{}': {}", self.program, e))
            })?;

        if !status.success() {
            return Err(ReleaseError::editor(format!(
                "'{}' exited with code {}",
                self.command_line(path),
                status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "none (terminated by signal)".to_string())
            )));
        }

        Ok(())
    }
}

/// Editor stand-in that records the paths it was asked to open
#[derive(Debug, Default)]
pub struct RecordingEditor {
    opened: Mutex<Vec<PathBuf>>,
    fail: bool,
}

impl RecordingEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// An editor that exits with an error
    pub fn failing() -> Self {
        RecordingEditor {
            opened: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().map(|o| o.clone()).unwrap_or_default()
    }
}

impl NotesEditor for RecordingEditor {
    fn edit(&self, path: &Path) -> Result<()> {
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(path.to_path_buf());
        }
        if self.fail {
            return Err(ReleaseError::editor("editor exited with code 1"));
        }
        Ok(())
    }
}
