use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReleaseError, Result};

const CONFIG_FILE_NAME: &str = "cut-release.toml";

/// Represents the complete configuration for cut-release.
///
/// Contains the editor invocation, the upstream GitHub repository, the release
/// file layout and the commit identity.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub git: GitConfig,
}

fn default_editor_command() -> String {
    "code --wait".to_string()
}

/// Configuration for the release notes editor.
///
/// The command is split on whitespace and the notes file path is appended as
/// the last argument.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EditorConfig {
    #[serde(default = "default_editor_command")]
    pub command: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            command: default_editor_command(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_repository() -> String {
    "microsoft/azure-pipelines-agent".to_string()
}

fn default_token_env() -> Option<String> {
    Some("GITHUB_TOKEN".to_string())
}

fn default_timeout_secs() -> u64 {
    30
}

/// Configuration for the upstream GitHub repository.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// `<owner>/<name>`
    #[serde(default = "default_repository")]
    pub repository: String,

    /// Environment variable holding an optional API token
    #[serde(default = "default_token_env")]
    pub token_env: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: default_api_url(),
            repository: default_repository(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_version_file() -> String {
    "src/agentversion".to_string()
}

fn default_notes_file() -> String {
    "releaseNote.md".to_string()
}

fn default_branch_prefix() -> String {
    "releases/".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Configuration for the release layout, relative to the repository root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_version_file")]
    pub version_file: String,

    #[serde(default = "default_notes_file")]
    pub notes_file: String,

    #[serde(default = "default_branch_prefix")]
    pub branch_prefix: String,

    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            version_file: default_version_file(),
            notes_file: default_notes_file(),
            branch_prefix: default_branch_prefix(),
            remote: default_remote(),
        }
    }
}

impl ReleaseConfig {
    /// Name of the release branch for a version
    pub fn branch_name(&self, version: &str) -> String {
        format!("{}{}", self.branch_prefix, version)
    }
}

fn default_user_name() -> String {
    "azure-pipelines-bot".to_string()
}

fn default_user_email() -> String {
    "azure-pipelines-bot@microsoft.com".to_string()
}

/// Identity used for the release commit.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_user_name")]
    pub user_name: String,

    #[serde(default = "default_user_email")]
    pub user_email: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            user_name: default_user_name(),
            user_email: default_user_email(),
        }
    }
}

/// Parses configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).map_err(|e| ReleaseError::config(e.to_string()))?;

    if config.editor.command.split_whitespace().next().is_none() {
        return Err(ReleaseError::config("editor.command must not be empty"));
    }
    if config.github.repository.split('/').filter(|s| !s.is_empty()).count() != 2 {
        return Err(ReleaseError::config(format!(
            "github.repository must be '<owner>/<name>', got '{}'",
            config.github.repository
        )));
    }

    Ok(config)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `cut-release.toml` in current directory
/// 3. `cut-release.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}
