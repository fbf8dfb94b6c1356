use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::file_utils::FileManager;

// @module: Application configuration and credential persistence

/// Persistent application configuration.
///
/// Today this only holds the Hugging Face API token so the user does not have
/// to re-enter it on every run; the translation core itself never reads the
/// config, it receives the token as an argument.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Saved Hugging Face API token, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hf_token: Option<String>,
}

impl Config {
    /// Default location of the config file: `~/.config/srtai/config.json`,
    /// falling back to `~/.srtai.json` when no config dir is available.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("srtai").join("config.json"))
            .or_else(|| dirs::home_dir().map(|d| d.join(".srtai.json")))
            .unwrap_or_else(|| PathBuf::from("srtai.json"))
    }

    /// Load the configuration from the given path, returning defaults when
    /// the file does not exist yet.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save the configuration to the given path, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration")?;
        FileManager::write_to_file(path, &content)
    }
}
