//! Configuration loading from `~/.config/claude-proxmox/config.json`.

use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const CONFIG_DIR: &str = ".config/claude-proxmox";
const CONFIG_FILE: &str = "config.json";

/// Environment variable consulted when no config file exists.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Standard Anthropic API key (sk-ant-api01-...).
    pub api_key: String,
}

impl Config {
    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
            .ok_or(ConfigError::NoHomeDir)
    }

    /// Resolve credentials from the config file, then the environment.
    pub fn load() -> Option<Self> {
        let env_key = std::env::var(API_KEY_ENV).ok();
        match Self::path() {
            Ok(path) => Self::load_from(&path, env_key),
            Err(e) => {
                warn!("{e}");
                Self::from_key(env_key)
            }
        }
    }

    /// Resolve credentials from `path`, falling back to `env_key`.
    ///
    /// A file that cannot be read or parsed is reported and skipped.
    pub fn load_from(path: &Path, env_key: Option<String>) -> Option<Self> {
        if path.exists() {
            match Self::read(path) {
                Ok(config) if !config.api_key.is_empty() => {
                    info!(path = %path.display(), "loaded config file");
                    return Some(config);
                }
                Ok(_) => warn!(path = %path.display(), "config file has an empty api_key"),
                Err(e) => eprintln!("❌ Error loading config: {e}"),
            }
        }

        let config = Self::from_key(env_key);
        if config.is_some() {
            info!("using API key from {API_KEY_ENV}");
        }
        config
    }

    fn from_key(key: Option<String>) -> Option<Self> {
        key.filter(|k| !k.is_empty()).map(|api_key| Self { api_key })
    }

    /// Load configuration from a JSON file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Prompt for a key on the terminal and write it to `path`.
    pub fn create(path: &Path) -> Result<Self, ConfigError> {
        let api_key = prompt_api_key()?;
        Self::create_at(path, &api_key)
    }

    /// Write a config holding `api_key` to `path`, replacing any existing one.
    pub fn create_at(path: &Path, api_key: &str) -> Result<Self, ConfigError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ConfigError::EmptyKey);
        }

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let config = Self {
            api_key: api_key.to_string(),
        };
        let json =
            serde_json::to_string_pretty(&config).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, json)?;

        info!(path = %path.display(), "wrote config file");
        Ok(config)
    }
}

fn prompt_api_key() -> io::Result<String> {
    let mut stdout = io::stdout();
    print!("Enter your Anthropic API key: ");
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("API key must not be empty")]
    EmptyKey,

    #[error("could not determine home directory")]
    NoHomeDir,
}
