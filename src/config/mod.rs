
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub open_library: OpenLibraryConfig,
    pub dictionary: DictionaryConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OpenLibraryConfig {
    pub base_url: String,
}

impl Default for OpenLibraryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openlibrary.org".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DictionaryConfig {
    pub base_url: String,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.dictionaryapi.dev".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found or could not be created")]
    DirectoryError,
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid HTTP timeout: {0} (must be between 1 and 300 seconds)")]
    InvalidTimeout(u64),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Config {
    /// Load configuration from `config.toml` in the given directory.
    /// A missing file is not an error; defaults are used.
    #[inline]
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        config
            .validate()
            .context("Configuration validation failed")?;

        Ok(config)
    }

    /// Load configuration from the platform config directory.
    #[inline]
    pub fn load_default() -> Result<Self> {
        Self::load(config_dir()?)
    }

    #[inline]
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        self.validate()
            .context("Configuration validation failed before saving")?;

        let config_path = config_dir.as_ref().join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self).map_err(ConfigError::TomlSerialize)?;
        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.open_library.base_url)
            .map_err(|_| ConfigError::InvalidUrl(self.open_library.base_url.clone()))?;
        Url::parse(&self.dictionary.base_url)
            .map_err(|_| ConfigError::InvalidUrl(self.dictionary.base_url.clone()))?;

        if self.http.timeout_seconds == 0 || self.http.timeout_seconds > 300 {
            return Err(ConfigError::InvalidTimeout(self.http.timeout_seconds));
        }

        Ok(())
    }

    #[inline]
    pub fn open_library_url(&self) -> Result<Url> {
        Url::parse(&self.open_library.base_url)
            .context("Failed to parse Open Library base URL from config")
    }

    #[inline]
    pub fn dictionary_url(&self) -> Result<Url> {
        Url::parse(&self.dictionary.base_url)
            .context("Failed to parse dictionary base URL from config")
    }

    #[inline]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }
}

/// Get the configuration directory path, creating it if necessary.
#[inline]
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir()
        .ok_or(ConfigError::DirectoryError)?
        .join("openlibrary-mcp");

    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|_| ConfigError::DirectoryError)?;
    }

    Ok(dir)
}

/// Path to the config file inside `dir`, for display purposes.
#[inline]
pub fn config_file_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}
