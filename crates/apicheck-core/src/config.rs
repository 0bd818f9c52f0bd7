//! Suite configuration (`.ac.json`)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".ac.json";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

/// Suite-wide settings shared by every test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Hostname used by tests that do not set their own
    #[serde(default)]
    pub hostname: String,

    /// Bash script run before the first test
    #[serde(default)]
    pub setup_script: String,

    /// Bash script run after the last test
    #[serde(default)]
    pub cleanup_script: String,

    /// Discard stdout/stderr of setup and cleanup scripts
    #[serde(default)]
    pub mute_script_output: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: f64,
}

fn default_timeout() -> f64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            setup_script: String::new(),
            cleanup_script: String::new(),
            mute_script_output: false,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load config from file. `.toml` files are read as TOML, anything else
    /// as JSON.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?
        };

        if !(config.timeout.is_finite() && config.timeout > 0.0) {
            return Err(ConfigError::Parse(format!(
                "timeout must be a positive number of seconds, got {}",
                config.timeout
            )));
        }
        Ok(config)
    }

    /// Load config, falling back to defaults when the file does not exist.
    /// A config file is optional; a malformed one is still an error.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Load from the default location (`.ac.json`).
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_or_default(Path::new(DEFAULT_CONFIG_FILE))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {0}: {1}")]
    Io(PathBuf, String),
    #[error("Parse error: {0}")]
    Parse(String),
}
