//! Common configuration types shared across Double Coin Dispatcher crates

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "dispatcher.toml";

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// UI language for engine-drawn text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(alias = "english")]
    En,
    #[serde(alias = "german", alias = "deutsch")]
    De,
}

impl Language {
    /// Cycle to the next language
    pub fn next(self) -> Self {
        match self {
            Language::En => Language::De,
            Language::De => Language::En,
        }
    }

    /// Short display code
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::De => "DE",
        }
    }

    /// Parse a language code as given on the command line
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Language::En),
            "de" | "german" | "deutsch" => Some(Language::De),
            _ => None,
        }
    }
}

/// Application-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Level selected when the game opens (1-3)
    pub start_level: u8,
    /// Integer window scale for the 800×600 canvas
    pub window_scale: u8,
    pub fullscreen: bool,
    /// Master gain for sound effects (0.0 – 1.0)
    pub volume: f32,
    pub muted: bool,
    pub language: Language,
    /// Directory holding `leaderboard.json`
    pub data_dir: PathBuf,
    pub log_level: String,
    /// File the values were loaded from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            start_level: 1,
            window_scale: 1,
            fullscreen: false,
            volume: 0.3,
            muted: false,
            language: Language::En,
            data_dir: PathBuf::from("."),
            log_level: "info".to_string(),
            source: None,
        }
    }
}

impl AppConfig {
    /// Load a config file. Relative `data_dir` values are resolved against
    /// the directory containing the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg: AppConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if cfg.data_dir.is_relative() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            cfg.data_dir = base.join(&cfg.data_dir);
        }
        tracing::debug!("Loaded config from {}", path.display());
        cfg.source = Some(path.to_path_buf());
        Ok(cfg.sanitized())
    }

    /// Load `path` if given, else `dispatcher.toml` from the working
    /// directory if it exists, else defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.is_file() {
                    Self::load(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Clamp out-of-range values into their valid ranges
    pub fn sanitized(mut self) -> Self {
        self.start_level = self.start_level.clamp(1, 3);
        self.window_scale = self.window_scale.clamp(1, 4);
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            0.3
        };
        if self.log_level.trim().is_empty() {
            self.log_level = "info".to_string();
        }
        self
    }

    /// Full path of the leaderboard file
    pub fn leaderboard_path(&self) -> PathBuf {
        self.data_dir.join("leaderboard.json")
    }
}
