use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

use valentine_types::UiOptions;

use crate::stage::StageTiming;

// Default value function for serde (bool::default() is false, so only true needs a fn)
pub(crate) const fn default_true() -> bool {
    true
}

pub const DEFAULT_RECIPIENT: &str = "Reeze Moodaley";
pub const DEFAULT_ROUTE_DISTANCE_KM: u32 = 898;
pub const DEFAULT_LOADING_MS: u64 = 5000;
pub const DEFAULT_MESSAGE_INTERVAL_MS: u64 = 750;
pub const DEFAULT_LOADING_MESSAGES: [&str; 7] = [
    "$ git init",
    "Fetching remote dependencies...",
    "Resolving emotional conflicts...",
    "Building courage...",
    "Compiling feelings...",
    "Running test suite...",
    "All tests passed ✓",
];

#[derive(Debug, Default, Deserialize)]
pub struct ValentineConfig {
    pub app: Option<AppConfig>,
    pub timing: Option<TimingConfig>,
    pub content: Option<ContentConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for icons and spinners.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Disable the spinner and confetti animation.
    #[serde(default)]
    pub reduced_motion: bool,
    /// Ring the terminal bell for the feedback cue.
    #[serde(default = "default_true")]
    pub sound: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ascii_only: false,
            high_contrast: false,
            reduced_motion: false,
            sound: true,
        }
    }
}

/// ```toml
/// [timing]
/// loading_ms = 5000
/// message_interval_ms = 750
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct TimingConfig {
    pub loading_ms: Option<u64>,
    pub message_interval_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentConfig {
    pub recipient: Option<String>,
    pub route_distance_km: Option<u32>,
    pub loading_messages: Option<Vec<String>>,
}

impl ValentineConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".valentine").join("config.toml"))
}

/// Fully resolved settings for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub ui: UiOptions,
    pub recipient: String,
    pub route_distance_km: u32,
    pub loading_messages: Vec<String>,
    pub reveal_delay: Duration,
    pub message_period: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(None)
    }
}

impl SessionSettings {
    /// Apply config over the defaults, replacing unusable values with defaults.
    #[must_use]
    pub fn from_config(config: Option<&ValentineConfig>) -> Self {
        let app = config.and_then(|c| c.app.as_ref());
        let timing = config.and_then(|c| c.timing.as_ref());
        let content = config.and_then(|c| c.content.as_ref());

        let ui = app.map_or_else(UiOptions::default, |app| UiOptions {
            ascii_only: app.ascii_only,
            high_contrast: app.high_contrast,
            reduced_motion: app.reduced_motion,
            sound: app.sound,
        });

        let reveal_delay = positive_millis(
            "timing.loading_ms",
            timing.and_then(|t| t.loading_ms),
            DEFAULT_LOADING_MS,
        );
        let message_period = positive_millis(
            "timing.message_interval_ms",
            timing.and_then(|t| t.message_interval_ms),
            DEFAULT_MESSAGE_INTERVAL_MS,
        );

        let recipient = content
            .and_then(|c| c.recipient.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_RECIPIENT)
            .to_string();

        let route_distance_km = content
            .and_then(|c| c.route_distance_km)
            .unwrap_or(DEFAULT_ROUTE_DISTANCE_KM);

        let loading_messages = match content.and_then(|c| c.loading_messages.as_ref()) {
            Some(messages) if !messages.is_empty() => messages.clone(),
            Some(_) => {
                tracing::warn!("content.loading_messages is empty; using defaults");
                default_loading_messages()
            }
            None => default_loading_messages(),
        };

        Self {
            ui,
            recipient,
            route_distance_km,
            loading_messages,
            reveal_delay,
            message_period,
        }
    }

    #[must_use]
    pub fn stage_timing(&self) -> StageTiming {
        StageTiming {
            reveal_delay: self.reveal_delay,
            message_period: self.message_period,
            message_count: self.loading_messages.len(),
        }
    }
}

fn default_loading_messages() -> Vec<String> {
    DEFAULT_LOADING_MESSAGES
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn positive_millis(key: &str, value: Option<u64>, default: u64) -> Duration {
    match value {
        Some(0) => {
            tracing::warn!("{key} must be greater than zero; using {default}");
            Duration::from_millis(default)
        }
        Some(ms) => Duration::from_millis(ms),
        None => Duration::from_millis(default),
    }
}
