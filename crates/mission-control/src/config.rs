// Configuration loading and parsing (mission.toml).
//
// Every key is optional. Lookup order:
// 1. ./config/mission.toml
// 2. <platform config dir>/mission-control/mission.toml
// 3. built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::engine::SelectionTiming;
use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::theme::ThemeId;

/// File name looked up in each config directory.
pub const CONFIG_FILE_NAME: &str = "mission.toml";

/// Upper bound for every selection timing field: one hour.
pub const MAX_TIMING_MS: u64 = 60 * 60 * 1000;

/// Upper bound for `selection.history_capacity`.
pub const MAX_HISTORY_CAPACITY: usize = 1000;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// mission.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub selection: SelectionConfig,
    pub display: DisplayConfig,
    pub roster: RosterConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub tick_interval_ms: u64,
    pub duration_ms: u64,
    pub settle_delay_ms: u64,
    pub history_capacity: usize,
    /// Fixed RNG seed for reproducible draws. Random when absent.
    pub seed: Option<u64>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        SelectionConfig {
            tick_interval_ms: 50,
            duration_ms: 3500,
            settle_delay_ms: 500,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            seed: None,
        }
    }
}

impl SelectionConfig {
    pub fn timing(&self) -> SelectionTiming {
        SelectionTiming {
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            run_duration: Duration::from_millis(self.duration_ms),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Initial theme id. Unknown ids fall back to the default theme.
    pub theme: String,
    /// Try to maximize the terminal window on fullscreen requests.
    pub window_fullscreen: bool,
    /// Render rate of the TUI.
    pub fps: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            theme: ThemeId::default().as_str().to_string(),
            window_fullscreen: false,
            fps: 30,
        }
    }
}

impl DisplayConfig {
    pub fn theme_id(&self) -> ThemeId {
        ThemeId::from_id_or_default(&self.theme)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Candidates present at startup.
    pub candidates: Vec<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse and validate a config file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&text).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Load `config/mission.toml` relative to `base_dir`, or defaults when the
/// file does not exist.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE_NAME);
    if path.is_file() {
        return load_config_file(&path);
    }
    Ok(Config::default())
}

/// Resolve the config file using the standard lookup order.
pub fn load_config() -> Result<Config, ConfigError> {
    let candidates = config_search_paths();
    for path in &candidates {
        if path.is_file() {
            info!("Loading config from {}", path.display());
            return load_config_file(path);
        }
    }
    info!("No config file found, using defaults");
    Ok(Config::default())
}

fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("config").join(CONFIG_FILE_NAME));
    }
    if let Some(dirs) = ProjectDirs::from("", "", "mission-control") {
        paths.push(dirs.config_dir().join(CONFIG_FILE_NAME));
    }
    paths
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let sel = &config.selection;
    if sel.tick_interval_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "selection.tick_interval_ms".into(),
            message: "must be greater than 0".into(),
        });
    }

    if sel.duration_ms < sel.tick_interval_ms {
        return Err(ConfigError::ValidationError {
            field: "selection.duration_ms".into(),
            message: format!(
                "must be at least tick_interval_ms ({}), got {}",
                sel.tick_interval_ms, sel.duration_ms
            ),
        });
    }

    for (field, value) in [
        ("selection.tick_interval_ms", sel.tick_interval_ms),
        ("selection.duration_ms", sel.duration_ms),
        ("selection.settle_delay_ms", sel.settle_delay_ms),
    ] {
        if value > MAX_TIMING_MS {
            return Err(ConfigError::ValidationError {
                field: field.into(),
                message: format!("must be at most {MAX_TIMING_MS} (one hour), got {value}"),
            });
        }
    }

    if !(1..=MAX_HISTORY_CAPACITY).contains(&sel.history_capacity) {
        return Err(ConfigError::ValidationError {
            field: "selection.history_capacity".into(),
            message: format!(
                "must be between 1 and {MAX_HISTORY_CAPACITY} inclusive, got {}",
                sel.history_capacity
            ),
        });
    }

    let fps = config.display.fps;
    if !(1..=120).contains(&fps) {
        return Err(ConfigError::ValidationError {
            field: "display.fps".into(),
            message: format!("must be between 1 and 120 inclusive, got {fps}"),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
