//! Application settings management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use super::error::{CoreError, Result};
use super::reading::ReadingRanges;

/// Environment variable pointing at an explicit settings file
pub const SETTINGS_ENV: &str = "QUANTUM_CORE_SETTINGS";

const MIN_INTERVAL_MS: u64 = 100;

/// Smallest window the layout fits in; also the viewport's minimum size
pub const MIN_WINDOW_SIZE: (u32, u32) = (480, 400);

/// Application theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Simulation
    /// Time between ticks while the core is running
    pub tick_interval_ms: u64,
    /// Delay before diagnostics report completion
    pub diagnostics_delay_ms: u64,
    /// Ranges readings are drawn from
    pub ranges: ReadingRanges,

    // Appearance
    pub theme: Theme,
    /// Initial window size
    pub window_size: (u32, u32),

    // Advanced
    /// Enable debug logging
    pub debug_logging: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2000,
            diagnostics_delay_ms: 2000,
            ranges: ReadingRanges::default(),

            theme: Theme::Dark,
            window_size: (800, 600),

            debug_logging: false,
        }
    }
}

impl Settings {
    /// Load settings from `$QUANTUM_CORE_SETTINGS`, then the per-user config file.
    ///
    /// Returns defaults when neither exists. Settings are never written back.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os(SETTINGS_ENV).map(PathBuf::from);
        Self::load_with(explicit, Self::default_path())
    }

    /// An explicit path is always read; the fallback only if it exists
    pub fn load_with(explicit: Option<PathBuf>, fallback: Option<PathBuf>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path,
            None => match fallback {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("No settings file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };
        Self::load_from(&path)
    }

    /// Load and validate settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings =
            serde_json::from_str(&text).map_err(|source| CoreError::SettingsParse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate();
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Per-user settings file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("QuantumCore").join("settings.json"))
    }

    /// Validate settings and fix any invalid values
    pub fn validate(&mut self) {
        self.tick_interval_ms = self.tick_interval_ms.max(MIN_INTERVAL_MS);
        self.diagnostics_delay_ms = self.diagnostics_delay_ms.max(MIN_INTERVAL_MS);
        self.ranges.validate();
        self.window_size = (
            self.window_size.0.max(MIN_WINDOW_SIZE.0),
            self.window_size.1.max(MIN_WINDOW_SIZE.1),
        );
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn diagnostics_delay(&self) -> Duration {
        Duration::from_millis(self.diagnostics_delay_ms)
    }

    /// Default `tracing` filter directive for these settings
    pub fn log_filter(&self) -> &'static str {
        if self.debug_logging {
            "quantum_core=debug,eframe=warn,egui=warn"
        } else {
            "quantum_core=info,eframe=warn,egui=warn"
        }
    }
}
