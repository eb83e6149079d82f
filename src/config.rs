//! User settings, persisted as JSON in the OS configuration directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{HubError, Result};
use crate::timeline::window::{DEFAULT_MONTH_WIDTH, DEFAULT_START_YEAR, DEFAULT_YEARS};
use crate::timeline::{CalendarWindow, LayoutMode};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubSettings {
    /// First year shown on the roadmap.
    pub start_year: i32,
    pub years: u32,
    pub month_width: i32,
    pub layout_mode: LayoutMode,
    pub editable: bool,
    pub last_workspace: Option<PathBuf>,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            years: DEFAULT_YEARS,
            month_width: DEFAULT_MONTH_WIDTH,
            layout_mode: LayoutMode::Swimlane,
            editable: true,
            last_workspace: None,
        }
    }
}

impl HubSettings {
    pub fn window(&self) -> CalendarWindow {
        CalendarWindow::new(self.start_year, self.years, self.month_width)
    }
}

/// Location of the settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    /// Resolve the platform config directory, creating it if needed.
    pub fn open() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "StrategyHub", "Strategy Hub").ok_or(HubError::NoConfigDir)?;
        Self::at(dirs.config_dir())
    }

    pub fn at(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| HubError::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    /// Read settings; anything missing or unreadable falls back to defaults.
    pub fn load(&self) -> HubSettings {
        let path = self.settings_path();
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HubSettings::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read settings");
                return HubSettings::default();
            }
        };
        serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "failed to parse settings");
            HubSettings::default()
        })
    }

    pub fn save(&self, settings: &HubSettings) -> Result<()> {
        let path = self.settings_path();
        let json = serde_json::to_string_pretty(settings).map_err(|e| HubError::json(&path, e))?;
        std::fs::write(&path, json).map_err(|e| HubError::io(&path, e))
    }
}
