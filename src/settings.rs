use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const SETTINGS_DIR_NAME: &str = "ShortcutHUD";

pub const MIN_OPACITY: f64 = 0.2;
pub const MAX_OPACITY: f64 = 1.0;
pub const DEFAULT_OPACITY: f64 = 0.92;
pub const DEFAULT_WINDOW_LEFT: f64 = 60.0;
pub const DEFAULT_WINDOW_TOP: f64 = 60.0;

/// Persisted HUD preferences.
///
/// Values handed out by [`SettingsStore::load`] are always sanitized: the
/// opacity lies within `[MIN_OPACITY, MAX_OPACITY]` and both window
/// coordinates are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppSettings {
    pub opacity: f64,
    pub is_pinned: bool,
    pub window_left: f64,
    pub window_top: f64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            opacity: DEFAULT_OPACITY,
            is_pinned: false,
            window_left: DEFAULT_WINDOW_LEFT,
            window_top: DEFAULT_WINDOW_TOP,
        }
    }
}

/// Clamp an opacity into the supported range. NaN maps to the default.
pub fn clamp_opacity(value: f64) -> f64 {
    if value.is_nan() {
        DEFAULT_OPACITY
    } else {
        value.clamp(MIN_OPACITY, MAX_OPACITY)
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

impl AppSettings {
    /// Return a copy with every field forced into its valid domain.
    pub fn sanitized(&self) -> Self {
        Self {
            opacity: clamp_opacity(self.opacity),
            is_pinned: self.is_pinned,
            window_left: finite_or(self.window_left, DEFAULT_WINDOW_LEFT),
            window_top: finite_or(self.window_top, DEFAULT_WINDOW_TOP),
        }
    }
}

/// On-disk shape. Every field is optional so a partially written or
/// hand-edited file still yields usable values.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct StoredSettings {
    opacity: Option<f64>,
    is_pinned: Option<bool>,
    window_left: Option<f64>,
    window_top: Option<f64>,
}

impl From<StoredSettings> for AppSettings {
    fn from(stored: StoredSettings) -> Self {
        let defaults = AppSettings::default();
        AppSettings {
            opacity: stored.opacity.unwrap_or(defaults.opacity),
            is_pinned: stored.is_pinned.unwrap_or(defaults.is_pinned),
            window_left: stored.window_left.unwrap_or(defaults.window_left),
            window_top: stored.window_top.unwrap_or(defaults.window_top),
        }
        .sanitized()
    }
}

/// Per-user folder holding the settings file. Falls back to the current
/// directory when the platform reports no local data directory.
pub fn default_settings_dir() -> PathBuf {
    dirs_next::data_local_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(std::env::temp_dir)
        .join(SETTINGS_DIR_NAME)
}

/// Reads and writes [`AppSettings`] at a fixed path.
///
/// Neither operation reports failure to the caller: loading falls back to the
/// defaults and saving is best effort.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store located in the per-user application data folder.
    pub fn user_default() -> Self {
        Self::new(default_settings_dir().join(SETTINGS_FILE_NAME))
    }

    pub fn load(&self) -> AppSettings {
        match read_settings(&self.path) {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "no settings file; using defaults");
                AppSettings::default()
            }
            Err(e) => {
                tracing::warn!("failed to load settings, using defaults: {e:#}");
                AppSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &AppSettings) {
        if let Err(e) = write_settings(&self.path, &settings.sanitized()) {
            tracing::warn!("failed to save settings: {e:#}");
        }
    }
}

fn read_settings(path: &Path) -> anyhow::Result<Option<AppSettings>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read settings file {}", path.display()))?;
    let stored: Option<StoredSettings> = serde_json::from_str(&content)
        .with_context(|| format!("deserialize settings file {}", path.display()))?;
    Ok(stored.map(AppSettings::from))
}

fn write_settings(path: &Path, settings: &AppSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create settings folder {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(settings).context("serialize settings")?;
    std::fs::write(path, json).with_context(|| format!("write settings file {}", path.display()))
}
