use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::domain::history::DEFAULT_UNDO_LIMIT;
use crate::app::domain::theme::Theme;
use crate::app::infrastructure::error::AppError;
use crate::app::infrastructure::platform::detect_system_theme;

/// Theme to start with. Toggling at runtime does not write this back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
    SystemDefault,
}

impl ThemeMode {
    pub fn resolve(self) -> Theme {
        match self {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::SystemDefault => detect_system_theme(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_theme_mode")]
    pub theme_mode: ThemeMode,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_word_wrap")]
    pub word_wrap_enabled: bool,

    /// Undo steps kept per tab
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,

    /// tracing filter directive, e.g. "warn" or "tab_pad=debug"
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_window_width")]
    pub window_width: i32,

    #[serde(default = "default_window_height")]
    pub window_height: i32,
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::Light
}

fn default_font_size() -> u32 {
    12
}

fn default_word_wrap() -> bool {
    true
}

fn default_undo_limit() -> usize {
    DEFAULT_UNDO_LIMIT
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_window_width() -> i32 {
    640
}

fn default_window_height() -> i32 {
    480
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme_mode: default_theme_mode(),
            font_size: default_font_size(),
            word_wrap_enabled: default_word_wrap(),
            undo_limit: default_undo_limit(),
            log_level: default_log_level(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists.
    ///
    /// Runs before the subscriber is installed (the log level lives in
    /// here), so problems are returned alongside the settings instead of
    /// being logged directly.
    pub fn load() -> (Self, Option<AppError>) {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(config_path: &Path) -> (Self, Option<AppError>) {
        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str::<AppSettings>(&contents) {
                Ok(settings) => (settings.sanitized(), None),
                Err(e) => (
                    Self::default(),
                    Some(AppError::Settings(format!(
                        "failed to parse {}: {}. Using defaults.",
                        config_path.display(),
                        e
                    ))),
                ),
            },
            Err(_) => {
                // File doesn't exist, write defaults for next time
                let default = Self::default();
                let err = default.save_to(config_path).err();
                (default, err)
            }
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), AppError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(config_path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("tabpad");
        path.push("settings.json");
        path
    }

    fn sanitized(mut self) -> Self {
        self.font_size = self.font_size.clamp(6, 72);
        self.undo_limit = self.undo_limit.max(1);
        self.window_width = self.window_width.max(200);
        self.window_height = self.window_height.max(150);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.theme_mode, ThemeMode::Light);
        assert_eq!(settings.font_size, 12);
        assert!(settings.word_wrap_enabled);
        assert_eq!(settings.undo_limit, DEFAULT_UNDO_LIMIT);
        assert_eq!(settings.log_level, "warn");
        assert_eq!((settings.window_width, settings.window_height), (640, 480));
    }

    #[test]
    fn test_serialize_deserialize() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{"theme_mode": "Dark"}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.theme_mode, ThemeMode::Dark);
        assert_eq!(settings.font_size, 12);
        assert!(settings.word_wrap_enabled);
    }

    #[test]
    fn test_explicit_modes_resolve() {
        assert_eq!(ThemeMode::Light.resolve(), Theme::Light);
        assert_eq!(ThemeMode::Dark.resolve(), Theme::Dark);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tabpad").join("settings.json");

        let (settings, err) = AppSettings::load_from(&path);
        assert!(err.is_none());
        assert_eq!(settings, AppSettings::default());
        assert!(path.exists());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let (settings, err) = AppSettings::load_from(&path);
        assert_eq!(settings, AppSettings::default());
        assert!(matches!(err, Some(AppError::Settings(_))));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"font_size": 400, "undo_limit": 0}"#).unwrap();

        let (settings, _) = AppSettings::load_from(&path);
        assert_eq!(settings.font_size, 72);
        assert_eq!(settings.undo_limit, 1);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = AppSettings {
            theme_mode: ThemeMode::SystemDefault,
            font_size: 16,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();

        let (loaded, err) = AppSettings::load_from(&path);
        assert!(err.is_none());
        assert_eq!(loaded, settings);
    }
}
