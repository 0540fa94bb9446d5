use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calendar::CalendarConfig;
use crate::gesture::{GestureSettings, ReleaseMetric, tracker::DEFAULT_FLICK_DISTANCE_PX};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub sheet: SheetConfig,
    pub calendar: CalendarConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SheetConfig {
    pub flick_distance_px: f32,
    pub timing_tick_ms: u64,
    pub release_metric: ReleaseMetric,
    pub open_transition_ms: u64,
    pub close_transition_ms: u64,
    pub pixels_per_row: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub theme: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            flick_distance_px: DEFAULT_FLICK_DISTANCE_PX,
            timing_tick_ms: 1,
            release_metric: ReleaseMetric::Final,
            open_transition_ms: 100,
            close_transition_ms: 300,
            pixels_per_row: 16.0,
        }
    }
}

impl SheetConfig {
    pub fn gesture(&self) -> GestureSettings {
        GestureSettings {
            flick_distance_px: self.flick_distance_px,
            timing_tick_ms: self.timing_tick_ms,
            release_metric: self.release_metric,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            tracing::info!(path = %config_path.display(), "wrote default config");
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sheetcal")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::SelectionMode;
    use chrono::NaiveDate;

    #[test]
    fn default_config_uses_150px_flick() {
        let config = Config::default();
        assert_eq!(config.sheet.flick_distance_px, 150.0);
    }

    #[test]
    fn default_config_measures_time_in_milliseconds() {
        let config = Config::default();
        assert_eq!(config.sheet.timing_tick_ms, 1);
        assert_eq!(config.sheet.release_metric, ReleaseMetric::Final);
    }

    #[test]
    fn default_transitions_match_panel_animation() {
        let config = Config::default();
        assert_eq!(config.sheet.open_transition_ms, 100);
        assert_eq!(config.sheet.close_transition_ms, 300);
    }

    #[test]
    fn parse_valid_toml_config() {
        let toml_content = r#"
            [sheet]
            flick_distance_px = 120.0
            timing_tick_ms = 1000
            release_metric = "peak"

            [calendar]
            mode = "range"
            min_date = "2025-01-01"
            max_date = "2025-12-31"
            allow_weekends = false

            [ui]
            theme = "nord"
        "#;

        let config = Config::from_toml(toml_content).unwrap();

        assert_eq!(config.sheet.flick_distance_px, 120.0);
        assert_eq!(config.sheet.gesture().timing_tick_ms, 1000);
        assert_eq!(config.sheet.release_metric, ReleaseMetric::Peak);
        assert_eq!(config.sheet.close_transition_ms, 300);
        assert_eq!(config.calendar.mode, SelectionMode::Range);
        assert_eq!(config.calendar.max_date, NaiveDate::from_ymd_opt(2025, 12, 31));
        assert_eq!(config.ui.theme, "nord");
    }

    #[test]
    fn empty_toml_yields_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let invalid_toml = "this is not valid toml";
        let result = Config::from_toml(invalid_toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.calendar.min_date = NaiveDate::from_ymd_opt(2025, 2, 1);
        config.calendar.excluded_dates.insert(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());

        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
