use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use neo_engine::FeedSettings;
use neo_logging::{neo_info, neo_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

const SETTINGS_FILENAME: &str = "neo_app.ron";
const SETTINGS_PATH_ENV: &str = "NEO_APP_SETTINGS";
const API_KEY_ENV: &str = "NASA_API_KEY";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Settings read from `neo_app.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub base_url: String,
    pub api_key: String,
    pub window_days: u64,
    pub minimum_empty_load_time_ms: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
    /// Serve canned responses instead of calling the feed API.
    pub use_mock_service: bool,
    /// Reloads performed after the first appearance.
    pub refresh_count: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        let feed = FeedSettings::default();
        Self {
            base_url: feed.base_url,
            api_key: feed.api_key,
            window_days: feed.window_days,
            minimum_empty_load_time_ms: 2_000,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
            use_mock_service: false,
            refresh_count: 1,
        }
    }
}

impl AppSettings {
    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            window_days: self.window_days,
            ..FeedSettings::default()
        }
    }

    pub fn minimum_empty_load_time(&self) -> Duration {
        Duration::from_millis(self.minimum_empty_load_time_ms)
    }

    fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|key| !key.trim().is_empty()) {
            self.api_key = key.trim().to_string();
        }
        self
    }
}

/// Settings file location: `$NEO_APP_SETTINGS`, or `neo_app.ron` in the working directory.
pub fn settings_path() -> PathBuf {
    std::env::var_os(SETTINGS_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILENAME))
}

/// Loads settings from the default location and applies `$NASA_API_KEY`.
pub fn load_from_env() -> Result<AppSettings, SettingsError> {
    let settings = load_settings(&settings_path())?;
    Ok(settings.with_api_key(std::env::var(API_KEY_ENV).ok()))
}

/// Reads settings from `path`. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<AppSettings, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            neo_info!("No settings at {:?}, using defaults", path);
            return Ok(AppSettings::default());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let settings: AppSettings = ron::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if settings.window_days == 0 {
        neo_warn!("Settings at {:?} request an empty feed window", path);
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = load_settings(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.minimum_empty_load_time(), Duration::from_secs(2));
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("neo_app.ron");
        fs::write(
            &path,
            "(api_key: \"abc\", use_mock_service: true, log_destination: Both)",
        )
        .unwrap();

        let settings = load_settings(&path).unwrap();

        assert_eq!(settings.api_key, "abc");
        assert!(settings.use_mock_service);
        assert_eq!(settings.log_destination, LogDestination::Both);
        assert_eq!(settings.window_days, 7);
        assert_eq!(settings.refresh_count, 1);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("neo_app.ron");
        fs::write(&path, "(window_days: \"seven\")").unwrap();

        let err = load_settings(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn api_key_override_ignores_blank_values() {
        let settings = AppSettings::default().with_api_key(Some("  ".to_string()));
        assert_eq!(settings.api_key, FeedSettings::default().api_key);

        let settings = AppSettings::default().with_api_key(Some(" k3y ".to_string()));
        assert_eq!(settings.api_key, "k3y");
    }

    #[test]
    fn feed_settings_carry_file_values() {
        let settings = AppSettings {
            base_url: "http://localhost:9000".to_string(),
            window_days: 3,
            ..AppSettings::default()
        };
        let feed = settings.feed_settings();
        assert_eq!(feed.base_url, "http://localhost:9000");
        assert_eq!(feed.window_days, 3);
        assert_eq!(feed.request_timeout, FeedSettings::default().request_timeout);
    }
}
